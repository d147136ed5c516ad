//! Section extraction from free-form narrative text
//!
//! The generator is asked to emit `#OVERVIEW`, `#ITINERARY` and
//! `#PRACTICAL_INFO`. Parsing is best effort: the text is split on every `#`
//! and each section is the first fragment containing its marker, with the
//! marker removed and whitespace trimmed. A marker mentioned inside unrelated
//! body text can select the wrong fragment; that fragility is accepted.

use tracing::debug;

use crate::domain::TripPlanSections;

pub const OVERVIEW_MARKER: &str = "OVERVIEW";
pub const ITINERARY_MARKER: &str = "ITINERARY";
pub const PRACTICAL_INFO_MARKER: &str = "PRACTICAL_INFO";

/// Split narrative text into the three plan sections
pub fn parse_sections(text: &str) -> TripPlanSections {
    debug!(text_len = text.len(), "parse_sections: called");
    let fragments: Vec<&str> = text.split('#').collect();

    TripPlanSections {
        overview: extract_section(&fragments, OVERVIEW_MARKER),
        itinerary: extract_section(&fragments, ITINERARY_MARKER),
        practical_info: extract_section(&fragments, PRACTICAL_INFO_MARKER),
    }
}

/// First fragment containing `marker`, marker stripped; empty when absent
fn extract_section(fragments: &[&str], marker: &str) -> String {
    match fragments.iter().find(|f| f.contains(marker)) {
        Some(fragment) => fragment.replace(marker, "").trim().to_string(),
        None => {
            debug!(%marker, "extract_section: marker not found");
            String::new()
        }
    }
}
