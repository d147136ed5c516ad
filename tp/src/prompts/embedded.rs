//! Embedded prompts
//!
//! These are compiled into the binary from .pmt files at build time.

use tracing::debug;

/// Trip narrative prompt
pub const TRIP: &str = include_str!("../../prompts/trip.pmt");

/// Get the embedded prompt by name
pub fn get_embedded(name: &str) -> Option<&'static str> {
    debug!(%name, "get_embedded: called");
    match name {
        "trip" => Some(TRIP),
        _ => {
            debug!("get_embedded: no match found");
            None
        }
    }
}
