//! Provider-agnostic places types

use crate::domain::{Coordinates, Review};

/// A nearby search
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    pub location: Coordinates,
    pub radius_m: u32,
    /// Place category (`lodging`, `tourist_attraction`, ...)
    pub place_type: String,
    pub keyword: Option<String>,
}

impl NearbyQuery {
    pub fn new(location: Coordinates, radius_m: u32, place_type: &str, keyword: &str) -> Self {
        Self {
            location,
            radius_m,
            place_type: place_type.to_string(),
            keyword: Some(keyword.to_string()),
        }
    }
}

/// One nearby search hit, in provider ranking order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceSummary {
    pub place_id: String,
    pub name: String,
    /// Opaque photo references, resolved to URLs with `PlacesClient::photo_url`
    pub photo_references: Vec<String>,
}

/// Detail record for one place; every field is optional upstream
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub rating: Option<f64>,
    pub formatted_address: Option<String>,
    pub price_level: Option<u8>,
    pub website: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub reviews: Vec<Review>,
    pub weekday_text: Vec<String>,
}
