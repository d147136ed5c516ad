//! Maps and places provider integration

pub mod client;
mod error;
mod google;
mod lookup;
mod types;

pub use client::PlacesClient;
pub use error::MapsError;
pub use google::GoogleMapsClient;
pub use lookup::PlacesLookup;
pub use types::{NearbyQuery, PlaceDetails, PlaceSummary};
