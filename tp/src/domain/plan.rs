//! Trip plan response types
//!
//! Field names follow the JSON the web frontend already consumes, so most
//! structs carry explicit serde renames.

use serde::{Deserialize, Serialize};

/// The three narrative sections of a trip plan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripPlanSections {
    pub overview: String,
    pub itinerary: String,
    #[serde(rename = "practicalInfo")]
    pub practical_info: String,
}

/// Latitude/longitude pair
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    #[serde(rename = "lat")]
    pub latitude: f64,
    #[serde(rename = "lng")]
    pub longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// The (0, 0) value used when a lookup fails
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.latitude == 0.0 && self.longitude == 0.0
    }
}

/// A synthesized flight option (demonstration data, not a real search)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    pub airline: String,
    pub flight_number: String,
    pub departure: String,
    pub arrival: String,
    pub duration: String,
    pub price: String,
    pub stops: String,
    pub aircraft: String,
}

/// A guest review attached to a hotel listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Review {
    #[serde(default)]
    pub author_name: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub relative_time_description: String,
    #[serde(default)]
    pub text: String,
}

/// One lodging result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HotelListing {
    pub name: String,
    pub rating: Option<f64>,
    pub address: String,
    /// Price tier as repeated currency symbols, at least one
    pub price_level: String,
    pub phone: String,
    pub website: String,
    pub photos: Vec<String>,
    pub reviews: Vec<Review>,
    pub opening_hours: Vec<String>,
}

/// Wire wrapper: `{"available_flights": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightsInfo {
    pub available_flights: Vec<FlightOption>,
}

/// Wire wrapper: `{"hotels": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Accommodations {
    pub hotels: Vec<HotelListing>,
}

/// Wire shape of the destination marker: single-element coordinate arrays
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapData {
    pub latitude: Vec<f64>,
    pub longitude: Vec<f64>,
}

impl From<Coordinates> for MapData {
    fn from(coords: Coordinates) -> Self {
        Self {
            latitude: vec![coords.latitude],
            longitude: vec![coords.longitude],
        }
    }
}

impl MapData {
    /// First coordinate pair, if present
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude.first(), self.longitude.first()) {
            (Some(lat), Some(lng)) => Some(Coordinates::new(*lat, *lng)),
            _ => None,
        }
    }
}

/// The merged result of one plan request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripResponse {
    #[serde(rename = "tripPlan")]
    pub trip_plan: TripPlanSections,

    #[serde(rename = "flightsInfo")]
    pub flights_info: FlightsInfo,

    pub accommodations: Accommodations,

    pub map_data: MapData,

    pub photos: Vec<String>,
}

impl TripResponse {
    pub fn new(
        sections: TripPlanSections,
        flights: Vec<FlightOption>,
        hotels: Vec<HotelListing>,
        coordinates: Coordinates,
        photos: Vec<String>,
    ) -> Self {
        Self {
            trip_plan: sections,
            flights_info: FlightsInfo {
                available_flights: flights,
            },
            accommodations: Accommodations { hotels },
            map_data: coordinates.into(),
            photos,
        }
    }

    pub fn coordinates(&self) -> Coordinates {
        self.map_data.coordinates().unwrap_or_default()
    }
}
