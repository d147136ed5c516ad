//! Domain types for the trip planner
//!
//! Every value here is request-scoped: built fresh per call, never mutated
//! after construction, never persisted.

mod plan;
mod trip;

pub use plan::{
    Accommodations, Coordinates, FlightOption, FlightsInfo, HotelListing, MapData, Review, TripPlanSections,
    TripResponse,
};
pub use trip::{DEFAULT_DURATION_DAYS, TravelMonth, TripRequest, TripRequestBody};
