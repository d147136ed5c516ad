//! HTTP API
//!
//! axum router exposing trip planning, diagnostics and the supported
//! locations list.

mod error;
mod handlers;
mod middleware;
mod routes;
mod state;

pub use error::ApiError;
pub use handlers::{HEALTH_PROBE_ADDRESS, HealthReport, SUPPORTED_CITIES, SupportedLocations};
pub use routes::{HEALTH_PATH, PLAN_TRIP_PATH, SUPPORTED_LOCATIONS_PATH, router};
pub use state::AppState;
