use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use super::AppState;
use super::handlers::{health, plan_trip, root, supported_locations};
use super::middleware::{cors, rate_limit};

pub const PLAN_TRIP_PATH: &str = "/api/plan-trip";
pub const HEALTH_PATH: &str = "/health";
pub const SUPPORTED_LOCATIONS_PATH: &str = "/api/supported-locations";

/// Build the application router
///
/// Rate limiting covers only the plan endpoint; CORS wraps everything when
/// enabled.
pub fn router(state: AppState, cors_enabled: bool) -> Router {
    let limited = Router::new()
        .route(PLAN_TRIP_PATH, post(plan_trip))
        .route_layer(middleware::from_fn_with_state(state.clone(), rate_limit));

    let app = Router::new()
        .route("/", get(root))
        .route(HEALTH_PATH, get(health))
        .route(SUPPORTED_LOCATIONS_PATH, get(supported_locations))
        .merge(limited)
        .with_state(state);

    if cors_enabled { app.layer(middleware::from_fn(cors)) } else { app }
}
