//! Route handlers

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use futures::future::join_all;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, error, info};

use super::AppState;
use super::error::ApiError;
use crate::domain::{Coordinates, TripRequestBody, TripResponse};
use crate::validation::validate_request;

/// Cities reported by `/api/supported-locations`
pub const SUPPORTED_CITIES: [&str; 5] = ["London", "Paris", "New York", "Tokyo", "Dubai"];

/// Known-good address geocoded by the health probe
pub const HEALTH_PROBE_ADDRESS: &str = "London";

pub async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Trip Planner API is running" }))
}

pub async fn plan_trip(
    State(state): State<AppState>,
    payload: Result<Json<TripRequestBody>, JsonRejection>,
) -> Result<Json<TripResponse>, ApiError> {
    let Json(body) = payload?;
    let request = validate_request(body).map_err(|e| {
        info!(field = e.field, "Rejected trip request: {}", e);
        e
    })?;

    let response = state.planner.plan(&request).await?;
    Ok(Json(response))
}

/// Whether each collaborator is constructed
#[derive(Debug, Serialize)]
pub struct ServicesStatus {
    pub llm_service: bool,
    pub maps_service: bool,
}

impl ServicesStatus {
    /// `AppState` cannot be built without a planner and the planner owns both
    /// clients, so every handler sees them constructed
    fn constructed() -> Self {
        Self {
            llm_service: true,
            maps_service: true,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub services: ServicesStatus,
    pub api_status: &'static str,
    pub timestamp: String,
}

/// Live diagnostics: geocodes a known city through the places client
pub async fn health(State(state): State<AppState>) -> Response {
    debug!(llm = %state.planner.narrative_provider(), "health: called");
    let client = state.planner.places().client().clone();
    let probe = tokio::spawn(async move { client.geocode(HEALTH_PROBE_ADDRESS).await });

    let services = ServicesStatus::constructed();

    let api_ok = match probe.await {
        Ok(Ok(Some(coords))) => coords.latitude != 0.0,
        Ok(Ok(None)) => false,
        Ok(Err(e)) => {
            debug!(error = %e, "health: probe failed");
            false
        }
        Err(e) => {
            error!(error = %e, "Health check failed");
            let body = json!({
                "detail": {
                    "status": "unhealthy",
                    "error": e.to_string(),
                    "timestamp": Utc::now().to_rfc3339(),
                }
            });
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response();
        }
    };

    let healthy = services.llm_service && services.maps_service && api_ok;
    let report = HealthReport {
        status: if healthy { "healthy" } else { "degraded" },
        services,
        api_status: if api_ok { "operational" } else { "error" },
        timestamp: Utc::now().to_rfc3339(),
    };
    Json(report).into_response()
}

#[derive(Debug, Serialize)]
pub struct SupportedLocations {
    pub supported_locations: BTreeMap<String, Coordinates>,
    pub total_count: usize,
}

pub async fn supported_locations(State(state): State<AppState>) -> Json<SupportedLocations> {
    debug!("supported_locations: called");
    let places = state.planner.places();
    let coords = join_all(SUPPORTED_CITIES.iter().map(|city| places.coordinates_or_zero(city))).await;

    let supported_locations: BTreeMap<String, Coordinates> = SUPPORTED_CITIES
        .iter()
        .map(|city| city.to_string())
        .zip(coords)
        .collect();
    Json(SupportedLocations {
        total_count: supported_locations.len(),
        supported_locations,
    })
}
