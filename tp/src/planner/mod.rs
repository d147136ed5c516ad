//! Trip plan orchestration
//!
//! Drafts the narrative first, then runs the enrichment lookups
//! concurrently and merges everything into one [`TripResponse`]. How each
//! field reacts to failure is fixed by [`PlanField::on_failure`].

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;

mod policy;

pub use policy::{OnFailure, PlanField};

use crate::config::PlannerConfig;
use crate::domain::{Coordinates, TripRequest, TripResponse};
use crate::flights;
use crate::maps::{MapsError, PlacesLookup};
use crate::narrative::{NarrativeError, NarrativeGenerator, parse_sections};

/// Errors that abort a plan request
#[derive(Debug, Error)]
pub enum PlanError {
    #[error("Failed to generate trip plan: {0}")]
    Narrative(#[from] NarrativeError),
}

impl PlanError {
    pub fn field(&self) -> PlanField {
        match self {
            PlanError::Narrative(_) => PlanField::Narrative,
        }
    }
}

/// Builds merged trip plans from a narrative generator and a places lookup
pub struct TripPlanner {
    narrative: NarrativeGenerator,
    places: Arc<PlacesLookup>,
    lookup_timeout: Duration,
    placeholder_photo: String,
}

impl TripPlanner {
    pub fn new(narrative: NarrativeGenerator, places: Arc<PlacesLookup>, config: &PlannerConfig) -> Self {
        debug!(lookup_timeout_ms = config.lookup_timeout_ms, "TripPlanner::new: called");
        Self {
            narrative,
            places,
            lookup_timeout: config.lookup_timeout(),
            placeholder_photo: config.placeholder_photo.clone(),
        }
    }

    pub fn places(&self) -> &Arc<PlacesLookup> {
        &self.places
    }

    pub fn narrative_provider(&self) -> &str {
        self.narrative.provider()
    }

    /// Plan a validated trip request
    pub async fn plan(&self, request: &TripRequest) -> Result<TripResponse, PlanError> {
        let request_id = Uuid::now_v7();
        let span = info_span!(
            "plan",
            %request_id,
            origin = %request.origin,
            destination = %request.destination
        );
        self.plan_inner(request).instrument(span).await
    }

    async fn plan_inner(&self, request: &TripRequest) -> Result<TripResponse, PlanError> {
        info!(
            travelers = request.travelers,
            duration_days = request.duration_days,
            travel_date = %request.travel_date,
            "Planning trip"
        );

        let text = self.narrative.generate(request).await?;
        let sections = parse_sections(&text);
        debug!(
            overview = !sections.overview.is_empty(),
            itinerary = !sections.itinerary.is_empty(),
            practical_info = !sections.practical_info.is_empty(),
            "plan_inner: sections parsed"
        );

        let destination = request.destination.as_str();
        let (coordinates, hotels, photos) = tokio::join!(
            self.bounded(self.places.coordinates(destination)),
            self.bounded(self.places.hotels(destination)),
            self.bounded(self.places.landmark_photos(destination)),
        );
        let flights = flights::synthesize(&request.origin, destination);

        let coordinates = match degrade(PlanField::Coordinates, coordinates, None) {
            Some(coords) => coords,
            None => {
                warn!(%destination, fallback = PlanField::Coordinates.fallback(), "Destination did not geocode");
                Coordinates::zero()
            }
        };
        let hotels = degrade(PlanField::Hotels, hotels, Vec::new());
        let mut photos = degrade(PlanField::Photos, photos, Vec::new());
        if photos.is_empty() {
            photos.push(self.placeholder_photo.clone());
        }

        info!(
            hotels = hotels.len(),
            photos = photos.len(),
            flights = flights.len(),
            "Trip plan ready"
        );
        Ok(TripResponse::new(sections, flights, hotels, coordinates, photos))
    }

    /// Bound a lookup by the per-lookup timeout
    async fn bounded<T>(&self, lookup: impl Future<Output = Result<T, MapsError>>) -> Result<T, MapsError> {
        match tokio::time::timeout(self.lookup_timeout, lookup).await {
            Ok(result) => result,
            Err(_) => Err(MapsError::Timeout(self.lookup_timeout)),
        }
    }
}

/// Replace a failed degradable field with its fallback
fn degrade<T>(field: PlanField, result: Result<T, MapsError>, fallback: T) -> T {
    debug_assert_eq!(field.on_failure(), OnFailure::Degrade);
    match result {
        Ok(value) => value,
        Err(e) => {
            warn!(
                %field,
                error = %e,
                access_problem = e.is_access_problem(),
                fallback = field.fallback(),
                "Lookup failed, degrading"
            );
            fallback
        }
    }
}
