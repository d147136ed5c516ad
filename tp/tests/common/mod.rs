//! Shared fakes for router-level tests

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response};
use serde_json::Value;

use tripplanner::config::{MapsConfig, PlannerConfig};
use tripplanner::domain::Coordinates;
use tripplanner::llm::{CompletionRequest, CompletionResponse, LlmClient, LlmError};
use tripplanner::maps::{MapsError, NearbyQuery, PlaceDetails, PlaceSummary, PlacesClient, PlacesLookup};
use tripplanner::narrative::NarrativeGenerator;
use tripplanner::planner::TripPlanner;
use tripplanner::prompts::PromptLoader;
use tripplanner::ratelimit::RateLimiter;
use tripplanner::{AppState, router};

pub const NARRATIVE: &str = "#OVERVIEW Delhi in winter.\n#ITINERARY Day 1: Old Delhi\nDay 2: Qutub Minar\n#PRACTICAL_INFO Carry cash.";

/// LLM fake: answers every call with the same text, or fails every call
pub struct FakeLlm {
    reply: Result<String, String>,
    calls: AtomicUsize,
}

impl FakeLlm {
    pub fn replying(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            reply: Err(message.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmClient for FakeLlm {
    async fn complete(&self, _request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(CompletionResponse::text(text.clone())),
            Err(message) => Err(LlmError::ApiError {
                status: 503,
                message: message.clone(),
            }),
        }
    }

    fn provider(&self) -> &str {
        "fake"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeocodeMode {
    /// Every address resolves to the fixed coordinates
    Found,
    /// No address matches
    NoMatch,
    /// Every geocode call errors
    Fails,
    /// Every geocode call panics
    Panics,
}

/// Places fake with one hotel and one landmark (with or without a photo)
pub struct FakePlaces {
    mode: GeocodeMode,
    coords: Coordinates,
    landmark_photo: bool,
    calls: AtomicUsize,
}

impl FakePlaces {
    pub fn new(mode: GeocodeMode) -> Self {
        Self {
            mode,
            coords: Coordinates::new(28.6139, 77.209),
            landmark_photo: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn without_landmark_photos(mut self) -> Self {
        self.landmark_photo = false;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PlacesClient for FakePlaces {
    async fn geocode(&self, _address: &str) -> Result<Option<Coordinates>, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            GeocodeMode::Found => Ok(Some(self.coords)),
            GeocodeMode::NoMatch => Ok(None),
            GeocodeMode::Fails => Err(MapsError::Api {
                status: "REQUEST_DENIED".to_string(),
                message: "fake key rejected".to_string(),
            }),
            GeocodeMode::Panics => panic!("geocoder exploded"),
        }
    }

    async fn nearby_search(&self, query: &NearbyQuery) -> Result<Vec<PlaceSummary>, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let place = match query.place_type.as_str() {
            "lodging" => PlaceSummary {
                place_id: "hotel-1".to_string(),
                name: "The Imperial".to_string(),
                photo_references: vec!["hotel-photo".to_string()],
            },
            _ => PlaceSummary {
                place_id: "sight-1".to_string(),
                name: "Red Fort".to_string(),
                photo_references: if self.landmark_photo {
                    vec!["fort-photo".to_string()]
                } else {
                    vec![]
                },
            },
        };
        Ok(vec![place])
    }

    async fn place_details(&self, _place_id: &str) -> Result<PlaceDetails, MapsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(PlaceDetails {
            name: Some("The Imperial".to_string()),
            rating: Some(4.6),
            price_level: Some(3),
            ..Default::default()
        })
    }

    fn photo_url(&self, photo_reference: &str) -> String {
        format!("https://photos.test/{}", photo_reference)
    }
}

/// Router wired to the given fakes; rate limiting only when `limit` is set
pub fn app(llm: Arc<FakeLlm>, places: Arc<FakePlaces>, limit: Option<u32>) -> Router {
    let narrative = NarrativeGenerator::new(llm, PromptLoader::embedded_only(), 2048);
    let lookup = PlacesLookup::new(places, &MapsConfig::default());
    let planner = TripPlanner::new(narrative, Arc::new(lookup), &PlannerConfig::default());

    let mut state = AppState::new(Arc::new(planner));
    if let Some(requests) = limit {
        state = state.with_rate_limiter(RateLimiter::new(requests, std::time::Duration::from_secs(3600)));
    }
    router(state, true)
}

pub fn plan_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/plan-trip")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
