//! Trip Planner - LLM narrative plus maps enrichment
//!
//! Validates a trip request, asks a language model for a three-section
//! narrative, and merges it with coordinates, hotels, landmark photos and
//! demo flight options into one JSON payload.
//!
//! # Core Concepts
//!
//! - **Narrative first**: without narrative text there is no plan, so that failure aborts
//! - **Degrade the rest**: every enrichment lookup has a documented fallback
//! - **Injected collaborators**: LLM and places clients sit behind traits
//!
//! # Modules
//!
//! - [`validation`] - Request validation and normalization
//! - [`planner`] - Orchestration and the per-field failure table
//! - [`narrative`] - Prompt rendering, LLM call, section parsing
//! - [`llm`] - LLM client trait with Gemini and Anthropic implementations
//! - [`maps`] - Places client trait, Google Maps implementation, lookups
//! - [`flights`] - Demonstration flight data
//! - [`api`] - axum HTTP surface
//! - [`client`] - HTTP client and terminal renderer for the CLI
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface

pub mod api;
pub mod cache;
pub mod cli;
pub mod client;
pub mod config;
pub mod domain;
pub mod flights;
pub mod llm;
pub mod maps;
pub mod narrative;
pub mod planner;
pub mod prompts;
pub mod ratelimit;
pub mod validation;

// Re-export commonly used types
pub use api::{AppState, router};
pub use config::Config;
pub use domain::{Coordinates, TripRequest, TripRequestBody, TripResponse};
pub use llm::{LlmClient, LlmError, create_client};
pub use maps::{GoogleMapsClient, MapsError, PlacesClient, PlacesLookup};
pub use narrative::NarrativeGenerator;
pub use planner::{PlanError, TripPlanner};
pub use validation::{ValidationError, validate_request};
