//! Prompt Loader
//!
//! Loads prompt templates from an override directory or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, info};

use super::embedded;
use crate::domain::TripRequest;

/// Context for rendering the trip narrative template
#[derive(Debug, Clone, Serialize)]
pub struct TripPromptContext {
    pub origin: String,
    pub destination: String,
    pub travelers: u8,
    pub travel_date: String,
    pub duration: u8,
    /// Comma-separated interests flagged true; empty when none
    pub interests: String,
}

impl From<&TripRequest> for TripPromptContext {
    fn from(request: &TripRequest) -> Self {
        debug!(destination = %request.destination, "TripPromptContext::from: called");
        Self {
            origin: request.origin.clone(),
            destination: request.destination.clone(),
            travelers: request.travelers,
            travel_date: request.travel_date.to_string(),
            duration: request.duration_days,
            interests: request.selected_interests().join(", "),
        }
    }
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// Override directory (from `prompts.dir`)
    override_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a loader that checks `dir` before the embedded templates
    pub fn new(dir: Option<impl AsRef<Path>>) -> Self {
        let override_dir = dir.map(|d| d.as_ref().to_path_buf()).filter(|d| {
            let exists = d.exists();
            debug!(?d, %exists, "PromptLoader::new: checking override directory");
            exists
        });

        Self {
            hbs: Self::engine(),
            override_dir,
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        debug!("PromptLoader::embedded_only: called");
        Self {
            hbs: Self::engine(),
            override_dir: None,
        }
    }

    /// Handlebars registry with HTML escaping disabled
    fn engine() -> Handlebars<'static> {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);
        hbs
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. Override: `{dir}/{name}.pmt`
    /// 2. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        debug!(%name, "PromptLoader::load_template: called");
        if let Some(ref dir) = self.override_dir {
            let path = dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!(?path, "PromptLoader::load_template: found in override directory");
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read prompt {}: {}", path.display(), e));
            }
            debug!(?path, "PromptLoader::load_template: not found in override directory");
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!(%name, "PromptLoader::load_template: found in embedded");
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<T: Serialize>(&self, template_name: &str, context: &T) -> Result<String> {
        debug!(%template_name, "PromptLoader::render: called");
        let template = self.load_template(template_name)?;
        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }

    /// Render the trip narrative prompt for a request
    pub fn trip_prompt(&self, request: &TripRequest) -> Result<String> {
        let context = TripPromptContext::from(request);
        info!(
            "Rendering trip prompt: {} -> {} ({} days)",
            context.origin, context.destination, context.duration
        );
        self.render("trip", &context)
    }
}
