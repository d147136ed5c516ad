//! Narrative generation
//!
//! Renders the trip prompt, sends it to the configured [`LlmClient`], and
//! hands back the raw text. An empty reply is a hard failure: without
//! narrative text there is no plan to show.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info, warn};

mod sections;

pub use sections::{ITINERARY_MARKER, OVERVIEW_MARKER, PRACTICAL_INFO_MARKER, parse_sections};

use crate::domain::TripRequest;
use crate::llm::{CompletionRequest, LlmClient, LlmError, StopReason};
use crate::prompts::PromptLoader;

/// Errors from narrative generation; all of them abort the plan request
#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("Failed to build prompt: {0}")]
    Prompt(String),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error("Empty response from narrative generator")]
    Empty,
}

/// Drafts trip narratives through an LLM
pub struct NarrativeGenerator {
    llm: Arc<dyn LlmClient>,
    prompts: PromptLoader,
    max_tokens: u32,
}

impl NarrativeGenerator {
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, max_tokens: u32) -> Self {
        debug!(provider = %llm.provider(), %max_tokens, "NarrativeGenerator::new: called");
        Self {
            llm,
            prompts,
            max_tokens,
        }
    }

    pub fn provider(&self) -> &str {
        self.llm.provider()
    }

    /// Generate the narrative text for a trip
    pub async fn generate(&self, request: &TripRequest) -> Result<String, NarrativeError> {
        debug!(destination = %request.destination, "NarrativeGenerator::generate: called");
        let prompt = self
            .prompts
            .trip_prompt(request)
            .map_err(|e| NarrativeError::Prompt(e.to_string()))?;

        let response = self
            .llm
            .complete(CompletionRequest::prompt(prompt, self.max_tokens))
            .await?;

        if response.stop_reason == StopReason::MaxTokens {
            warn!("Narrative generator hit the token limit; sections may be truncated");
        }

        match response.content {
            Some(text) if !text.trim().is_empty() => {
                info!(
                    chars = text.len(),
                    output_tokens = response.usage.output_tokens,
                    "Received narrative: {}...",
                    text.chars().take(200).collect::<String>()
                );
                Ok(text)
            }
            _ => {
                debug!(stop_reason = ?response.stop_reason, "NarrativeGenerator::generate: empty response");
                Err(NarrativeError::Empty)
            }
        }
    }
}
