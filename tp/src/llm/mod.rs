//! LLM Client module
//!
//! The narrative generator's transport: a provider-agnostic [`LlmClient`]
//! trait with Gemini and Anthropic implementations.

use std::sync::Arc;

use tracing::debug;

mod anthropic;
pub mod client;
mod error;
mod gemini;
mod types;

pub use anthropic::AnthropicClient;
pub use client::LlmClient;
pub use error::LlmError;
pub use gemini::GeminiClient;
pub use types::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};

use crate::config::LlmConfig;

/// Create an LLM client based on the provider specified in config
///
/// Supports "gemini" and "anthropic" providers. Fails when the API key
/// environment variable is unset.
pub fn create_client(config: &LlmConfig) -> Result<Arc<dyn LlmClient>, LlmError> {
    debug!(provider = %config.provider, model = %config.model, "create_client: called");
    match config.provider.as_str() {
        "gemini" => {
            debug!("create_client: creating Gemini client");
            Ok(Arc::new(GeminiClient::from_config(config)?))
        }
        "anthropic" => {
            debug!("create_client: creating Anthropic client");
            Ok(Arc::new(AnthropicClient::from_config(config)?))
        }
        other => {
            debug!(provider = %other, "create_client: unknown provider");
            Err(LlmError::Config(format!(
                "Unknown LLM provider: '{}'. Supported: gemini, anthropic",
                other
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_create_client_unknown_provider() {
        let config = LlmConfig {
            provider: "cohere".to_string(),
            ..Default::default()
        };
        let err = create_client(&config).err().unwrap();
        assert!(err.to_string().contains("Unknown LLM provider"));
    }

    #[test]
    #[serial]
    fn test_create_client_requires_key() {
        let config = LlmConfig {
            api_key_env: "TP_TEST_MISSING_LLM_KEY".to_string(),
            ..Default::default()
        };
        unsafe {
            std::env::remove_var("TP_TEST_MISSING_LLM_KEY");
        }
        assert!(matches!(create_client(&config), Err(LlmError::Config(_))));
    }

    #[test]
    #[serial]
    fn test_create_client_selects_provider() {
        unsafe {
            std::env::set_var("TP_TEST_PRESENT_LLM_KEY", "k");
        }
        for provider in ["gemini", "anthropic"] {
            let config = LlmConfig {
                provider: provider.to_string(),
                api_key_env: "TP_TEST_PRESENT_LLM_KEY".to_string(),
                ..Default::default()
            };
            let client = create_client(&config).unwrap();
            assert_eq!(client.provider(), provider);
        }
        unsafe {
            std::env::remove_var("TP_TEST_PRESENT_LLM_KEY");
        }
    }
}
