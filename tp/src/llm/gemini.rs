//! Google Gemini API client implementation
//!
//! Implements the LlmClient trait for the `generateContent` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use super::{CompletionRequest, CompletionResponse, LlmClient, LlmError, StopReason, TokenUsage};
use crate::config::LlmConfig;

/// Google Gemini API client
pub struct GeminiClient {
    model: String,
    api_key: String,
    base_url: String,
    http: Client,
    max_tokens: u32,
    timeout: Duration,
}

impl GeminiClient {
    /// Create a new client from configuration
    ///
    /// Reads the API key from the environment variable named in config.
    pub fn from_config(config: &LlmConfig) -> Result<Self, LlmError> {
        debug!(model = %config.model, "GeminiClient::from_config: called");
        let api_key = config.get_api_key().map_err(|e| LlmError::Config(e.to_string()))?;

        let timeout = config.timeout();
        let http = Client::builder().timeout(timeout).build().map_err(LlmError::Network)?;

        Ok(Self {
            model: config.model.clone(),
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http,
            max_tokens: config.max_tokens,
            timeout,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/v1beta/models/{}:generateContent", self.base_url, self.model)
    }

    /// Build the request body for the Gemini API
    fn build_request_body(&self, request: &CompletionRequest) -> serde_json::Value {
        debug!(%self.model, %request.max_tokens, "build_request_body: called");
        serde_json::json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
            "generationConfig": {
                "maxOutputTokens": request.max_tokens.min(self.max_tokens),
            },
        })
    }

    /// Parse the Gemini API response
    fn parse_response(api_response: GeminiResponse) -> Result<CompletionResponse, LlmError> {
        if let Some(reason) = api_response.prompt_feedback.and_then(|f| f.block_reason) {
            debug!(%reason, "parse_response: prompt blocked");
            return Err(LlmError::InvalidResponse(format!("Prompt blocked: {}", reason)));
        }

        let candidate = api_response.candidates.into_iter().next();
        let (content, stop_reason) = match candidate {
            Some(c) => {
                let text = c
                    .content
                    .map(|content| {
                        content
                            .parts
                            .into_iter()
                            .filter_map(|p| p.text)
                            .collect::<Vec<_>>()
                            .join("")
                    })
                    .filter(|t| !t.is_empty());
                let reason = c
                    .finish_reason
                    .as_deref()
                    .map(StopReason::from_gemini)
                    .unwrap_or(StopReason::EndTurn);
                (text, reason)
            }
            None => {
                debug!("parse_response: no candidates");
                (None, StopReason::EndTurn)
            }
        };

        let usage = api_response
            .usage_metadata
            .map(|u| TokenUsage {
                input_tokens: u.prompt_token_count,
                output_tokens: u.candidates_token_count,
            })
            .unwrap_or_default();

        Ok(CompletionResponse {
            content,
            stop_reason,
            usage,
        })
    }
}

#[async_trait]
impl LlmClient for GeminiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        debug!(%self.model, %request.max_tokens, "complete: called");
        let body = self.build_request_body(&request);

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(self.timeout)
                } else {
                    LlmError::Network(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let text = response.text().await.unwrap_or_default();
            debug!(%status, "complete: API error");
            return Err(LlmError::from_status(status.as_u16(), retry_after.as_deref(), text));
        }

        let api_response: GeminiResponse = response.json().await?;
        let parsed = Self::parse_response(api_response)?;
        debug!(usage = ?parsed.usage, stop_reason = ?parsed.stop_reason, "complete: success");
        Ok(parsed)
    }

    fn provider(&self) -> &str {
        "gemini"
    }
}

// Gemini API response types

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    #[serde(default)]
    usage_metadata: Option<GeminiUsage>,
    #[serde(default)]
    prompt_feedback: Option<GeminiPromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiCandidate {
    #[serde(default)]
    content: Option<GeminiContent>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Debug, Deserialize)]
struct GeminiPart {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: u64,
    #[serde(default)]
    candidates_token_count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient {
            model: "gemini-test".to_string(),
            api_key: "key".to_string(),
            base_url: "https://example.test".to_string(),
            http: Client::new(),
            max_tokens: 2048,
            timeout: Duration::from_secs(5),
        }
    }

    #[test]
    fn test_endpoint() {
        assert_eq!(
            client().endpoint(),
            "https://example.test/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn test_build_request_body_caps_tokens() {
        let body = client().build_request_body(&CompletionRequest::prompt("Plan a trip", 10_000));
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 2048);
        assert_eq!(body["contents"].as_array().map(Vec::len), Some(1));
        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Plan a trip");
        assert!(body.get("systemInstruction").is_none());
    }

    #[test]
    fn test_parse_response_joins_parts() {
        let raw = serde_json::json!({
            "candidates": [{
                "content": {"parts": [{"text": "#OVERVIEW\nHello "}, {"text": "world"}], "role": "model"},
                "finishReason": "STOP"
            }],
            "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 34}
        });
        let parsed = GeminiClient::parse_response(serde_json::from_value(raw).unwrap()).unwrap();

        assert_eq!(parsed.content.as_deref(), Some("#OVERVIEW\nHello world"));
        assert_eq!(parsed.stop_reason, StopReason::EndTurn);
        assert_eq!(parsed.usage.input_tokens, 12);
        assert_eq!(parsed.usage.output_tokens, 34);
    }

    #[test]
    fn test_parse_response_without_candidates_has_no_content() {
        let parsed = GeminiClient::parse_response(serde_json::from_value(serde_json::json!({})).unwrap()).unwrap();
        assert!(parsed.content.is_none());
    }

    #[test]
    fn test_parse_response_blocked_prompt_is_error() {
        let raw = serde_json::json!({"promptFeedback": {"blockReason": "SAFETY"}});
        let err = GeminiClient::parse_response(serde_json::from_value(raw).unwrap()).unwrap_err();
        assert!(err.to_string().contains("SAFETY"));
    }
}
