//! HTTP client for a running trip planner server
//!
//! Used by `tp plan` and `tp health`.

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

mod render;

pub use render::{render_health, render_plan};

use crate::domain::{TripRequestBody, TripResponse};

/// Narrative generation can take a while; leave headroom above the server's LLM timeout
const PLAN_TIMEOUT: Duration = Duration::from_secs(180);

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Could not reach trip planner server: {0}")]
    Network(#[from] reqwest::Error),

    /// Server answered with an error status and a `detail` message
    #[error("Server returned {status}: {detail}")]
    Rejected { status: StatusCode, detail: String },

    #[error("Invalid response from server: {0}")]
    InvalidResponse(String),
}

pub struct PlannerClient {
    http: Client,
    base_url: String,
}

impl PlannerClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        debug!(%base_url, "PlannerClient::new: called");
        let http = Client::builder().timeout(PLAN_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a trip request and return the merged plan
    pub async fn plan(&self, body: &TripRequestBody) -> Result<TripResponse, ClientError> {
        debug!(destination = ?body.destination, "PlannerClient::plan: called");
        let response = self
            .http
            .post(format!("{}/api/plan-trip", self.base_url))
            .json(body)
            .send()
            .await?;
        let value = Self::read_json(response).await?;
        serde_json::from_value(value).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// Fetch the diagnostics report
    ///
    /// A 500 from `/health` still carries a report, so it is returned rather
    /// than treated as an error.
    pub async fn health(&self) -> Result<Value, ClientError> {
        debug!("PlannerClient::health: called");
        let response = self.http.get(format!("{}/health", self.base_url)).send().await?;
        if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
            return response
                .json::<Value>()
                .await
                .map_err(|e| ClientError::InvalidResponse(e.to_string()));
        }
        Self::read_json(response).await
    }

    async fn read_json(response: reqwest::Response) -> Result<Value, ClientError> {
        let status = response.status();
        let value: Value = response
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;

        if status.is_success() {
            return Ok(value);
        }
        debug!(%status, "PlannerClient::read_json: error status");
        Err(ClientError::Rejected {
            status,
            detail: error_detail(&value),
        })
    }
}

/// The `detail` of an error body, with the field name when one is given
fn error_detail(value: &Value) -> String {
    let detail = match value.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
        None => value.to_string(),
    };
    match value.get("field").and_then(Value::as_str) {
        Some(field) if !detail.starts_with(field) => format!("{} ({})", detail, field),
        _ => detail,
    }
}
