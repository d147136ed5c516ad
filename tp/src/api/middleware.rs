//! Request middleware: permissive CORS and per-caller rate limiting

use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, Method, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::debug;

use super::AppState;
use super::error::ApiError;
use crate::ratelimit::Decision;

const ANONYMOUS_CALLER: &str = "anonymous";

/// Allow any origin, method and header; answer preflights directly
pub async fn cors(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        debug!(uri = %request.uri(), "cors: preflight");
        let mut response = Response::new(Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        add_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    add_cors_headers(response.headers_mut());
    response
}

fn add_cors_headers(headers: &mut HeaderMap) {
    let any = HeaderValue::from_static("*");
    headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, any.clone());
    headers.insert(header::ACCESS_CONTROL_ALLOW_HEADERS, any);
}

/// Reject callers whose token bucket is empty
pub async fn rate_limit(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(limiter) = &state.limiter else {
        return next.run(request).await;
    };

    let caller = caller_id(&request);
    match limiter.check(&caller) {
        Decision::Allowed => next.run(request).await,
        Decision::Limited { retry_after } => {
            debug!(%caller, ?retry_after, "rate_limit: rejected");
            ApiError::RateLimited { retry_after }.into_response()
        }
    }
}

/// Peer IP, else the first `X-Forwarded-For` hop, else a shared bucket
fn caller_id(request: &Request) -> String {
    if let Some(ConnectInfo(addr)) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return addr.ip().to_string();
    }
    request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| ANONYMOUS_CALLER.to_string())
}
