//! API middleware for inbound authentication.

use crate::error::ApiError;
use crate::state::AppState;
use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::warn;

/// Header name for API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Paths served without an API key.
const PUBLIC_PATHS: &[&str] = &["/", "/health", "/swagger-ui", "/api-docs"];

/// Path prefixes served without an API key.
const PUBLIC_PREFIXES: &[&str] = &["/swagger-ui/", "/api-docs/"];

/// API key middleware.
///
/// Rejects requests with 401 Unauthorized when keys are configured and the
/// `X-API-Key` header is missing or unknown. Health and docs routes are exempt.
pub async fn api_key_middleware(
    State(state): State<Arc<AppState>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let path = request.uri().path();

    if is_public(path) || !state.api_keys.is_enabled() {
        return next.run(request).await;
    }

    let presented = request
        .headers()
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok());

    if !state.api_keys.is_allowed(presented) {
        warn!(path, key_present = presented.is_some(), "rejected inbound api key");
        let reason = if presented.is_some() {
            "invalid X-API-Key"
        } else {
            "missing X-API-Key"
        };
        return ApiError::Unauthorized(reason.to_string()).into_response();
    }

    next.run(request).await
}

/// Whether a path bypasses the API key check.
fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path) || PUBLIC_PREFIXES.iter().any(|prefix| path.starts_with(prefix))
}
