//! Error types for the gateway API.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;


/// API error response body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
}

/// Error body relayed when the upstream answers with a non-success status.
#[derive(Debug, Serialize, ToSchema)]
pub struct UpstreamErrorResponse {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
    /// Status code returned by the upstream.
    pub status: u16,
    /// Upstream payload, parsed as JSON when possible.
    #[schema(value_type = Object)]
    pub details: Value,
}

/// API error types.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Invalid request.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Missing or unknown inbound API key.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// No instrument in the segment carries the requested symbol.
    #[error("Symbol not found: {symbol}")]
    SymbolNotFound {
        /// Requested trading symbol.
        symbol: String,
        /// Segment that was searched.
        segment: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Upstream answered with a non-success status.
    #[error("Upstream returned status {status}")]
    Upstream {
        /// Upstream status code.
        status: StatusCode,
        /// Raw upstream body.
        body: Vec<u8>,
    },

    /// Upstream could not be reached.
    #[error("Upstream unreachable: {0}")]
    UpstreamUnreachable(String),

    /// Upstream did not answer within the configured timeout.
    #[error("Upstream timed out: {0}")]
    UpstreamTimeout(String),

    /// Upstream answered with a body the gateway could not interpret.
    #[error("Invalid upstream response: {0}")]
    InvalidUpstreamResponse(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// Status code this error is answered with.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::SymbolNotFound { .. } | ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { status, .. } => *status,
            ApiError::UpstreamUnreachable(_) | ApiError::InvalidUpstreamResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
            ApiError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidRequest(_) => "INVALID_REQUEST",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::SymbolNotFound { .. } => "SYMBOL_NOT_FOUND",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Upstream { .. } => "UPSTREAM_ERROR",
            ApiError::UpstreamUnreachable(_) => "UPSTREAM_UNREACHABLE",
            ApiError::UpstreamTimeout(_) => "UPSTREAM_TIMEOUT",
            ApiError::InvalidUpstreamResponse(_) => "INVALID_UPSTREAM_RESPONSE",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

/// Interprets an upstream body as JSON, falling back to its text.
pub(crate) fn upstream_details(body: &[u8]) -> Value {
    serde_json::from_slice(body)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.code().to_string();

        match &self {
            ApiError::Upstream { status: upstream, body } => {
                let body = Json(UpstreamErrorResponse {
                    error: self.to_string(),
                    code,
                    status: upstream.as_u16(),
                    details: upstream_details(body),
                });
                (status, body).into_response()
            }
            _ => {
                let body = Json(ErrorResponse {
                    error: self.to_string(),
                    code,
                });
                (status, body).into_response()
            }
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::UpstreamTimeout(err.to_string())
        } else if err.is_builder() {
            ApiError::Internal(err.to_string())
        } else {
            ApiError::UpstreamUnreachable(err.to_string())
        }
    }
}
