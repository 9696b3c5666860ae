//! Request and response types for the gateway API.

use serde::{Deserialize, Serialize};

#[cfg(test)]
mod tests;

/// Inbound path for last traded price.
pub const LTP_PATH: &str = "/get-ltp";
/// Inbound path for OHLC snapshots.
pub const OHLC_PATH: &str = "/get-ohlc";
/// Inbound path for intraday candles.
pub const INTRADAY_PATH: &str = "/get-intraday";
/// Inbound path for option chains.
pub const OPTION_CHAIN_PATH: &str = "/get-option-chain";
/// Inbound path for symbol lookup.
pub const ID_BY_SYMBOL_PATH: &str = "/get-id-by-symbol";

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Server time at the IST offset.
    pub ts_ist: String,
}

/// Request to look up an instrument by trading symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdBySymbolRequest {
    /// Trading symbol.
    pub symbol: String,
    /// Upstream market segment.
    pub segment: String,
}

impl IdBySymbolRequest {
    /// Creates a new lookup request.
    #[must_use]
    pub fn new(symbol: impl Into<String>, segment: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            segment: segment.into(),
        }
    }
}

/// Error body returned by the gateway.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Error message.
    pub error: String,
    /// Error code.
    pub code: String,
    /// Upstream status, for relayed upstream errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    /// Upstream payload, for relayed upstream errors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

/// Status and raw body of a gateway answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body bytes, unmodified.
    pub body: Vec<u8>,
}

impl RawResponse {
    /// Whether the status is 2xx.
    #[must_use]
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Parses the body as JSON.
    ///
    /// # Errors
    /// Returns error if the body is not valid JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}
