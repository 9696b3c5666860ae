//! Request and response models for the REST API.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Field names the upstream uses for an instrument's trading symbol.
pub const TRADING_SYMBOL_FIELDS: &[&str] = &["tradingSymbol", "trading_symbol"];

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status.
    pub status: String,
    /// Service version.
    pub version: String,
    /// Current time at the IST offset, RFC 3339.
    pub ts_ist: String,
}

/// Request to look up an instrument by trading symbol.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IdBySymbolRequest {
    /// Trading symbol, matched exactly (e.g. "TCS").
    pub symbol: String,
    /// Upstream market segment (e.g. "NSE_EQ").
    pub segment: String,
}

impl IdBySymbolRequest {
    /// Returns the trimmed symbol and segment, rejecting blank or
    /// path-traversing values.
    ///
    /// # Errors
    /// Returns a description of the offending field.
    pub fn validated(&self) -> Result<(&str, &str), String> {
        let symbol = self.symbol.trim();
        let segment = self.segment.trim();
        if symbol.is_empty() {
            return Err("symbol is required".to_string());
        }
        if segment.is_empty() {
            return Err("segment is required".to_string());
        }
        if segment == "." || segment == ".." {
            return Err(format!("invalid segment: {}", segment));
        }
        Ok((symbol, segment))
    }
}

/// Instrument record as supplied by the upstream; only the symbol field is
/// interpreted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentRecord(pub serde_json::Value);

impl InstrumentRecord {
    /// The record's trading symbol, if present.
    #[must_use]
    pub fn trading_symbol(&self) -> Option<&str> {
        TRADING_SYMBOL_FIELDS
            .iter()
            .find_map(|field| self.0.get(*field))
            .and_then(serde_json::Value::as_str)
    }
}
