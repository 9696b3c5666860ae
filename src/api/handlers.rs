//! API request handlers.

use crate::error::ApiError;
use crate::models::{HealthResponse, IdBySymbolRequest, InstrumentRecord};
use crate::route_table::{ID_BY_SYMBOL, RouteSpec};
use crate::state::AppState;
use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::{Uri, header};
use axum::response::{IntoResponse, Response};
use chrono::{FixedOffset, Utc};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;


/// Offset of India Standard Time from UTC, in seconds.
const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;

/// Text served on the root route.
pub const ROOT_MESSAGE: &str = "Market feed gateway is running";

/// Current time at the IST offset, RFC 3339.
fn now_ist() -> String {
    match FixedOffset::east_opt(IST_OFFSET_SECS) {
        Some(ist) => Utc::now().with_timezone(&ist).to_rfc3339(),
        None => Utc::now().to_rfc3339(),
    }
}

// ============================================================================
// Health Check
// ============================================================================

/// Liveness text on the root route.
pub async fn root() -> &'static str {
    ROOT_MESSAGE
}

/// Health check endpoint.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        ts_ist: now_ist(),
    })
}

// ============================================================================
// Forwarding
// ============================================================================

/// Forwards the inbound body to the route's upstream resource and relays the
/// answer verbatim.
///
/// # Errors
/// Returns the upstream status and payload on a non-success answer, or a
/// gateway error on transport failure.
pub async fn relay(
    state: Arc<AppState>,
    route: &'static RouteSpec,
    body: Bytes,
) -> Result<Response, ApiError> {
    let span = info_span!("relay", route = route.name, request_id = %Uuid::new_v4());

    async move {
        debug!(payload = %String::from_utf8_lossy(&body), "forwarding payload");
        let started = Instant::now();

        let upstream = state
            .upstream
            .send(route, &[], body)
            .await
            .inspect_err(|err| warn!(error = %err, "upstream call failed"))?;

        info!(
            status = upstream.status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "upstream answered"
        );
        debug!(body = %String::from_utf8_lossy(&upstream.body), "upstream payload");

        let upstream = upstream.error_for_status()?;
        Ok((
            upstream.status,
            [(header::CONTENT_TYPE, "application/json")],
            upstream.body,
        )
            .into_response())
    }
    .instrument(span)
    .await
}

// ============================================================================
// Symbol Lookup
// ============================================================================

/// Look up an instrument by trading symbol within a segment.
#[utoipa::path(
    post,
    path = "/get-id-by-symbol",
    request_body = IdBySymbolRequest,
    responses(
        (status = 200, description = "First instrument record with the requested symbol"),
        (status = 400, description = "Missing symbol or segment", body = crate::error::ErrorResponse),
        (status = 404, description = "Symbol not found in the segment", body = crate::error::ErrorResponse),
        (status = 502, description = "Upstream unreachable or answered with an unusable body", body = crate::error::ErrorResponse)
    ),
    tag = "Instruments"
)]
pub async fn get_id_by_symbol(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<IdBySymbolRequest>, JsonRejection>,
) -> Result<Json<InstrumentRecord>, ApiError> {
    let Json(request) = payload.map_err(|rejection| ApiError::InvalidRequest(rejection.body_text()))?;
    let (symbol, segment) = request.validated().map_err(ApiError::InvalidRequest)?;

    let span = info_span!(
        "lookup",
        route = ID_BY_SYMBOL.name,
        request_id = %Uuid::new_v4(),
        symbol,
        segment
    );

    async move {
        let upstream = state
            .upstream
            .send(&ID_BY_SYMBOL, &[segment], Bytes::new())
            .await
            .inspect_err(|err| warn!(error = %err, "instrument list fetch failed"))?
            .error_for_status()?;

        let records = parse_instrument_list(&upstream.body)?;
        info!(count = records.len(), "instrument list fetched");

        match find_instrument(records, symbol) {
            Some(record) => Ok(Json(record)),
            None => {
                info!("no instrument matches symbol");
                Err(ApiError::SymbolNotFound {
                    symbol: symbol.to_string(),
                    segment: segment.to_string(),
                })
            }
        }
    }
    .instrument(span)
    .await
}

/// Parses the upstream instrument list: a JSON array, or an object whose
/// `data` field is one.
pub(crate) fn parse_instrument_list(body: &[u8]) -> Result<Vec<InstrumentRecord>, ApiError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| ApiError::InvalidUpstreamResponse(format!("instrument list is not JSON: {}", e)))?;

    let list = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("data") {
            Some(Value::Array(items)) => items,
            _ => {
                return Err(ApiError::InvalidUpstreamResponse(
                    "instrument list object has no data array".to_string(),
                ));
            }
        },
        _ => {
            return Err(ApiError::InvalidUpstreamResponse(
                "instrument list is not an array".to_string(),
            ));
        }
    };

    Ok(list.into_iter().map(InstrumentRecord).collect())
}

/// First record whose trading symbol equals `symbol`.
pub(crate) fn find_instrument(
    records: Vec<InstrumentRecord>,
    symbol: &str,
) -> Option<InstrumentRecord> {
    records
        .into_iter()
        .find(|record| record.trading_symbol() == Some(symbol))
}

// ============================================================================
// Fallback
// ============================================================================

/// Answers unknown paths.
pub async fn fallback(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}
