//! Unit tests for types module.

use super::*;
use serde_json::json;

#[test]
fn test_id_by_symbol_request_serialization() {
    let request = IdBySymbolRequest::new("TCS", "NSE_EQ");

    let json = serde_json::to_value(&request).unwrap();
    assert_eq!(json, json!({"symbol": "TCS", "segment": "NSE_EQ"}));
}

#[test]
fn test_health_response_deserialization() {
    let health: HealthResponse = serde_json::from_value(json!({
        "status": "ok",
        "version": "0.1.0",
        "ts_ist": "2025-01-01T09:15:00+05:30"
    }))
    .unwrap();

    assert_eq!(health.status, "ok");
    assert_eq!(health.version, "0.1.0");
}

#[test]
fn test_error_body_plain() {
    let body: ErrorBody = serde_json::from_value(json!({
        "error": "Symbol not found: INFY",
        "code": "SYMBOL_NOT_FOUND"
    }))
    .unwrap();

    assert_eq!(body.code, "SYMBOL_NOT_FOUND");
    assert!(body.status.is_none());
    assert!(body.details.is_none());
}

#[test]
fn test_error_body_upstream() {
    let body: ErrorBody = serde_json::from_value(json!({
        "error": "Upstream returned status 404 Not Found",
        "code": "UPSTREAM_ERROR",
        "status": 404,
        "details": {"errorCode": "DH-905"}
    }))
    .unwrap();

    assert_eq!(body.status, Some(404));
    assert_eq!(body.details, Some(json!({"errorCode": "DH-905"})));
}

#[test]
fn test_raw_response_success() {
    let raw = RawResponse {
        status: 200,
        body: br#"{"data":{}}"#.to_vec(),
    };

    assert!(raw.is_success());
    let value: serde_json::Value = raw.json().unwrap();
    assert_eq!(value, json!({"data": {}}));
}

#[test]
fn test_raw_response_failure() {
    let raw = RawResponse {
        status: 502,
        body: Vec::new(),
    };

    assert!(!raw.is_success());
    assert!(raw.json::<serde_json::Value>().is_err());
}

#[test]
fn test_path_constants() {
    assert_eq!(LTP_PATH, "/get-ltp");
    assert_eq!(OPTION_CHAIN_PATH, "/get-option-chain");
    assert_eq!(ID_BY_SYMBOL_PATH, "/get-id-by-symbol");
}
