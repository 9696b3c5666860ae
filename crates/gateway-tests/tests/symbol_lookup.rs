//! Integration tests for the symbol to security-id lookup.

use gateway_client::Error;
use gateway_tests::{TEST_ACCESS_TOKEN, TEST_CLIENT_ID, spawn_gateway};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn instrument_list() -> Value {
    json!([
        {"tradingSymbol": "SBIN", "securityId": "3045", "exchangeSegment": "NSE_EQ"},
        {"tradingSymbol": "TCS", "securityId": "11536", "exchangeSegment": "NSE_EQ"},
        {"tradingSymbol": "TCS", "securityId": "99999", "exchangeSegment": "NSE_EQ"}
    ])
}

async fn upstream_with_instruments(body: Value) -> MockServer {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instrument/NSE_EQ"))
        .and(header("access-token", TEST_ACCESS_TOKEN))
        .and(header("client-id", TEST_CLIENT_ID))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&upstream)
        .await;
    upstream
}

#[tokio::test]
async fn test_lookup_returns_first_match() {
    let upstream = upstream_with_instruments(instrument_list()).await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let record = gateway
        .client()
        .get_id_by_symbol("TCS", "NSE_EQ")
        .await
        .expect("lookup failed");

    assert_eq!(record["securityId"], "11536");
}

#[tokio::test]
async fn test_lookup_accepts_data_envelope() {
    let upstream = upstream_with_instruments(json!({"data": instrument_list()})).await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let record = gateway
        .client()
        .get_id_by_symbol("SBIN", "NSE_EQ")
        .await
        .expect("lookup failed");

    assert_eq!(record["securityId"], "3045");
}

#[tokio::test]
async fn test_lookup_unknown_symbol_is_404() {
    let upstream = upstream_with_instruments(instrument_list()).await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let raw = gateway
        .client()
        .post_raw(
            "/get-id-by-symbol",
            &json!({"symbol": "INFY", "segment": "NSE_EQ"}),
        )
        .await
        .expect("request failed");

    assert_eq!(raw.status, 404);
    let body: Value = raw.json().expect("body is not JSON");
    assert_eq!(body["code"], "SYMBOL_NOT_FOUND");
    assert!(body["error"].as_str().unwrap().contains("Symbol not found"));
}

#[tokio::test]
async fn test_lookup_missing_field_is_400() {
    let upstream = MockServer::start().await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let result = gateway
        .client()
        .post_raw("/get-id-by-symbol", &json!({"symbol": "TCS"}))
        .await
        .expect("request failed");

    assert_eq!(result.status, 400);
    let requests = upstream.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_lookup_blank_symbol_is_invalid_request() {
    let upstream = MockServer::start().await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let result = gateway.client().get_id_by_symbol("  ", "NSE_EQ").await;

    assert!(matches!(result, Err(Error::InvalidRequest(_))));
}

#[tokio::test]
async fn test_lookup_propagates_upstream_error() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instrument/BSE_EQ"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"errorCode": "DH-901"})))
        .mount(&upstream)
        .await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let result = gateway.client().get_id_by_symbol("TCS", "BSE_EQ").await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 401);
            assert!(message.contains("DH-901"));
        }
        other => panic!("expected upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_lookup_unparseable_list_is_502() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/instrument/NSE_EQ"))
        .respond_with(ResponseTemplate::new(200).set_body_string("SEM_SMST_SECURITY_ID,SEM_TRADING_SYMBOL"))
        .mount(&upstream)
        .await;
    let gateway = spawn_gateway(&upstream.uri()).await;

    let raw = gateway
        .client()
        .post_raw(
            "/get-id-by-symbol",
            &json!({"symbol": "TCS", "segment": "NSE_EQ"}),
        )
        .await
        .expect("request failed");

    assert_eq!(raw.status, 502);
}
