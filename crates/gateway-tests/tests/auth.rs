//! Inbound API key checks.

use gateway_tests::{gateway_config, spawn_gateway_with};
use serde_json::{Value, json};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const KEY: &str = "inbound-secret";

async fn guarded_gateway(upstream: &MockServer) -> gateway_tests::TestGateway {
    let mut config = gateway_config(&upstream.uri());
    config.auth.api_keys = vec![KEY.to_string()];
    spawn_gateway_with(config).await
}

#[tokio::test]
async fn test_missing_key_is_rejected() {
    let upstream = MockServer::start().await;
    let gateway = guarded_gateway(&upstream).await;

    let raw = gateway
        .client()
        .post_raw("/get-ltp", &json!({"NSE_EQ": [11536]}))
        .await
        .expect("request failed");

    assert_eq!(raw.status, 401);
    let body: Value = raw.json().expect("body is not JSON");
    assert_eq!(body["code"], "UNAUTHORIZED");
    let requests = upstream.received_requests().await.expect("recording enabled");
    assert!(requests.is_empty());
}

#[tokio::test]
async fn test_wrong_key_is_rejected() {
    let upstream = MockServer::start().await;
    let gateway = guarded_gateway(&upstream).await;

    let raw = gateway
        .client_with_key(Some("other"))
        .post_raw("/get-ltp", &json!({}))
        .await
        .expect("request failed");

    assert_eq!(raw.status, 401);
}

#[tokio::test]
async fn test_valid_key_is_forwarded() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/marketfeed/ltp"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "success"})))
        .expect(1)
        .mount(&upstream)
        .await;
    let gateway = guarded_gateway(&upstream).await;

    let value = gateway
        .client_with_key(Some(KEY))
        .get_ltp(&json!({"NSE_EQ": [11536]}))
        .await
        .expect("request failed");

    assert_eq!(value["status"], "success");
}

#[tokio::test]
async fn test_health_is_public() {
    let upstream = MockServer::start().await;
    let gateway = guarded_gateway(&upstream).await;

    let health = gateway.client().health_check().await;

    assert!(health.is_ok());
}

#[tokio::test]
async fn test_health_lookalike_paths_need_key() {
    let upstream = MockServer::start().await;
    let gateway = guarded_gateway(&upstream).await;

    for lookalike in ["/healthz", "/health-anything", "/api-docsX"] {
        let raw = gateway
            .client()
            .post_raw(lookalike, &json!({}))
            .await
            .expect("request failed");

        assert_eq!(raw.status, 401, "path {lookalike}");
    }
}
