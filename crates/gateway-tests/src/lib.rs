//! Integration test harness for the Market Feed Gateway.
//!
//! Each test starts the gateway in-process on an ephemeral port, pointed at a
//! `wiremock` server standing in for the upstream broker API.

use gateway_client::{ClientConfig, GatewayClient};
use market_feed_gateway::api::create_router;
use market_feed_gateway::config::{Config, Credentials};
use market_feed_gateway::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Access token the test gateway injects upstream.
pub const TEST_ACCESS_TOKEN: &str = "test-access-token";

/// Client id the test gateway injects upstream.
pub const TEST_CLIENT_ID: &str = "test-client-id";

/// Inbound paths of every relay route, with the upstream path each maps to.
pub const RELAY_ROUTES: &[(&str, &str)] = &[
    ("/get-ltp", "/marketfeed/ltp"),
    ("/get-ohlc", "/marketfeed/ohlc"),
    ("/get-intraday", "/charts/intraday"),
    ("/get-option-chain", "/optionchain"),
    ("/get-optionchain", "/optionchain"),
];

/// A gateway running in a background task. Stopped on drop.
pub struct TestGateway {
    /// Base URL of the running gateway.
    pub base_url: String,
    handle: JoinHandle<()>,
}

impl TestGateway {
    /// Creates a client for this gateway without an API key.
    #[must_use]
    pub fn client(&self) -> GatewayClient {
        self.client_with_key(None)
    }

    /// Creates a client for this gateway sending the given API key.
    #[must_use]
    pub fn client_with_key(&self, api_key: Option<&str>) -> GatewayClient {
        GatewayClient::new(ClientConfig {
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(10),
            api_key: api_key.map(str::to_string),
        })
        .expect("Failed to create client")
    }
}

impl Drop for TestGateway {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Gateway configuration pointed at the given upstream.
#[must_use]
pub fn gateway_config(upstream_base_url: &str) -> Config {
    let mut config = Config::default();
    config.server.host = "127.0.0.1".to_string();
    config.server.port = 0;
    config.upstream.base_url = upstream_base_url.to_string();
    config.upstream.timeout_secs = 5;
    config.upstream.connect_timeout_secs = 2;
    config
}

/// Starts a gateway with default test configuration.
pub async fn spawn_gateway(upstream_base_url: &str) -> TestGateway {
    spawn_gateway_with(gateway_config(upstream_base_url)).await
}

/// Starts a gateway with the given configuration.
pub async fn spawn_gateway_with(config: Config) -> TestGateway {
    let credentials =
        Credentials::new(TEST_ACCESS_TOKEN, TEST_CLIENT_ID).expect("Failed to build credentials");
    let state = Arc::new(AppState::new(&config, credentials).expect("Failed to build state"));
    let app = create_router(state);

    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind gateway listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    TestGateway {
        base_url: format!("http://{}", addr),
        handle,
    }
}

/// A local URL nothing listens on.
pub async fn unused_local_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Failed to read local addr");
    drop(listener);
    format!("http://{}", addr)
}
