//! HTTP client for the gateway API.

use crate::error::Error;
use crate::types::*;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use url::Url;


/// Header carrying the inbound API key.
const API_KEY_HEADER: &str = "X-API-Key";

/// Client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the gateway (e.g., "http://localhost:10000").
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Inbound API key, sent as `X-API-Key` when set.
    pub api_key: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:10000".to_string(),
            timeout: Duration::from_secs(30),
            api_key: None,
        }
    }
}

/// HTTP client for the Market Feed Gateway API.
#[derive(Debug, Clone)]
pub struct GatewayClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl GatewayClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        Url::parse(&config.base_url)?;
        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key,
        })
    }

    /// Creates a new client with default configuration.
    ///
    /// # Errors
    /// Returns error if the HTTP client cannot be built.
    pub fn with_base_url(base_url: &str) -> Result<Self, Error> {
        Self::new(ClientConfig {
            base_url: base_url.to_string(),
            ..Default::default()
        })
    }

    /// Returns the gateway base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Performs a health check.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn health_check(&self) -> Result<HealthResponse, Error> {
        let resp = self.request(reqwest::Method::GET, "/health").send().await?;
        self.handle_response(resp).await
    }

    /// Fetches the liveness text served on `/`.
    ///
    /// # Errors
    /// Returns error if the request fails.
    pub async fn liveness(&self) -> Result<String, Error> {
        let resp = self.request(reqwest::Method::GET, "/").send().await?;
        let status = resp.status();
        let text = resp.text().await?;
        if status.is_success() {
            Ok(text)
        } else {
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }

    // ========================================================================
    // Market Data
    // ========================================================================

    /// Gets last traded prices for a segment to security-id map.
    ///
    /// # Errors
    /// Returns error if the request fails or the gateway answers non-2xx.
    pub async fn get_ltp(&self, body: &Value) -> Result<Value, Error> {
        self.post_json(LTP_PATH, body).await
    }

    /// Gets OHLC snapshots for a segment to security-id map.
    ///
    /// # Errors
    /// Returns error if the request fails or the gateway answers non-2xx.
    pub async fn get_ohlc(&self, body: &Value) -> Result<Value, Error> {
        self.post_json(OHLC_PATH, body).await
    }

    /// Gets intraday candles.
    ///
    /// # Errors
    /// Returns error if the request fails or the gateway answers non-2xx.
    pub async fn get_intraday(&self, body: &Value) -> Result<Value, Error> {
        self.post_json(INTRADAY_PATH, body).await
    }

    /// Gets an option chain.
    ///
    /// # Errors
    /// Returns error if the request fails or the gateway answers non-2xx.
    pub async fn get_option_chain(&self, body: &Value) -> Result<Value, Error> {
        self.post_json(OPTION_CHAIN_PATH, body).await
    }

    // ========================================================================
    // Instruments
    // ========================================================================

    /// Looks up the instrument record for a trading symbol within a segment.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no instrument matches.
    pub async fn get_id_by_symbol(&self, symbol: &str, segment: &str) -> Result<Value, Error> {
        let request = IdBySymbolRequest::new(symbol, segment);
        let resp = self
            .request(reqwest::Method::POST, ID_BY_SYMBOL_PATH)
            .json(&request)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    // ========================================================================
    // Raw Access
    // ========================================================================

    /// Posts a JSON body to any gateway path and returns the status and the
    /// unmodified body, whatever the status.
    ///
    /// # Errors
    /// Returns error only on transport failure.
    pub async fn post_raw(&self, path: &str, body: &Value) -> Result<RawResponse, Error> {
        let resp = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        let status = resp.status().as_u16();
        let body = resp.bytes().await?.to_vec();
        Ok(RawResponse { status, body })
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.client.request(method, self.url(path));
        match &self.api_key {
            Some(key) => builder.header(API_KEY_HEADER, key),
            None => builder,
        }
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value, Error> {
        let resp = self
            .request(reqwest::Method::POST, path)
            .json(body)
            .send()
            .await?;
        self.handle_response(resp).await
    }

    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        resp: reqwest::Response,
    ) -> Result<T, Error> {
        let status = resp.status();

        if status.is_success() {
            Ok(resp.json().await?)
        } else if status.as_u16() == 404 {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::NotFound(text))
        } else if status.as_u16() == 400 {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::InvalidRequest(text))
        } else {
            let text = resp.text().await.unwrap_or_default();
            Err(Error::Api {
                status: status.as_u16(),
                message: text,
            })
        }
    }
}
