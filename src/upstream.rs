//! HTTP client for the upstream broker API.
//!
//! Every call carries the `access-token` and `client-id` headers from
//! [`Credentials`]. Non-success answers are returned as data, not errors;
//! callers decide how to relay them.

use crate::config::{ConfigError, Credentials, UpstreamConfig};
use crate::error::ApiError;
use crate::route_table::RouteSpec;
use axum::body::Bytes;
use axum::http::{Method, StatusCode, header};
use reqwest::Client;
use tracing::debug;
use url::Url;


/// Header carrying the upstream access token.
pub const ACCESS_TOKEN_HEADER: &str = "access-token";

/// Header carrying the upstream client id.
pub const CLIENT_ID_HEADER: &str = "client-id";

/// Status and body of an upstream answer.
#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    /// Upstream status code.
    pub status: StatusCode,
    /// Raw upstream body.
    pub body: Bytes,
}

impl UpstreamResponse {
    /// Converts a non-success answer into [`ApiError::Upstream`].
    ///
    /// # Errors
    /// Returns the upstream error when the status is not 2xx.
    pub fn error_for_status(self) -> Result<Self, ApiError> {
        if self.status.is_success() {
            Ok(self)
        } else {
            Err(ApiError::Upstream {
                status: self.status,
                body: self.body.to_vec(),
            })
        }
    }
}

/// Authenticated client for the upstream broker API.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl UpstreamClient {
    /// Creates a new client.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &UpstreamConfig, credentials: Credentials) -> Result<Self, ConfigError> {
        let base_url = config.parsed_base_url()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .connect_timeout(config.connect_timeout())
            .build()
            .map_err(|e| ConfigError::InvalidValue(format!("http client: {}", e)))?;

        Ok(Self {
            client,
            base_url,
            credentials,
        })
    }

    /// Base URL upstream paths are joined onto.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the absolute URL for an upstream path.
    ///
    /// `segments` are appended percent-encoded, one path segment each.
    ///
    /// # Errors
    /// Returns error if the base URL cannot carry a path.
    pub fn url_for(&self, upstream_path: &str, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| {
                ApiError::Internal(format!("base url {} cannot be a base", self.base_url))
            })?;
            path.pop_if_empty();
            path.extend(upstream_path.split('/').filter(|s| !s.is_empty()));
            path.extend(segments);
        }
        Ok(url)
    }

    /// Sends one request upstream for a route.
    ///
    /// The body is only attached for methods other than GET.
    ///
    /// # Errors
    /// Returns [`ApiError::UpstreamUnreachable`] or [`ApiError::UpstreamTimeout`]
    /// on transport failure.
    pub async fn send(
        &self,
        route: &RouteSpec,
        segments: &[&str],
        body: Bytes,
    ) -> Result<UpstreamResponse, ApiError> {
        let url = self.url_for(route.upstream_path, segments)?;
        self.execute(route.upstream_method.clone(), url, body).await
    }

    async fn execute(
        &self,
        method: Method,
        url: Url,
        body: Bytes,
    ) -> Result<UpstreamResponse, ApiError> {
        debug!(%method, %url, "sending upstream request");

        let mut request = self
            .client
            .request(method.clone(), url)
            .header(ACCESS_TOKEN_HEADER, self.credentials.access_token())
            .header(CLIENT_ID_HEADER, self.credentials.client_id())
            .header(header::ACCEPT, "application/json");

        if method != Method::GET {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let resp = request.send().await?;
        let status = resp.status();
        let body = resp.bytes().await?;

        Ok(UpstreamResponse { status, body })
    }
}
