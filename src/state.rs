//! Application state management.

use crate::auth::ApiKeyGuard;
use crate::config::{Config, ConfigError, Credentials};
use crate::upstream::UpstreamClient;
use tracing::info;

/// Application state shared across all handlers.
///
/// Read-only after construction.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Authenticated upstream client.
    pub upstream: UpstreamClient,
    /// Inbound API key guard.
    pub api_keys: ApiKeyGuard,
}

impl AppState {
    /// Creates the application state from configuration and credentials.
    ///
    /// # Errors
    /// Returns error if the upstream client cannot be built.
    pub fn new(config: &Config, credentials: Credentials) -> Result<Self, ConfigError> {
        let upstream = UpstreamClient::new(&config.upstream, credentials)?;
        let api_keys = ApiKeyGuard::new(&config.auth.api_keys);

        info!(
            upstream = %upstream.base_url(),
            timeout_secs = config.upstream.timeout_secs,
            inbound_keys = api_keys.len(),
            "Gateway state initialized"
        );

        Ok(Self { upstream, api_keys })
    }
}
