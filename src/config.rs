//! Configuration module for loading TOML configuration files and
//! environment overrides.

use serde::Deserialize;
use std::fmt;
use std::fs;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Environment variable holding the upstream access token.
pub const ACCESS_TOKEN_ENV: &str = "ACCESS_TOKEN";
/// Legacy environment variable for the access token.
pub const LEGACY_ACCESS_TOKEN_ENV: &str = "DHAN_ACCESS_TOKEN";
/// Environment variable holding the upstream client id.
pub const CLIENT_ID_ENV: &str = "API_KEY";
/// Legacy environment variable for the client id.
pub const LEGACY_CLIENT_ID_ENV: &str = "DHAN_CLIENT_ID";

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    /// Failed to parse TOML configuration.
    #[error("failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
    /// Invalid configuration value.
    #[error("invalid config value: {0}")]
    InvalidValue(String),
    /// A required credential is absent or blank.
    #[error("missing credential: set {0}")]
    MissingCredential(&'static str),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Upstream broker API configuration.
    pub upstream: UpstreamConfig,
    /// Inbound authentication configuration.
    pub auth: AuthConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port number to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 10000,
        }
    }
}

impl ServerConfig {
    /// Returns the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Upstream broker API configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Base URL every upstream path is joined onto.
    pub base_url: String,
    /// Total timeout for one upstream call, in seconds.
    pub timeout_secs: u64,
    /// Connect timeout for one upstream call, in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.dhan.co".to_string(),
            timeout_secs: 20,
            connect_timeout_secs: 5,
        }
    }
}

impl UpstreamConfig {
    /// Total upstream timeout.
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Upstream connect timeout.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Parses the base URL.
    ///
    /// # Errors
    /// Returns error if the URL is malformed or not http(s).
    pub fn parsed_base_url(&self) -> Result<Url, ConfigError> {
        let url = Url::parse(&self.base_url).map_err(|e| {
            ConfigError::InvalidValue(format!("upstream base_url {}: {}", self.base_url, e))
        })?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(ConfigError::InvalidValue(format!(
                "upstream base_url scheme must be http or https, got {}",
                other
            ))),
        }
    }
}

/// Inbound authentication configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Accepted `X-API-Key` values. Empty disables the check.
    pub api_keys: Vec<String>,
}

/// Upstream credentials injected into every forwarded request.
///
/// Both values are guaranteed non-empty.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    access_token: String,
    client_id: String,
}

impl Credentials {
    /// Creates credentials, rejecting blank values.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingCredential`] if either value is blank.
    pub fn new(
        access_token: impl Into<String>,
        client_id: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let access_token = access_token.into().trim().to_string();
        let client_id = client_id.into().trim().to_string();
        if access_token.is_empty() {
            return Err(ConfigError::MissingCredential(ACCESS_TOKEN_ENV));
        }
        if client_id.is_empty() {
            return Err(ConfigError::MissingCredential(CLIENT_ID_ENV));
        }
        Ok(Self {
            access_token,
            client_id,
        })
    }

    /// Loads credentials from the process environment.
    ///
    /// # Errors
    /// Returns error if either credential is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads credentials through a variable lookup function.
    ///
    /// # Errors
    /// Returns error if either credential is absent.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let first_set = |keys: &[&str]| {
            keys.iter()
                .filter_map(|key| lookup(key))
                .find(|value| !value.trim().is_empty())
        };
        let access_token = first_set(&[ACCESS_TOKEN_ENV, LEGACY_ACCESS_TOKEN_ENV])
            .ok_or(ConfigError::MissingCredential(ACCESS_TOKEN_ENV))?;
        let client_id = first_set(&[CLIENT_ID_ENV, LEGACY_CLIENT_ID_ENV])
            .ok_or(ConfigError::MissingCredential(CLIENT_ID_ENV))?;
        Self::new(access_token, client_id)
    }

    /// The `access-token` header value.
    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// The `client-id` header value.
    #[must_use]
    pub fn client_id(&self) -> &str {
        &self.client_id
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_token", &"<redacted>")
            .field("client_id", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Loads configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file.
    ///
    /// # Errors
    /// Returns error if file cannot be read or parsed.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    /// Returns error if content cannot be parsed.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Applies overrides from the process environment.
    ///
    /// # Errors
    /// Returns error if an override is malformed or the result is invalid.
    pub fn with_env_overrides(self) -> Result<Self, ConfigError> {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides read through a variable lookup function.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    /// Returns error if an override is malformed or the result is invalid.
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = parse_number("PORT", &port)?;
        }
        if let Some(base_url) = lookup("UPSTREAM_BASE_URL") {
            self.upstream.base_url = base_url;
        }
        if let Some(secs) = lookup("UPSTREAM_TIMEOUT_SECS") {
            self.upstream.timeout_secs = parse_number("UPSTREAM_TIMEOUT_SECS", &secs)?;
        }
        if let Some(secs) = lookup("UPSTREAM_CONNECT_TIMEOUT_SECS") {
            self.upstream.connect_timeout_secs =
                parse_number("UPSTREAM_CONNECT_TIMEOUT_SECS", &secs)?;
        }
        if let Some(keys) = lookup("GATEWAY_API_KEYS") {
            self.auth.api_keys = keys
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
        self.validate()?;
        Ok(self)
    }

    /// Validates the configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.is_empty() {
            return Err(ConfigError::InvalidValue(
                "server host cannot be empty".to_string(),
            ));
        }
        self.upstream.parsed_base_url()?;
        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "upstream timeout_secs must be positive".to_string(),
            ));
        }
        if self.upstream.connect_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "upstream connect_timeout_secs must be positive".to_string(),
            ));
        }
        if self.auth.api_keys.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::InvalidValue(
                "auth api_keys cannot contain blank keys".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_number<T: std::str::FromStr>(name: &str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue(format!("{} must be a valid number, got {}", name, raw)))
}
