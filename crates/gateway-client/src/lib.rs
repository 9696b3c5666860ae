//! HTTP client library for the Market Feed Gateway API.
//!
//! This crate provides a typed HTTP client for the gateway's forwarding
//! routes. Market-data payloads are passed as `serde_json::Value` because the
//! gateway relays them without a schema.
//!
//! # Example
//!
//! ```no_run
//! use gateway_client::{ClientConfig, GatewayClient};
//! use serde_json::json;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), gateway_client::Error> {
//!     let client = GatewayClient::new(ClientConfig {
//!         base_url: "http://localhost:10000".into(),
//!         timeout: Duration::from_secs(30),
//!         api_key: None,
//!     })?;
//!
//!     let health = client.health_check().await?;
//!     println!("Status: {}", health.status);
//!
//!     let ltp = client.get_ltp(&json!({"NSE_EQ": [11536]})).await?;
//!     println!("{}", ltp);
//!
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{ClientConfig, GatewayClient};
pub use error::Error;
pub use types::*;
