//! # Market Feed Gateway
//!
//! An authenticated forwarding gateway in front of a broker's market-data
//! REST API. Every inbound route maps to exactly one upstream resource; the
//! gateway injects the `access-token` and `client-id` headers the upstream
//! requires, forwards the JSON body unchanged, and relays the answer.
//! Built with [Axum](https://crates.io/crates/axum) and
//! [reqwest](https://crates.io/crates/reqwest).
//!
//! ## Key Features
//!
//! - **Declarative Route Table**: inbound paths, upstream paths and methods
//!   live in one immutable table ([`route_table::ROUTES`]) consumed by a
//!   single generic forwarding handler.
//!
//! - **Verbatim Relay**: upstream success bodies are returned byte-for-byte
//!   with the upstream status code.
//!
//! - **Unified Error Policy**: upstream error statuses are propagated with
//!   their payload; transport failures answer 502, timeouts 504.
//!
//! - **Symbol Lookup**: fetches a segment's instrument list and returns the
//!   first record whose trading symbol matches.
//!
//! - **Optional Inbound Keys**: `X-API-Key` checking when keys are configured.
//!
//! - **OpenAPI Documentation**: Swagger UI at `/swagger-ui/`.
//!
//! ## Route Table
//!
//! | Method | Endpoint | Upstream |
//! |--------|----------|----------|
//! | POST | `/get-ltp` | POST `marketfeed/ltp` |
//! | POST | `/get-ohlc` | POST `marketfeed/ohlc` |
//! | POST | `/get-intraday` | POST `charts/intraday` |
//! | POST | `/get-option-chain`, `/get-optionchain` | POST `optionchain` |
//! | POST | `/get-id-by-symbol` | GET `instrument/{segment}` |
//! | GET | `/` | liveness text |
//! | GET | `/health` | health JSON |
//!
//! ## Module Structure
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`api`] | Route handlers, middleware, router and OpenAPI document |
//! | [`auth`] | Inbound API key guard |
//! | [`config`] | TOML configuration, environment overrides, credentials |
//! | [`error`] | API error types with `IntoResponse` implementation |
//! | [`models`] | Request/response DTOs with OpenAPI schemas |
//! | [`route_table`] | Inbound to upstream route mapping |
//! | [`state`] | Application state |
//! | [`upstream`] | Authenticated upstream HTTP client |
//!
//! ## Example Usage
//!
//! ```bash
//! # Credentials are read from the environment only
//! ACCESS_TOKEN=... API_KEY=... cargo run
//!
//! # Custom port and upstream
//! PORT=3000 UPSTREAM_BASE_URL=https://sandbox.dhan.co cargo run
//!
//! # Last traded price
//! curl -X POST http://localhost:10000/get-ltp \
//!   -H "Content-Type: application/json" \
//!   -d '{"NSE_EQ": [11536]}'
//!
//! # Security id by symbol
//! curl -X POST http://localhost:10000/get-id-by-symbol \
//!   -H "Content-Type: application/json" \
//!   -d '{"symbol": "TCS", "segment": "NSE_EQ"}'
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod route_table;
pub mod state;
pub mod upstream;
