//! Market Feed Gateway Server
//!
//! Forwards market-data requests to the upstream broker API.

use anyhow::Context;
use market_feed_gateway::api::create_router;
use market_feed_gateway::api::docs;
use market_feed_gateway::config::{Config, Credentials};
use market_feed_gateway::state::AppState;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration: optional TOML file, then environment overrides
    let config = match std::env::var("CONFIG_PATH") {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            Config::load(&path).with_context(|| format!("loading {}", path))?
        }
        Err(_) => Config::default(),
    }
    .with_env_overrides()
    .context("applying environment overrides")?;

    let credentials = Credentials::from_env().context("loading upstream credentials")?;

    // Create application state
    let bind_addr = config.server.bind_addr();
    let state = Arc::new(AppState::new(&config, credentials)?);

    info!("Starting Market Feed Gateway on {}", bind_addr);
    info!("Swagger UI available at http://{}/swagger-ui/", bind_addr);

    // Configure CORS
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the router
    let app = create_router(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::openapi()))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    // Start the server
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
