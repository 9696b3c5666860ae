//! Route configuration.

use crate::api::handlers;
use crate::api::middleware::api_key_middleware;
use crate::route_table::{ROUTES, RouteKind};
use crate::state::AppState;
use axum::Router;
use axum::body::Bytes;
use axum::extract::State;
use axum::middleware;
use axum::routing::{MethodRouter, get, post};
use std::sync::Arc;

/// Creates the API router.
///
/// Forwarding routes are registered from the route table, one
/// registration per inbound path or alias.
pub fn create_router(state: Arc<AppState>) -> Router {
    let mut router: Router<Arc<AppState>> = Router::new()
        // Health check
        .route("/", get(handlers::root))
        .route("/health", get(handlers::health_check));

    // Forwarding
    for &route in ROUTES {
        let method_router: MethodRouter<Arc<AppState>> = match route.kind {
            RouteKind::Relay => post(move |State(state): State<Arc<AppState>>, body: Bytes| {
                handlers::relay(state, route, body)
            }),
            RouteKind::SymbolLookup => post(handlers::get_id_by_symbol),
        };
        for path in route.inbound_paths() {
            router = router.route(path, method_router.clone());
        }
    }

    router
        .fallback(handlers::fallback)
        .layer(middleware::from_fn_with_state(
            Arc::clone(&state),
            api_key_middleware,
        ))
        .with_state(state)
}
