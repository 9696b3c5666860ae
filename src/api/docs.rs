//! OpenAPI documentation.

use crate::error::{ErrorResponse, UpstreamErrorResponse};
use crate::models::{HealthResponse, IdBySymbolRequest};
use crate::route_table::{ROUTES, RouteKind, RouteSpec};
use utoipa::OpenApi;
use utoipa::openapi::path::{HttpMethod, Operation, OperationBuilder, PathItem};
use utoipa::openapi::request_body::RequestBodyBuilder;
use utoipa::openapi::{ContentBuilder, Ref, ResponseBuilder};

/// Tag for the table-driven forwarding routes.
const MARKET_DATA_TAG: &str = "Market Data";

/// Statically annotated part of the API document.
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health_check,
        crate::api::handlers::get_id_by_symbol,
    ),
    components(
        schemas(
            HealthResponse,
            IdBySymbolRequest,
            ErrorResponse,
            UpstreamErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check endpoints"),
        (name = "Market Data", description = "Requests forwarded verbatim to the upstream broker API"),
        (name = "Instruments", description = "Instrument lookup"),
    ),
    info(
        title = "Market Feed Gateway API",
        description = "Authenticated forwarding gateway for broker market-data APIs",
        license(name = "MIT"),
    )
)]
pub struct ApiDoc;

/// Builds the full API document, including every relay route of the table.
#[must_use]
pub fn openapi() -> utoipa::openapi::OpenApi {
    let mut doc = ApiDoc::openapi();
    for &route in ROUTES.iter().filter(|r| r.kind == RouteKind::Relay) {
        for path in route.inbound_paths() {
            doc.paths.paths.insert(
                path.to_string(),
                PathItem::new(HttpMethod::Post, relay_operation(route, path)),
            );
        }
    }
    doc
}

fn relay_operation(route: &RouteSpec, path: &str) -> Operation {
    let error_body = || {
        ContentBuilder::new()
            .schema(Some(Ref::from_schema_name("ErrorResponse")))
            .build()
    };

    let operation_id = if path == route.path {
        route.name.to_string()
    } else {
        format!("{}_legacy", route.name)
    };

    OperationBuilder::new()
        .operation_id(Some(operation_id))
        .summary(Some(route.summary))
        .description(Some(format!(
            "Forwards the JSON body to upstream `{}` and relays the answer verbatim.",
            route.upstream_path
        )))
        .tag(MARKET_DATA_TAG)
        .request_body(Some(
            RequestBodyBuilder::new()
                .content("application/json", ContentBuilder::new().build())
                .build(),
        ))
        .response(
            "200",
            ResponseBuilder::new()
                .description("Upstream payload, relayed verbatim")
                .build(),
        )
        .response(
            "4XX",
            ResponseBuilder::new()
                .description("Upstream error status, propagated with its payload")
                .content(
                    "application/json",
                    ContentBuilder::new()
                        .schema(Some(Ref::from_schema_name("UpstreamErrorResponse")))
                        .build(),
                )
                .build(),
        )
        .response(
            "502",
            ResponseBuilder::new()
                .description("Upstream unreachable")
                .content("application/json", error_body())
                .build(),
        )
        .response(
            "504",
            ResponseBuilder::new()
                .description("Upstream timed out")
                .content("application/json", error_body())
                .build(),
        )
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_every_inbound_path() {
        let doc = openapi();
        for route in ROUTES {
            for path in route.inbound_paths() {
                assert!(doc.paths.paths.contains_key(path), "missing {}", path);
            }
        }
        assert!(doc.paths.paths.contains_key("/health"));
    }

    #[test]
    fn test_openapi_serializes() {
        let json = openapi().to_json().expect("document serializes");
        assert!(json.contains("/get-ltp"));
        assert!(json.contains("marketfeed/ltp"));
        assert!(json.contains("UpstreamErrorResponse"));
    }
}
