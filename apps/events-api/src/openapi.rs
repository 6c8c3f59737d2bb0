//! OpenAPI documentation configuration

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Events API",
        version = "0.1.0",
        description = "MongoDB-backed REST API for managing events"
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server")
    ),
    paths(
        axum_helpers::server::health::health_handler,
        crate::api::health::readiness_check
    ),
    components(schemas(axum_helpers::HealthResponse)),
    tags(
        (name = "Events", description = "Event management endpoints (MongoDB)"),
        (name = "Health", description = "Liveness and readiness probes")
    )
)]
struct BaseDoc;

/// Combined OpenAPI documentation for all APIs
///
/// Domain paths are already absolute, so their documents are merged rather
/// than nested under a prefix.
pub struct ApiDoc;

impl OpenApi for ApiDoc {
    fn openapi() -> utoipa::openapi::OpenApi {
        let mut doc = BaseDoc::openapi();
        doc.merge(domain_events::ApiDoc::openapi());
        doc
    }
}
