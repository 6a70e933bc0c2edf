//! REST API layer: route handlers, DTOs, router composition and the
//! OpenAPI document.
//!
//! Resource endpoints are mounted under `/api`; `/health` sits at the root.

pub mod dto;
pub mod handlers;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI description of every endpoint.
#[derive(Debug, OpenApi)]
#[openapi(
    info(title = "sensor-gateway", description = "Weather station ingestion API"),
    paths(
        handlers::measurement::ingest_measurement,
        handlers::measurement::list_measurements,
        handlers::measurement::get_measurement,
        handlers::system::health_handler,
    ),
    components(schemas(
        dto::MeasurementRequest,
        dto::MeasurementDto,
        dto::MeasurementListResponse,
        dto::MeasurementDetailResponse,
        crate::error::StatusResponse,
        handlers::system::HealthResponse,
    )),
    tags(
        (name = "Mediciones", description = "Sensor measurement ingestion and history"),
        (name = "System", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    Router::new()
        .nest("/api", handlers::routes())
        .merge(handlers::system::routes())
}

/// Builds the served application: routes, API docs, tracing and CORS
/// layers, bound to the shared state.
pub fn build_app(state: AppState) -> Router {
    let router = build_router();

    #[cfg(feature = "swagger-ui")]
    let router = router.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()),
    );

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(
        OPENAPI_PATH,
        axum::routing::get(|| async { axum::Json(ApiDoc::openapi()) }),
    );

    router
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
