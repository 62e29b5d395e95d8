// Processed events API library
// Decision: Shared library for binaries (API server, OpenAPI export) and router tests

// API routes and types (shared for OpenAPI generation)
pub mod api;

// Environment configuration
pub mod config;

// Services layer
pub mod services;
pub use services::EventService;

// Storage layer
pub mod storage;

// OpenAPI spec generation
pub mod openapi;

use axum::Router;
use std::sync::Arc;
use storage::StorageBackend;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Build the full application router: `/health`, the event routes under
/// `api_prefix`, and Swagger UI. Middleware layers are added by the caller.
pub fn build_router(db: Arc<StorageBackend>, api_prefix: &str) -> Router {
    let health_state = api::health::HealthState {
        storage: db.name(),
    };
    let events_state = api::events::AppState::new(db);

    let api_routes = Router::new().merge(api::events::routes(events_state));

    Router::new()
        .merge(api::health::routes(health_state))
        .merge(build_router_with_prefix(api_routes, api_prefix))
        .merge(
            SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", openapi::ApiDoc::openapi()),
        )
}

/// Build router with optional API prefix (extracted for testing)
pub fn build_router_with_prefix<S: Clone + Send + Sync + 'static>(
    api_routes: Router<S>,
    api_prefix: &str,
) -> Router<S> {
    if api_prefix.is_empty() {
        api_routes
    } else {
        Router::new().nest(api_prefix, api_routes)
    }
}
