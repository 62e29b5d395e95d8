// OpenAPI specification generation
//
// Shared by the API server (Swagger UI) and the export-openapi binary
// (static spec generation).

use crate::api;
use crate::api::{DataResponse, ErrorResponse, ListResponse};
use processed_events_core::Event;
use utoipa::OpenApi;

/// OpenAPI documentation for the processed events API
#[derive(OpenApi)]
#[openapi(
    paths(
        api::events::get_latest,
        api::events::get_events,
        api::events::get_events_from,
        api::events::get_latest_with,
        api::events::get_events_ordered,
        api::events::get_events_ordered_data,
        api::health::health,
    ),
    components(
        schemas(
            Event,
            DataResponse<Event>,
            ListResponse<Event>,
            ErrorResponse,
            api::health::HealthResponse,
        )
    ),
    tags(
        (name = "events", description = "Read-only queries over processed events"),
        (name = "health", description = "Service health")
    ),
    info(
        title = "Processed Events API",
        description = "Query service over the processedevents table",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    )
)]
pub struct ApiDoc;

impl ApiDoc {
    /// Generate the OpenAPI spec as a pretty-printed JSON string
    pub fn to_json() -> Result<String, serde_json::Error> {
        Self::openapi().to_pretty_json()
    }
}
