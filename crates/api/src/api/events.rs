// Processed events query routes
//
// Six read-only GET endpoints. Each validates its query string into an
// EventQuery, runs exactly one storage operation and answers with the
// data/error envelope.

use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use processed_events_core::{Event, EventQuery, QueryParams};
use std::sync::Arc;

use super::common::{ApiError, DataResponse, ErrorResponse, ListResponse};
use crate::services::EventService;
use crate::storage::StorageBackend;

const LATEST_NOT_FOUND: &str = "No event found for the given eventId";
const KEYS_NOT_FOUND: &str = "No event found for the given keys";
const EVENTS_NOT_FOUND: &str = "No events found for the given eventId";
const LATEST_FETCH_FAILED: &str = "Error fetching latest event";
const EVENTS_FETCH_FAILED: &str = "Error fetching events";

/// Raw query string pairs; repeated names are preserved.
type RawParams = Query<Vec<(String, String)>>;

// ============================================
// App State and Routes
// ============================================

/// App state for events routes
#[derive(Clone)]
pub struct AppState {
    pub event_service: Arc<EventService>,
}

impl AppState {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self {
            event_service: Arc::new(EventService::new(db)),
        }
    }
}

/// Create event routes
pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/events/get-latest", get(get_latest))
        .route("/events/get-events", get(get_events))
        .route("/events/get-events-from", get(get_events_from))
        .route("/events/get-latest-with", get(get_latest_with))
        .route("/events/get-events-ordered", get(get_events_ordered))
        .route("/events/get-events-ordered-data", get(get_events_ordered_data))
        .with_state(state)
}

// ============================================
// Execution
// ============================================

async fn fetch_one(
    state: &AppState,
    query: EventQuery,
    not_found: &'static str,
) -> Result<Json<DataResponse<Event>>, ApiError> {
    let event = state
        .event_service
        .find_one(&query)
        .await
        .map_err(|e| {
            tracing::error!(
                kind = query.kind(),
                event_id = query.event_id(),
                "Failed to fetch event: {:#}",
                e
            );
            ApiError::internal(LATEST_FETCH_FAILED)
        })?
        .ok_or_else(|| ApiError::not_found(not_found))?;

    Ok(Json(DataResponse::new(event)))
}

async fn fetch_many(
    state: &AppState,
    query: EventQuery,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let events = state
        .event_service
        .find_many(&query)
        .await
        .map_err(|e| {
            tracing::error!(
                kind = query.kind(),
                event_id = query.event_id(),
                "Failed to fetch events: {:#}",
                e
            );
            ApiError::internal(EVENTS_FETCH_FAILED)
        })?
        .ok_or_else(|| ApiError::not_found(EVENTS_NOT_FOUND))?;

    Ok(Json(ListResponse::new(events)))
}

// ============================================
// HTTP Handlers
// ============================================

/// GET /events/get-latest - Most recent event of a type
#[utoipa::path(
    get,
    path = "/events/get-latest",
    params(
        ("eventId" = i64, Query, description = "Event type identifier")
    ),
    responses(
        (status = 200, description = "Latest event", body = DataResponse<Event>),
        (status = 400, description = "Missing or invalid eventId", body = ErrorResponse),
        (status = 404, description = "No event of this type", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_latest(
    State(state): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<DataResponse<Event>>, ApiError> {
    let query = EventQuery::latest(&QueryParams::from(params))?;
    fetch_one(&state, query, LATEST_NOT_FOUND).await
}

/// GET /events/get-events - Page of events in insertion order
#[utoipa::path(
    get,
    path = "/events/get-events",
    params(
        ("eventId" = i64, Query, description = "Event type identifier"),
        ("pageLength" = Option<i64>, Query, description = "Rows per page, 1-30 (default 10)"),
        ("page" = Option<i64>, Query, description = "1-based page number (default 1)")
    ),
    responses(
        (status = 200, description = "Events ordered by id ascending", body = ListResponse<Event>),
        (status = 400, description = "Missing or invalid eventId", body = ErrorResponse),
        (status = 404, description = "Empty page", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_events(
    State(state): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let query = EventQuery::list(&QueryParams::from(params))?;
    fetch_many(&state, query).await
}

/// GET /events/get-events-from - Events after a cursor id
#[utoipa::path(
    get,
    path = "/events/get-events-from",
    params(
        ("eventId" = i64, Query, description = "Event type identifier"),
        ("cursor" = i64, Query, description = "Exclusive lower bound on id"),
        ("pageLength" = Option<i64>, Query, description = "Rows per page, 1-30 (default 10)")
    ),
    responses(
        (status = 200, description = "Events after the cursor", body = ListResponse<Event>),
        (status = 400, description = "Missing or invalid eventId/cursor", body = ErrorResponse),
        (status = 404, description = "No events after the cursor", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_events_from(
    State(state): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let query = EventQuery::list_from(&QueryParams::from(params))?;
    fetch_many(&state, query).await
}

/// GET /events/get-latest-with - Most recent event matching keyed filters
///
/// `keys` is repeatable; each value is `<index>:<value>` with 1-based index.
#[utoipa::path(
    get,
    path = "/events/get-latest-with",
    params(
        ("eventId" = i64, Query, description = "Event type identifier"),
        ("keys" = Vec<String>, Query, description = "Repeatable `<index>:<value>` key filter")
    ),
    responses(
        (status = 200, description = "Latest matching event", body = DataResponse<Event>),
        (status = 400, description = "Missing or malformed parameters", body = ErrorResponse),
        (status = 404, description = "No event matches every filter", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_latest_with(
    State(state): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<DataResponse<Event>>, ApiError> {
    let query = EventQuery::latest_with_keys(&QueryParams::from(params))?;
    fetch_one(&state, query, KEYS_NOT_FOUND).await
}

/// GET /events/get-events-ordered - Page of events sorted by a key position
#[utoipa::path(
    get,
    path = "/events/get-events-ordered",
    params(
        ("eventId" = i64, Query, description = "Event type identifier"),
        ("keyIdx" = i32, Query, description = "1-based position in keys to sort by"),
        ("order" = Option<String>, Query, description = "`asc` (default) or `desc`"),
        ("pageLength" = Option<i64>, Query, description = "Rows per page, 1-30 (default 10)"),
        ("page" = Option<i64>, Query, description = "1-based page number (default 1)")
    ),
    responses(
        (status = 200, description = "Events sorted by keys[keyIdx]", body = ListResponse<Event>),
        (status = 400, description = "Missing or invalid eventId/keyIdx", body = ErrorResponse),
        (status = 404, description = "Empty page", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_events_ordered(
    State(state): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let query = EventQuery::ordered_by_key(&QueryParams::from(params))?;
    fetch_many(&state, query).await
}

/// GET /events/get-events-ordered-data - Page of events sorted by a data position
///
/// With `uniqueKey` set, only the first row per distinct `keys[uniqueKey]`
/// under the requested sort is kept.
#[utoipa::path(
    get,
    path = "/events/get-events-ordered-data",
    params(
        ("eventId" = i64, Query, description = "Event type identifier"),
        ("dataIdx" = i32, Query, description = "1-based position in data to sort by"),
        ("order" = Option<String>, Query, description = "`asc` (default) or `desc`"),
        ("pageLength" = Option<i64>, Query, description = "Rows per page, 1-30 (default 10)"),
        ("page" = Option<i64>, Query, description = "1-based page number (default 1)"),
        ("uniqueKey" = Option<i32>, Query, description = "1-based key position to dedup on")
    ),
    responses(
        (status = 200, description = "Events sorted by data[dataIdx]", body = ListResponse<Event>),
        (status = 400, description = "Missing or invalid parameters", body = ErrorResponse),
        (status = 404, description = "Empty page", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    ),
    tag = "events"
)]
pub async fn get_events_ordered_data(
    State(state): State<AppState>,
    Query(params): RawParams,
) -> Result<Json<ListResponse<Event>>, ApiError> {
    let query = EventQuery::ordered_by_data(&QueryParams::from(params))?;
    fetch_many(&state, query).await
}
