// Database models (internal, may differ from public DTOs)

use processed_events_core::Event;
use serde::Deserialize;
use sqlx::FromRow;

/// Row as selected by the query templates (columns already cast).
#[derive(Debug, Clone, FromRow)]
pub struct EventRow {
    pub id: i64,
    pub event_id: i64,
    pub keys: Vec<String>,
    pub data: Vec<String>,
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        Event {
            id: row.id,
            event_id: row.event_id,
            keys: row.keys,
            data: row.data,
        }
    }
}

/// Input for appending an event (dev mode seeding only; production rows come
/// from the ingestion pipeline).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CreateEvent {
    pub event_id: i64,
    pub keys: Vec<String>,
    pub data: Vec<String>,
}

impl CreateEvent {
    pub fn new<K, D>(event_id: i64, keys: K, data: D) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        D: IntoIterator,
        D::Item: Into<String>,
    {
        Self {
            event_id,
            keys: keys.into_iter().map(Into::into).collect(),
            data: data.into_iter().map(Into::into).collect(),
        }
    }
}
