// Event service for business logic
//
// Executes one validated EventQuery per request against the storage backend
// and decides found/not-found. Storage errors pass through untouched; the HTTP
// layer logs them and hides them from callers.

use crate::storage::StorageBackend;
use anyhow::Result;
use processed_events_core::{Event, EventQuery};
use std::sync::Arc;

pub struct EventService {
    db: Arc<StorageBackend>,
}

impl EventService {
    pub fn new(db: Arc<StorageBackend>) -> Self {
        Self { db }
    }

    /// Single-row query. `None` when nothing matched.
    pub async fn find_one(&self, query: &EventQuery) -> Result<Option<Event>> {
        debug_assert!(query.is_single_row());
        let event = self.db.fetch_one(query).await?;
        tracing::debug!(
            kind = query.kind(),
            event_id = query.event_id(),
            found = event.is_some(),
            "Event lookup finished"
        );
        Ok(event)
    }

    /// Multi-row query. `None` when the page is empty.
    pub async fn find_many(&self, query: &EventQuery) -> Result<Option<Vec<Event>>> {
        let events = self.db.fetch_many(query).await?;
        tracing::debug!(
            kind = query.kind(),
            event_id = query.event_id(),
            count = events.len(),
            "Event listing finished"
        );
        Ok(Some(events).filter(|events| !events.is_empty()))
    }
}
