// In-memory storage implementation for dev mode
// Decision: Use parking_lot for thread-safe access
// Decision: Evaluate EventQuery directly, following the Postgres templates' filters,
// NULL handling and tiebreaks
//
// Array positions are 1-based and out-of-range positions read as NULL. NULLs
// sort last ascending and first descending, and never compare equal.
// Text compares byte-wise (like COLLATE "C"); a Postgres database with a
// linguistic collation may order mixed-case or non-ASCII values differently.

use std::cmp::Ordering;
use std::collections::HashSet;

use anyhow::{Context, Result};
use parking_lot::RwLock;
use processed_events_core::{Event, EventQuery, Pagination, SortOrder};

use super::models::CreateEvent;

/// In-memory processed events table
/// All data is stored in memory and lost on restart
#[derive(Default)]
pub struct InMemoryDatabase {
    events: RwLock<Vec<Event>>,
}

impl InMemoryDatabase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a JSON array of events, assigning ids in file order.
    pub fn from_seed_json(json: &str) -> Result<Self> {
        let seed: Vec<CreateEvent> =
            serde_json::from_str(json).context("Seed file must be a JSON array of events")?;
        let db = Self::new();
        for input in seed {
            db.append(input);
        }
        Ok(db)
    }

    /// Append an event with the next id.
    pub fn append(&self, input: CreateEvent) -> Event {
        let mut events = self.events.write();
        let id = events.last().map(|e| e.id + 1).unwrap_or(1);
        let event = Event {
            id,
            event_id: input.event_id,
            keys: input.keys,
            data: input.data,
        };
        events.push(event.clone());
        event
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    // ============================================
    // Processed events
    // ============================================

    pub async fn fetch_one(&self, query: &EventQuery) -> Result<Option<Event>> {
        Ok(self.evaluate(query).into_iter().next())
    }

    pub async fn fetch_many(&self, query: &EventQuery) -> Result<Vec<Event>> {
        Ok(self.evaluate(query))
    }

    fn evaluate(&self, query: &EventQuery) -> Vec<Event> {
        let events = self.events.read();
        // Stored in id order, so every candidate list starts ascending by id.
        let mut rows: Vec<Event> = events
            .iter()
            .filter(|e| e.event_id == query.event_id())
            .cloned()
            .collect();
        drop(events);

        match query {
            EventQuery::Latest { .. } => rows.pop().into_iter().collect(),
            EventQuery::List { page, .. } => paginate(rows, page),
            EventQuery::ListFrom {
                cursor,
                page_length,
                ..
            } => rows
                .into_iter()
                .filter(|e| e.id > *cursor)
                .take(*page_length as usize)
                .collect(),
            EventQuery::LatestWithKeys { filters, .. } => rows
                .into_iter()
                .rev()
                .find(|e| {
                    filters
                        .iter()
                        .all(|f| e.key(f.idx) == Some(f.value.as_str()))
                })
                .into_iter()
                .collect(),
            EventQuery::OrderedByKey {
                key_idx,
                order,
                page,
                ..
            } => {
                rows.sort_by(|a, b| {
                    compare_nullable(a.key(*key_idx), b.key(*key_idx), *order)
                        .then(a.id.cmp(&b.id))
                });
                paginate(rows, page)
            }
            EventQuery::OrderedByData {
                data_idx,
                order,
                page,
                unique_key: None,
                ..
            } => {
                rows.sort_by(|a, b| {
                    compare_nullable(a.datum(*data_idx), b.datum(*data_idx), *order)
                        .then(a.id.cmp(&b.id))
                });
                paginate(rows, page)
            }
            EventQuery::OrderedByData {
                data_idx,
                order,
                page,
                unique_key: Some(key_idx),
                ..
            } => {
                // First row per key under (data order, id asc) is the representative.
                rows.sort_by(|a, b| {
                    compare_nullable(a.datum(*data_idx), b.datum(*data_idx), *order)
                        .then(a.id.cmp(&b.id))
                });
                let mut seen = HashSet::new();
                let mut unique: Vec<Event> = rows
                    .into_iter()
                    .filter(|e| seen.insert(e.key(*key_idx).map(str::to_string)))
                    .collect();
                unique.sort_by(|a, b| {
                    compare_nullable(a.datum(*data_idx), b.datum(*data_idx), *order).then(
                        compare_nullable(a.key(*key_idx), b.key(*key_idx), SortOrder::Asc),
                    )
                });
                paginate(unique, page)
            }
        }
    }
}

fn paginate(rows: Vec<Event>, page: &Pagination) -> Vec<Event> {
    let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    rows.into_iter()
        .skip(offset)
        .take(page.page_length as usize)
        .collect()
}

/// Postgres default ordering: NULLS LAST for ASC, NULLS FIRST for DESC.
fn compare_nullable(a: Option<&str>, b: Option<&str>, order: SortOrder) -> Ordering {
    let ascending = match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    };
    match order {
        SortOrder::Asc => ascending,
        SortOrder::Desc => ascending.reverse(),
    }
}
