// Storage backend abstraction
// Decision: Use enum dispatch for simplicity over trait objects
//
// This module provides a unified StorageBackend enum that can work with
// either PostgreSQL (production) or in-memory (dev mode) storage.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use processed_events_core::{Event, EventQuery};

use super::memory::InMemoryDatabase;
use super::repositories::Database;

/// Storage backend that can be either PostgreSQL or in-memory
#[derive(Clone)]
pub enum StorageBackend {
    /// PostgreSQL database (production)
    Postgres(Database),
    /// In-memory database (dev mode)
    InMemory(Arc<InMemoryDatabase>),
}

impl StorageBackend {
    /// Create a PostgreSQL storage backend with a bounded pool
    pub async fn postgres(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let db = Database::connect(database_url, max_connections, acquire_timeout).await?;
        Ok(Self::Postgres(db))
    }

    /// Create an empty in-memory storage backend
    pub fn in_memory() -> Self {
        Self::InMemory(Arc::new(InMemoryDatabase::new()))
    }

    /// Wrap an existing in-memory database (seeded or shared with tests)
    pub fn from_memory(db: Arc<InMemoryDatabase>) -> Self {
        Self::InMemory(db)
    }

    /// Backend name reported by the health endpoint
    pub fn name(&self) -> &'static str {
        match self {
            Self::Postgres(_) => "postgres",
            Self::InMemory(_) => "in-memory",
        }
    }

    // ============================================
    // Processed events
    // ============================================

    pub async fn fetch_one(&self, query: &EventQuery) -> Result<Option<Event>> {
        match self {
            Self::Postgres(db) => db.fetch_one(query).await,
            Self::InMemory(db) => db.fetch_one(query).await,
        }
    }

    pub async fn fetch_many(&self, query: &EventQuery) -> Result<Vec<Event>> {
        match self {
            Self::Postgres(db) => db.fetch_many(query).await,
            Self::InMemory(db) => db.fetch_many(query).await,
        }
    }
}
