// Repository layer for database operations
// Read-only access to the processedevents table

use std::time::Duration;

use anyhow::Result;
use processed_events_core::{Event, EventQuery, SqlArg};
use sqlx::postgres::{PgArguments, PgPoolOptions};
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};

use crate::storage::models::EventRow;

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a bounded pool
    pub async fn connect(
        database_url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(database_url)
            .await?;
        Ok(Self { pool })
    }

    // ============================================
    // Processed events
    // ============================================

    pub async fn fetch_one(&self, query: &EventQuery) -> Result<Option<Event>> {
        let sql = query.to_sql();
        tracing::debug!(
            kind = query.kind(),
            sql = %sql.text,
            args = sql.args.len(),
            "Fetching one event"
        );

        let row = bind_args(sqlx::query_as::<_, EventRow>(&sql.text), &sql.args)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Event::from))
    }

    pub async fn fetch_many(&self, query: &EventQuery) -> Result<Vec<Event>> {
        let sql = query.to_sql();
        tracing::debug!(
            kind = query.kind(),
            sql = %sql.text,
            args = sql.args.len(),
            "Fetching events"
        );

        let rows = bind_args(sqlx::query_as::<_, EventRow>(&sql.text), &sql.args)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Event::from).collect())
    }
}

/// Bind tagged arguments in placeholder order.
fn bind_args<'q>(
    mut query: QueryAs<'q, Postgres, EventRow, PgArguments>,
    args: &'q [SqlArg],
) -> QueryAs<'q, Postgres, EventRow, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::BigInt(value) => query.bind(*value),
            SqlArg::Index(value) => query.bind(*value),
            SqlArg::Text(value) => query.bind(value.as_str()),
        };
    }
    query
}
