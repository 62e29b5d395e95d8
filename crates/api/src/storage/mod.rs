// Storage layer for the processed events API
// Decision: Support both PostgreSQL (production) and in-memory (dev mode)
//
// - Database: sqlx PgPool executing the SQL rendered by EventQuery
// - InMemoryDatabase: evaluates EventQuery over a Vec<Event>
// - StorageBackend: enum dispatch over the two

pub mod backend;
pub mod memory;
pub mod models;
pub mod repositories;

pub use backend::StorageBackend;
pub use memory::InMemoryDatabase;
pub use models::*;
pub use repositories::*;
