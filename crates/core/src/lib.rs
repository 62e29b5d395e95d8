// Processed events query core
//
// DB-agnostic building blocks for the read-only events API:
// - Event: the single domain entity
// - validation: query parameter parsing with clamp-or-reject rules
// - query: the six fixed query shapes and their Postgres templates
// - sql: placeholder-tracking SQL builder
// - telemetry: tracing subscriber setup shared by binaries

pub mod event;
pub mod query;
pub mod sql;
pub mod telemetry;
pub mod validation;

pub use event::Event;
pub use query::{EventQuery, EVENTS_TABLE};
pub use sql::{Placeholder, SqlArg, SqlBuilder, SqlQuery};
pub use validation::{
    KeyFilter, Pagination, QueryParams, SortOrder, ValidationError, DEFAULT_PAGE,
    DEFAULT_PAGE_LENGTH, MAX_PAGE_LENGTH,
};
