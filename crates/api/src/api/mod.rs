// HTTP API routes
//
// This module contains the HTTP route handlers for the public API.
// Each submodule handles one resource type with its own AppState.

pub mod common;
pub mod events;
pub mod health;

// Re-export common types
pub use common::{ApiError, DataResponse, ErrorResponse, ListResponse};
