// Server configuration
// Decision: Everything comes from environment variables (optionally via .env)
//
// DATABASE_URL is only required outside dev mode; dev mode serves an
// in-memory table, optionally seeded from EVENTS_SEED_FILE.

use anyhow::{Context, Result};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_DB_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 5;

/// Where events are read from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    /// PostgreSQL `processedevents` table
    Postgres {
        database_url: String,
        max_connections: u32,
        acquire_timeout: Duration,
    },
    /// In-memory table (DEV_MODE), optionally seeded from a JSON file
    InMemory { seed_file: Option<PathBuf> },
}

/// Configuration for the HTTP server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub storage: StorageConfig,
    /// Bind address for the HTTP listener
    pub http_addr: String,
    /// Prefix for the event routes, e.g. "/api" (empty = none)
    pub api_prefix: String,
    /// Allowed CORS origins (empty = same-origin only)
    pub cors_origins: Vec<String>,
}

impl ServerConfig {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Create configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let dev_mode = var("DEV_MODE").map(|v| is_truthy(&v)).unwrap_or(false);

        let storage = if dev_mode {
            StorageConfig::InMemory {
                seed_file: var("EVENTS_SEED_FILE").map(PathBuf::from),
            }
        } else {
            let database_url = var("DATABASE_URL")
                .context("DATABASE_URL environment variable required (or set DEV_MODE=true)")?;
            let max_connections = match var("DB_MAX_CONNECTIONS") {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid DB_MAX_CONNECTIONS: {}", v))?,
                None => DEFAULT_DB_MAX_CONNECTIONS,
            };
            let acquire_timeout_secs = match var("DB_ACQUIRE_TIMEOUT_SECS") {
                Some(v) => v
                    .trim()
                    .parse()
                    .with_context(|| format!("Invalid DB_ACQUIRE_TIMEOUT_SECS: {}", v))?,
                None => DEFAULT_DB_ACQUIRE_TIMEOUT_SECS,
            };
            StorageConfig::Postgres {
                database_url,
                max_connections,
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
            }
        };

        let cors_origins = var("CORS_ALLOWED_ORIGINS")
            .map(|s| {
                s.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Ok(Self {
            storage,
            http_addr: var("HTTP_ADDR").unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string()),
            api_prefix: var("API_PREFIX")
                .map(|p| normalize_prefix(&p))
                .unwrap_or_default(),
            cors_origins,
        })
    }

    pub fn is_dev_mode(&self) -> bool {
        matches!(self.storage, StorageConfig::InMemory { .. })
    }
}

/// "api/" -> "/api"; a bare "/" means no prefix.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
