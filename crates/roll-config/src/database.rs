//! Database and connection pool configuration.

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "rollcall.db".to_string()
}

const fn default_pool_size() -> usize {
    10
}

const fn default_busy_timeout_ms() -> u64 {
    5_000
}

const fn default_apply_schema() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Local database file. Ignored when `url` is set.
    #[serde(default = "default_path")]
    pub path: String,

    /// Remote libSQL URL (e.g., `libsql://roster-myorg.turso.io`).
    #[serde(default)]
    pub url: String,

    /// Auth token for the remote database.
    #[serde(default)]
    pub auth_token: String,

    /// Maximum number of pooled connections.
    #[serde(default = "default_pool_size")]
    pub pool_size: usize,

    /// How long a local connection waits on a locked database.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,

    /// Create the roster tables on startup if they are missing.
    #[serde(default = "default_apply_schema")]
    pub apply_schema: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            url: String::new(),
            auth_token: String::new(),
            pool_size: default_pool_size(),
            busy_timeout_ms: default_busy_timeout_ms(),
            apply_schema: default_apply_schema(),
        }
    }
}

impl DatabaseConfig {
    /// Check if a remote database is configured (URL and token both set).
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }

    /// Whether the local path is SQLite's private in-memory database.
    pub fn is_memory(&self) -> bool {
        !self.is_remote() && self.path == ":memory:"
    }
}
