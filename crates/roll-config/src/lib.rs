//! # roll-config
//!
//! Layered configuration loading for rollcall using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`ROLLCALL_*` prefix, `__` as separator)
//! 2. An explicit file passed with `rollcalld --config`
//! 3. Project-level `rollcall.toml` in the working directory
//! 4. User-level `~/.config/rollcall/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `ROLLCALL_DATABASE__PATH` -> `database.path`,
//! `ROLLCALL_IMPORT__BATCH_SIZE` -> `import.batch_size`, etc.
//! The `__` (double underscore) separates nested config sections.
//!
//! # Usage
//!
//! ```no_run
//! use roll_config::RollConfig;
//!
//! let config = RollConfig::load_with_dotenv(None).expect("config");
//! println!("listening on {}", config.server.bind_addr());
//! ```

mod database;
mod error;
mod import;
mod lookup;
mod report;
mod server;

pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use import::ImportConfig;
pub use lookup::LookupConfig;
pub use report::ReportConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Project-local config file, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "rollcall.toml";

/// Prefix of every environment override.
pub const ENV_PREFIX: &str = "ROLLCALL_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RollConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub import: ImportConfig,
    #[serde(default)]
    pub lookup: LookupConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

impl RollConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingFile` if `explicit` does not exist,
    /// `ConfigError::Figment` on malformed sources, and
    /// `ConfigError::InvalidValue` if validation fails.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit
            && !path.exists()
        {
            return Err(ConfigError::MissingFile(path.display().to_string()));
        }
        let config: Self = Self::figment(explicit).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the working directory.
    ///
    /// Variables already present in the process environment win over `.env`.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::load(explicit)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers on top.
    pub fn figment(explicit: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(global_path));
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(PROJECT_CONFIG_FILE);
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Explicit --config file
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 4: Environment variables (highest priority)
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Reject values that would make the service unusable.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.pool_size == 0 {
            return Err(invalid("database.pool_size", "must be at least 1"));
        }
        if let Some(origin) = self.server.invalid_cors_origin() {
            return Err(invalid(
                "server.cors_origins",
                &format!("'{origin}' is not an http(s) origin"),
            ));
        }
        if self.import.batch_size == 0 {
            return Err(invalid("import.batch_size", "must be at least 1"));
        }
        if self.import.timeout_secs == 0 {
            return Err(invalid("import.timeout_secs", "must be at least 1"));
        }
        if self.lookup.timeout_secs == 0 {
            return Err(invalid("lookup.timeout_secs", "must be at least 1"));
        }
        if self.lookup.marker.trim().is_empty() {
            return Err(invalid("lookup.marker", "must not be blank"));
        }
        if self.report.utc_offset_minutes.abs() > 14 * 60 {
            return Err(invalid(
                "report.utc_offset_minutes",
                "must be within -840..=840",
            ));
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("rollcall").join("config.toml"))
    }
}

fn invalid(field: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        reason: reason.to_string(),
    }
}
