//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use roll_config::RollConfig;
use roll_db::RollService;
use roll_lookup::{LookupError, RaLookupClient};

/// Everything a handler needs. Cloned per request; all fields are cheap handles.
#[derive(Clone)]
pub struct AppState {
    pub service: RollService,
    pub lookup: Arc<RaLookupClient>,
    /// Deadline for the transactional part of an upload.
    pub import_timeout: Duration,
    /// Largest accepted request body.
    pub max_upload_bytes: usize,
    /// Browser origins allowed by CORS; empty allows any.
    pub cors_origins: Vec<String>,
}

impl AppState {
    /// Build state from an open service and the loaded config.
    ///
    /// # Errors
    ///
    /// Returns `LookupError::Http` if the lookup HTTP client cannot be built.
    pub fn new(service: RollService, config: &RollConfig) -> Result<Self, LookupError> {
        Ok(Self {
            service,
            lookup: Arc::new(RaLookupClient::new(&config.lookup)?),
            import_timeout: Duration::from_secs(config.import.timeout_secs),
            max_upload_bytes: config.import.max_upload_bytes,
            cors_origins: config.server.cors_origins.clone(),
        })
    }
}
