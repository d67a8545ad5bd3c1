//! Roster upload configuration.

use serde::{Deserialize, Serialize};

const fn default_batch_size() -> usize {
    100
}

const fn default_timeout_secs() -> u64 {
    120
}

const fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ImportConfig {
    /// Rows per multi-row `INSERT`.
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,

    /// Deadline for the whole transactional insert, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Largest accepted request body for uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            batch_size: default_batch_size(),
            timeout_secs: default_timeout_secs(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}
