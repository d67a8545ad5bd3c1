//! External RA lookup configuration.

use serde::{Deserialize, Serialize};

const fn default_timeout_secs() -> u64 {
    10
}

fn default_marker() -> String {
    "Número da RA:".to_string()
}

fn default_user_agent() -> String {
    concat!("rollcall/", env!("CARGO_PKG_VERSION")).to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LookupConfig {
    /// Timeout for the outbound page fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Label text that precedes the RA label on the scraped page.
    #[serde(default = "default_marker")]
    pub marker: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Hosts the lookup may fetch from. Empty allows any host.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            marker: default_marker(),
            user_agent: default_user_agent(),
            allowed_hosts: Vec::new(),
        }
    }
}

impl LookupConfig {
    /// Whether `host` passes the allowlist (case-insensitive).
    pub fn allows_host(&self, host: &str) -> bool {
        self.allowed_hosts.is_empty()
            || self
                .allowed_hosts
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(host))
    }
}
