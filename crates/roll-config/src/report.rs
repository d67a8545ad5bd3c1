//! Attendance report configuration.

use serde::{Deserialize, Serialize};

/// Brazil/East (America/Sao_Paulo), which has not observed DST since 2019.
const fn default_utc_offset_minutes() -> i32 {
    -180
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReportConfig {
    /// UTC offset of the zone report times are shown in. Stored check-in
    /// times carry their own offset.
    #[serde(default = "default_utc_offset_minutes")]
    pub utc_offset_minutes: i32,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_utc_offset_minutes(),
        }
    }
}

impl ReportConfig {
    /// The offset as an SQLite date/time modifier, e.g. `-180 minutes`.
    pub fn time_modifier(&self) -> String {
        format!("{:+} minutes", self.utc_offset_minutes)
    }
}
