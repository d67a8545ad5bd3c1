use serde::{Deserialize, Serialize};

/// A student row joined with its class's year and grade.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StudentListing {
    /// Registration number ("RA").
    pub ra: String,
    pub name: String,
    /// Check digit printed after the RA, when known.
    pub digit: Option<String>,
    pub class_id: i64,
    pub year_id: i64,
    pub grade_id: i64,
}
