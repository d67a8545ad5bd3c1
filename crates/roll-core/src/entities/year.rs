use serde::{Deserialize, Serialize};

/// A school year (e.g. `2026`). Referenced by every class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SchoolYear {
    pub id: i64,
    pub label: String,
}
