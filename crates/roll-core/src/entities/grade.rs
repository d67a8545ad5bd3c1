use serde::{Deserialize, Serialize};

/// A grade level. Listings sort by `number`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Grade {
    pub id: i64,
    pub number: i64,
}
