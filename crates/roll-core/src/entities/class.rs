use serde::{Deserialize, Serialize};

/// A class, belonging to exactly one grade and one school year.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Class {
    pub id: i64,
    pub name: String,
    pub grade_id: i64,
    pub year_id: i64,
    /// Carried by the roster import; not referenced anywhere else.
    pub course_id: Option<i64>,
}
