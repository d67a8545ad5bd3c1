//! Import kinds and column types for the roster upload.
//!
//! Each kind names the table it fills and the spreadsheet columns it reads.
//! The column order returned by [`ImportKind::columns`] is the order of the
//! values in every [`ImportRow`](crate::import::ImportRow) and of the column
//! list in the generated `INSERT`.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::import::ColumnSpec;

// ---------------------------------------------------------------------------
// ColumnType
// ---------------------------------------------------------------------------

/// Storage type of an import column, used to coerce spreadsheet cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    Integer,
    Text,
}

// ---------------------------------------------------------------------------
// ImportKind
// ---------------------------------------------------------------------------

const CLASS_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("id", &["id"], ColumnType::Integer),
    ColumnSpec::new("name", &["name"], ColumnType::Text),
    ColumnSpec::new("grade_id", &["gradeid", "grade"], ColumnType::Integer),
    ColumnSpec::new("year_id", &["yearid", "year"], ColumnType::Integer),
    ColumnSpec::new("course_id", &["courseid", "course"], ColumnType::Integer),
];

const STUDENT_COLUMNS: &[ColumnSpec] = &[
    ColumnSpec::new("ra", &["ra"], ColumnType::Text),
    ColumnSpec::new("name", &["name"], ColumnType::Text),
    ColumnSpec::new("digit", &["digit"], ColumnType::Text),
    ColumnSpec::new("class_id", &["classid", "class"], ColumnType::Integer),
];

/// Which roster table a spreadsheet upload fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImportKind {
    Class,
    Student,
}

impl ImportKind {
    /// Return the string representation used in routes and logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Student => "student",
        }
    }

    /// Target table name.
    #[must_use]
    pub const fn table(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::Student => "student",
        }
    }

    /// Columns read from the sheet, in insert order.
    #[must_use]
    pub const fn columns(self) -> &'static [ColumnSpec] {
        match self {
            Self::Class => CLASS_COLUMNS,
            Self::Student => STUDENT_COLUMNS,
        }
    }
}

impl fmt::Display for ImportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_order_matches_tables() {
        let class: Vec<_> = ImportKind::Class.columns().iter().map(|c| c.column).collect();
        assert_eq!(class, ["id", "name", "grade_id", "year_id", "course_id"]);

        let student: Vec<_> = ImportKind::Student.columns().iter().map(|c| c.column).collect();
        assert_eq!(student, ["ra", "name", "digit", "class_id"]);
    }
}
