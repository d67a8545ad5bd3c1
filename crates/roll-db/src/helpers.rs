//! Row parsing and statement-building helpers shared by the repos.

use chrono::NaiveDate;
use libsql::Value;

use roll_core::import::CellValue;

use crate::error::DatabaseError;

/// Parse a `YYYY-MM-DD` TEXT column, as written by `date('now')`.
///
/// # Errors
///
/// Returns `DatabaseError::Query` if the string is not a calendar date.
pub fn parse_date(s: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| DatabaseError::Query(format!("Failed to parse date '{s}': {e}")))
}

/// Read a nullable TEXT column. Returns `None` for both SQL NULL and empty string.
///
/// `row.get::<String>(idx)` on a NULL column returns an error, not `""`.
///
/// # Errors
///
/// Returns `DatabaseError` if the column read fails.
pub fn get_opt_string(row: &libsql::Row, idx: i32) -> Result<Option<String>, DatabaseError> {
    match row.get::<Option<String>>(idx)? {
        Some(s) if s.is_empty() => Ok(None),
        other => Ok(other),
    }
}

/// Bind value for a spreadsheet cell.
#[must_use]
pub fn cell_to_value(cell: &CellValue) -> Value {
    match cell {
        CellValue::Null => Value::Null,
        CellValue::Integer(n) => Value::Integer(*n),
        CellValue::Real(f) => Value::Real(*f),
        CellValue::Text(s) => Value::Text(s.clone()),
    }
}

/// AND-combined equality filters with positional parameters.
///
/// Only filters that were actually supplied become clauses, so an absent
/// query-string parameter never turns into `column = NULL`.
#[derive(Debug, Default)]
pub struct Conditions {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Conditions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `column = ?N` bound to `value`.
    pub fn eq(&mut self, column: &str, value: impl Into<Value>) -> &mut Self {
        self.params.push(value.into());
        self.clauses.push(format!("{column} = ?{}", self.params.len()));
        self
    }

    /// Add `column = ?N` when `value` is present.
    pub fn eq_opt(&mut self, column: &str, value: Option<i64>) -> &mut Self {
        if let Some(value) = value {
            self.eq(column, value);
        }
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }

    /// ` WHERE a = ?1 AND b = ?2`, or an empty string without filters.
    #[must_use]
    pub fn where_clause(&self) -> String {
        if self.clauses.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clauses.join(" AND "))
        }
    }

    /// Consume the builder into bind parameters.
    #[must_use]
    pub fn into_params(self) -> libsql::params::Params {
        libsql::params::Params::Positional(self.params)
    }
}
