//! Spreadsheet cells, column specs and import rows.
//!
//! The sheet parser turns each data row into an [`ImportRow`] whose values
//! line up with [`ImportKind::columns`]. Cells are coerced toward the column's
//! [`ColumnType`] only when the conversion is lossless; anything else passes
//! through unchanged and the store's constraints decide whether it is
//! accepted.

use serde::{Deserialize, Serialize};

use crate::enums::{ColumnType, ImportKind};

/// One spreadsheet column that feeds one table column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnSpec {
    /// Table column name.
    pub column: &'static str,
    /// Accepted headers, already normalized (see [`normalize_header`]).
    pub aliases: &'static [&'static str],
    pub ty: ColumnType,
}

impl ColumnSpec {
    #[must_use]
    pub const fn new(
        column: &'static str,
        aliases: &'static [&'static str],
        ty: ColumnType,
    ) -> Self {
        Self { column, aliases, ty }
    }

    /// Whether a normalized header names this column.
    #[must_use]
    pub fn matches(&self, normalized_header: &str) -> bool {
        self.aliases.contains(&normalized_header)
    }
}

/// Lowercase a header and drop everything that is not ASCII alphanumeric.
///
/// `class_id`, `classId` and `Class ID` all normalize to `classid`.
#[must_use]
pub fn normalize_header(header: &str) -> String {
    header
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl ImportKind {
    /// For each column of this kind, the index of the first matching header.
    ///
    /// Columns with no matching header map to `None` and import as NULL.
    #[must_use]
    pub fn column_positions<S: AsRef<str>>(self, headers: &[S]) -> Vec<Option<usize>> {
        let normalized: Vec<String> = headers
            .iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();
        self.columns()
            .iter()
            .map(|spec| normalized.iter().position(|h| spec.matches(h)))
            .collect()
    }
}

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl CellValue {
    /// Whether the cell carries no data (NULL or blank text).
    #[must_use]
    pub fn is_blank(&self) -> bool {
        match self {
            Self::Null => true,
            Self::Text(s) => s.trim().is_empty(),
            Self::Integer(_) | Self::Real(_) => false,
        }
    }

    /// Coerce toward `ty` when the conversion loses nothing.
    #[must_use]
    pub fn coerce(self, ty: ColumnType) -> Self {
        if self.is_blank() {
            return Self::Null;
        }
        match (ty, self) {
            (ColumnType::Integer, Self::Real(f)) => integral(f).map_or(Self::Real(f), Self::Integer),
            (ColumnType::Integer, Self::Text(s)) => {
                let trimmed = s.trim();
                if let Ok(n) = trimmed.parse::<i64>() {
                    Self::Integer(n)
                } else if let Some(n) = trimmed.parse::<f64>().ok().and_then(integral) {
                    Self::Integer(n)
                } else {
                    Self::Text(s)
                }
            }
            (ColumnType::Text, Self::Integer(n)) => Self::Text(n.to_string()),
            (ColumnType::Text, Self::Real(f)) => {
                Self::Text(integral(f).map_or_else(|| f.to_string(), |n| n.to_string()))
            }
            (ColumnType::Text, Self::Text(s)) => Self::Text(s.trim().to_string()),
            (_, other) => other,
        }
    }
}

/// `Some(n)` when `f` is a whole number that fits in an `i64`.
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(f: f64) -> Option<i64> {
    if f.is_finite() && f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 {
        Some(f as i64)
    } else {
        None
    }
}

/// One data row of an upload, values ordered like [`ImportKind::columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportRow {
    pub values: Vec<CellValue>,
}

impl ImportRow {
    #[must_use]
    pub const fn new(values: Vec<CellValue>) -> Self {
        Self { values }
    }

    /// Build a row from raw cells, picking and coercing the kind's columns.
    ///
    /// `positions` comes from [`ImportKind::column_positions`].
    #[must_use]
    pub fn from_cells(kind: ImportKind, positions: &[Option<usize>], cells: &[CellValue]) -> Self {
        let values = kind
            .columns()
            .iter()
            .zip(positions)
            .map(|(spec, pos)| {
                pos.and_then(|i| cells.get(i))
                    .cloned()
                    .unwrap_or(CellValue::Null)
                    .coerce(spec.ty)
            })
            .collect();
        Self { values }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("class_id", "classid")]
    #[case("classId", "classid")]
    #[case("Class ID", "classid")]
    #[case(" RA ", "ra")]
    fn headers_normalize(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(normalize_header(raw), expected);
    }

    #[test]
    fn positions_accept_aliases_in_any_order() {
        let headers = ["Name", "class", "RA", "digit"];
        let positions = ImportKind::Student.column_positions(&headers);
        assert_eq!(positions, vec![Some(2), Some(0), Some(3), Some(1)]);
    }

    #[test]
    fn missing_header_maps_to_none() {
        let positions = ImportKind::Class.column_positions(&["id", "name", "grade_id", "year_id"]);
        assert_eq!(positions[4], None);
    }

    #[rstest]
    #[case(CellValue::Real(12345.0), CellValue::Integer(12345))]
    #[case(CellValue::Real(1.5), CellValue::Real(1.5))]
    #[case(CellValue::Text(" 42 ".into()), CellValue::Integer(42))]
    #[case(CellValue::Text("7.0".into()), CellValue::Integer(7))]
    #[case(CellValue::Text("abc".into()), CellValue::Text("abc".into()))]
    #[case(CellValue::Text("   ".into()), CellValue::Null)]
    fn integer_coercion(#[case] cell: CellValue, #[case] expected: CellValue) {
        assert_eq!(cell.coerce(ColumnType::Integer), expected);
    }

    #[rstest]
    #[case(CellValue::Real(99887.0), CellValue::Text("99887".into()))]
    #[case(CellValue::Integer(6), CellValue::Text("6".into()))]
    #[case(CellValue::Real(2.25), CellValue::Text("2.25".into()))]
    #[case(CellValue::Text("  Ana  ".into()), CellValue::Text("Ana".into()))]
    #[case(CellValue::Null, CellValue::Null)]
    fn text_coercion(#[case] cell: CellValue, #[case] expected: CellValue) {
        assert_eq!(cell.coerce(ColumnType::Text), expected);
    }

    #[test]
    fn row_from_cells_fills_missing_columns_with_null() {
        let headers = ["ra", "name"];
        let positions = ImportKind::Student.column_positions(&headers);
        let row = ImportRow::from_cells(
            ImportKind::Student,
            &positions,
            &[CellValue::Real(1001.0), CellValue::Text("Ana".into())],
        );
        assert_eq!(
            row.values,
            vec![
                CellValue::Text("1001".into()),
                CellValue::Text("Ana".into()),
                CellValue::Null,
                CellValue::Null,
            ]
        );
    }
}
