//! Delimited text uploads (CSV, semicolon- or tab-separated).
//!
//! Read like a one-sheet workbook: the first record holds the headers, every
//! later record with a non-blank cell becomes an [`ImportRow`]. All cells
//! start as text; [`ImportRow::from_cells`] coerces the integer columns.

use csv::ReaderBuilder;

use roll_core::enums::ImportKind;
use roll_core::import::{CellValue, ImportRow};

use crate::error::ParserError;

/// Separators considered on the header line. Ties go to the earlier one.
const DELIMITERS: [u8; 3] = [b',', b';', b'\t'];

/// Parse delimited text into import rows for `kind`.
///
/// # Errors
///
/// Returns `ParserError::Delimited` if a record cannot be read.
pub fn parse_delimited(text: &str, kind: ImportKind) -> Result<Vec<ImportRow>, ParserError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let delimiter = sniff_delimiter(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let Some(header) = records.next().transpose()? else {
        return Ok(Vec::new());
    };
    let headers: Vec<&str> = header.iter().map(str::trim).collect();
    let positions = kind.column_positions(&headers);

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        let cells: Vec<CellValue> = record.iter().map(cell_value).collect();
        if cells.iter().all(CellValue::is_blank) {
            continue;
        }
        rows.push(ImportRow::from_cells(kind, &positions, &cells));
    }
    tracing::debug!(%kind, rows = rows.len(), delimiter = %char::from(delimiter), "parsed delimited text");
    Ok(rows)
}

/// The separator that occurs most often on the first line.
fn sniff_delimiter(text: &str) -> u8 {
    let header = text.lines().next().unwrap_or_default();
    DELIMITERS
        .iter()
        .rev()
        .copied()
        .max_by_key(|&d| header.bytes().filter(|&b| b == d).count())
        .unwrap_or(b',')
}

fn cell_value(field: &str) -> CellValue {
    if field.trim().is_empty() {
        CellValue::Null
    } else {
        CellValue::Text(field.to_string())
    }
}
