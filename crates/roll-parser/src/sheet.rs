//! Spreadsheet upload parsing.
//!
//! Only the first sheet of a workbook is read. Its first row holds the headers; every
//! following row that has at least one non-blank cell becomes an
//! [`ImportRow`] with values ordered like [`ImportKind::columns`].

use std::io::Cursor;

use calamine::{Data, Range, Reader, open_workbook_auto_from_rs};

use roll_core::enums::ImportKind;
use roll_core::import::{CellValue, ImportRow};

use crate::delimited::parse_delimited;
use crate::error::ParserError;

/// Leading bytes of the containers calamine reads: zip (xlsx, xlsm, xlsb,
/// ods) and OLE compound files (xls).
const WORKBOOK_MAGIC: [&[u8]; 2] = [b"PK\x03\x04", b"\xD0\xCF\x11\xE0"];

/// Parse an uploaded workbook or delimited text file into import rows.
///
/// The format is sniffed from the bytes, not from a file name. Workbook
/// containers go through calamine; anything else that is UTF-8 text is read
/// as delimited text.
///
/// # Errors
///
/// Returns `ParserError::EmptyUpload` for zero bytes, `ParserError::Workbook`
/// if a workbook container cannot be read, `ParserError::NoSheet` if it has
/// no sheets, `ParserError::Delimited` for malformed text, and
/// `ParserError::NotTabular` for binary data that is not a workbook.
pub fn parse_workbook(bytes: Vec<u8>, kind: ImportKind) -> Result<Vec<ImportRow>, ParserError> {
    if bytes.is_empty() {
        return Err(ParserError::EmptyUpload);
    }
    if !WORKBOOK_MAGIC.iter().any(|magic| bytes.starts_with(magic)) {
        let text = String::from_utf8(bytes).map_err(|_| ParserError::NotTabular)?;
        return parse_delimited(&text, kind);
    }
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))?;
    let range = workbook.worksheet_range_at(0).ok_or(ParserError::NoSheet)??;
    let rows = rows_from_range(&range, kind);
    tracing::debug!(%kind, rows = rows.len(), "parsed first sheet");
    Ok(rows)
}

/// Turn a sheet range into import rows, headers taken from its first row.
#[must_use]
pub fn rows_from_range(range: &Range<Data>, kind: ImportKind) -> Vec<ImportRow> {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header_row.iter().map(header_text).collect();
    let positions = kind.column_positions(&headers);

    rows.filter_map(|row| {
        let cells: Vec<CellValue> = row.iter().map(cell_value).collect();
        if cells.iter().all(CellValue::is_blank) {
            return None;
        }
        Some(ImportRow::from_cells(kind, &positions, &cells))
    })
    .collect()
}

fn header_text(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// Raw cell value. Dates stay spreadsheet serial numbers.
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Null,
        Data::Int(n) => CellValue::Integer(*n),
        Data::Float(f) => CellValue::Real(*f),
        Data::Bool(b) => CellValue::Integer(i64::from(*b)),
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::DateTime(dt) => CellValue::Real(dt.as_f64()),
        Data::Error(e) => CellValue::Text(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn range(cells: &[&[Data]]) -> Range<Data> {
        let height = u32::try_from(cells.len()).unwrap();
        let width = u32::try_from(cells.iter().map(|r| r.len()).max().unwrap()).unwrap();
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in cells.iter().enumerate() {
            for (c, cell) in row.iter().enumerate() {
                let pos = (u32::try_from(r).unwrap(), u32::try_from(c).unwrap());
                range.set_value(pos, cell.clone());
            }
        }
        range
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn student_sheet_maps_headers_and_coerces() {
        let sheet = range(&[
            &[s("RA"), s("Nome"), s("name"), s("Digit"), s("Class ID")],
            &[Data::Float(99887.0), s("x"), s("João"), Data::Int(6), Data::Float(10.0)],
        ]);
        let rows = rows_from_range(&sheet, ImportKind::Student);
        assert_eq!(
            rows,
            vec![ImportRow::new(vec![
                CellValue::Text("99887".into()),
                CellValue::Text("João".into()),
                CellValue::Text("6".into()),
                CellValue::Integer(10),
            ])]
        );
    }

    #[test]
    fn blank_rows_are_skipped() {
        let sheet = range(&[
            &[s("id"), s("name"), s("grade"), s("year")],
            &[Data::Int(1), s("6A"), Data::Int(1), Data::Int(2)],
            &[Data::Empty, s("  "), Data::Empty, Data::Empty],
            &[Data::Int(2), s("6B"), Data::Int(1), Data::Int(2)],
        ]);
        let rows = rows_from_range(&sheet, ImportKind::Class);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].values[1], CellValue::Text("6B".into()));
        assert_eq!(rows[1].values[4], CellValue::Null);
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        let sheet = range(&[&[s("ra"), s("name")]]);
        assert!(rows_from_range(&sheet, ImportKind::Student).is_empty());
    }

    #[test]
    fn empty_range_has_no_rows() {
        let sheet: Range<Data> = Range::empty();
        assert!(rows_from_range(&sheet, ImportKind::Class).is_empty());
    }

    #[test]
    fn unmatched_values_pass_through() {
        let sheet = range(&[
            &[s("ra"), s("name"), s("class")],
            &[s("1"), s("Ana"), s("sala dez")],
        ]);
        let rows = rows_from_range(&sheet, ImportKind::Student);
        assert_eq!(rows[0].values[3], CellValue::Text("sala dez".into()));
        assert_eq!(rows[0].values[2], CellValue::Null);
    }

    #[test]
    fn booleans_become_integers() {
        assert_eq!(cell_value(&Data::Bool(true)), CellValue::Integer(1));
        assert_eq!(cell_value(&Data::Bool(false)), CellValue::Integer(0));
    }

    #[test]
    fn csv_text_is_read_as_rows() {
        let rows = parse_workbook(b"ra,name,digit,class\n1001,Ana,0,10\n".to_vec(), ImportKind::Student)
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].values[0], CellValue::Text("1001".into()));
        assert_eq!(rows[0].values[3], CellValue::Integer(10));
    }

    #[test]
    fn binary_garbage_is_not_tabular() {
        let err = parse_workbook(vec![0xff, 0xfe, 0x00, 0x9f, 0x92, 0x96], ImportKind::Student)
            .unwrap_err();
        assert!(matches!(err, ParserError::NotTabular), "got {err:?}");
    }

    #[test]
    fn truncated_zip_is_an_unreadable_workbook() {
        let err = parse_workbook(b"PK\x03\x04broken".to_vec(), ImportKind::Class).unwrap_err();
        assert!(matches!(err, ParserError::Workbook(_)), "got {err:?}");
    }

    #[test]
    fn zero_bytes_are_rejected() {
        let err = parse_workbook(Vec::new(), ImportKind::Student).unwrap_err();
        assert!(matches!(err, ParserError::EmptyUpload));
    }
}
