//! Parser error types for roll-parser.

/// Errors that can occur while reading an uploaded spreadsheet.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("Unreadable workbook: {0}")]
    Workbook(String),

    #[error("Unreadable delimited text: {0}")]
    Delimited(String),

    /// Neither a workbook container nor UTF-8 text.
    #[error("Upload is not tabular data")]
    NotTabular,

    #[error("Workbook has no sheets")]
    NoSheet,

    #[error("Upload is empty")]
    EmptyUpload,
}

impl From<calamine::Error> for ParserError {
    fn from(e: calamine::Error) -> Self {
        Self::Workbook(e.to_string())
    }
}

impl From<csv::Error> for ParserError {
    fn from(e: csv::Error) -> Self {
        Self::Delimited(e.to_string())
    }
}
