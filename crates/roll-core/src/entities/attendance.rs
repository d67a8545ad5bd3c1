use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One check-in event. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Attendance {
    pub id: i64,
    pub date: NaiveDate,
    /// Server-local time with its UTC offset, `HH:MM:SS+HH:MM`.
    pub time: String,
    pub student_ra: String,
    pub user_id: i64,
}

/// A row of the attendance report, labelled for spreadsheet export.
///
/// `time` is already shifted to the report's configured UTC offset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceReportRow {
    #[serde(rename = "Data")]
    pub date: NaiveDate,
    #[serde(rename = "Horário")]
    pub time: String,
    #[serde(rename = "RA do Aluno")]
    pub student_ra: String,
    #[serde(rename = "Nome do Aluno")]
    pub student_name: String,
    #[serde(rename = "Nome da Sala")]
    pub class_name: String,
}
