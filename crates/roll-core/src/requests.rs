//! Request bodies and query strings accepted by the HTTP API.
//!
//! Fields arrive the way browsers send them: ids may be JSON numbers or
//! strings, and query values are always strings. Each type validates into
//! typed values and reports problems as [`CoreError::Validation`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A JSON scalar that may be a number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseScalar {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl LooseScalar {
    /// Text form. Integral floats drop their fraction.
    #[must_use]
    pub fn to_text(&self) -> String {
        match self {
            Self::Integer(n) => n.to_string(),
            Self::Float(f) => integral(*f).map_or_else(|| f.to_string(), |n| n.to_string()),
            Self::Text(s) => s.trim().to_string(),
        }
    }

    /// Integer value, accepting integral floats and numeric strings.
    pub fn to_integer(&self, field: &str) -> Result<i64, CoreError> {
        match self {
            Self::Integer(n) => Ok(*n),
            Self::Float(f) => integral(*f).ok_or_else(|| not_integer(field, &f.to_string())),
            Self::Text(s) => s.trim().parse().map_err(|_| not_integer(field, s)),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn integral(f: f64) -> Option<i64> {
    (f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64).then_some(f as i64)
}

fn not_integer(field: &str, value: &str) -> CoreError {
    CoreError::Validation(format!("{field} must be an integer, got '{value}'"))
}

/// Body of `POST /api/mark-attendance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkAttendanceRequest {
    pub ra: LooseScalar,
    pub user_id: LooseScalar,
}

impl MarkAttendanceRequest {
    /// Validated `(ra, user_id)`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for a blank RA or a non-integer user id.
    pub fn validate(&self) -> Result<(String, i64), CoreError> {
        let ra = self.ra.to_text();
        if ra.is_empty() {
            return Err(CoreError::Validation("ra must not be blank".into()));
        }
        let user_id = self.user_id.to_integer("userId")?;
        Ok((ra, user_id))
    }
}

/// Parse an optional integer query value. Blank counts as absent.
///
/// # Errors
///
/// Returns `CoreError::Validation` if a present value is not an integer.
pub fn parse_optional_id(field: &str, value: Option<&str>) -> Result<Option<i64>, CoreError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(v) => v.parse().map(Some).map_err(|_| not_integer(field, v)),
    }
}

/// `?yearId=` filter of `GET /api/grades`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeFilter {
    pub year_id: Option<String>,
}

impl GradeFilter {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `yearId` is not an integer.
    pub fn year_id(&self) -> Result<Option<i64>, CoreError> {
        parse_optional_id("yearId", self.year_id.as_deref())
    }
}

/// `?yearId=&gradeId=` filters of `GET /api/classes`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassFilter {
    pub year_id: Option<String>,
    pub grade_id: Option<String>,
}

impl ClassFilter {
    /// Validated `(year_id, grade_id)`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first non-integer filter.
    pub fn ids(&self) -> Result<(Option<i64>, Option<i64>), CoreError> {
        Ok((
            parse_optional_id("yearId", self.year_id.as_deref())?,
            parse_optional_id("gradeId", self.grade_id.as_deref())?,
        ))
    }
}

/// Query string of `GET /api/attendances`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub class_id: Option<String>,
}

/// A validated report range for one class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub class_id: i64,
}

impl ReportQuery {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` for missing parameters, dates not in
    /// `YYYY-MM-DD` form, or a non-integer class id.
    pub fn validate(&self) -> Result<ReportRange, CoreError> {
        let start = parse_date("startDate", self.start_date.as_deref())?;
        let end = parse_date("endDate", self.end_date.as_deref())?;
        let class_id = parse_optional_id("classId", self.class_id.as_deref())?
            .ok_or_else(|| CoreError::Validation("classId is required".into()))?;
        Ok(ReportRange {
            start,
            end,
            class_id,
        })
    }
}

fn parse_date(field: &str, value: Option<&str>) -> Result<NaiveDate, CoreError> {
    let value = value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| CoreError::Validation(format!("{field} is required")))?;
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        CoreError::Validation(format!("{field} must be a YYYY-MM-DD date, got '{value}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn body(json: &str) -> MarkAttendanceRequest {
        serde_json::from_str(json).unwrap()
    }

    #[rstest]
    #[case(r#"{"ra": "123", "userId": "4"}"#, "123", 4)]
    #[case(r#"{"ra": 123, "userId": 4}"#, "123", 4)]
    #[case(r#"{"ra": " 99887 ", "userId": 4.0}"#, "99887", 4)]
    fn attendance_body_accepts_strings_and_numbers(
        #[case] json: &str,
        #[case] ra: &str,
        #[case] user_id: i64,
    ) {
        assert_eq!(body(json).validate().unwrap(), (ra.to_string(), user_id));
    }

    #[rstest]
    #[case(r#"{"ra": "123", "userId": "quatro"}"#)]
    #[case(r#"{"ra": "123", "userId": 4.5}"#)]
    #[case(r#"{"ra": "  ", "userId": 4}"#)]
    fn attendance_body_rejects_bad_values(#[case] json: &str) {
        assert!(matches!(body(json).validate(), Err(CoreError::Validation(_))));
    }

    #[test]
    fn attendance_body_requires_both_fields() {
        assert!(serde_json::from_str::<MarkAttendanceRequest>(r#"{"ra": "1"}"#).is_err());
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(""), None)]
    #[case(Some(" 7 "), Some(7))]
    fn optional_ids(#[case] raw: Option<&str>, #[case] expected: Option<i64>) {
        assert_eq!(parse_optional_id("yearId", raw).unwrap(), expected);
    }

    #[test]
    fn non_integer_filter_is_rejected() {
        let filter = ClassFilter {
            year_id: Some("2".into()),
            grade_id: Some("sexto".into()),
        };
        let err = filter.ids().unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.contains("gradeId")));
    }

    #[test]
    fn report_query_validates() {
        let query = ReportQuery {
            start_date: Some("2026-03-01".into()),
            end_date: Some("2026-03-31".into()),
            class_id: Some("10".into()),
        };
        let range = query.validate().unwrap();
        assert_eq!(range.start, NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
        assert_eq!(range.end, NaiveDate::from_ymd_opt(2026, 3, 31).unwrap());
        assert_eq!(range.class_id, 10);
    }

    #[rstest]
    #[case(Some("01/03/2026"), Some("2026-03-31"), Some("10"))]
    #[case(Some("2026-03-01"), None, Some("10"))]
    #[case(Some("2026-03-01"), Some("2026-03-31"), None)]
    #[case(Some("2026-03-01"), Some("2026-03-31"), Some("dez"))]
    #[case(Some("2026-02-30"), Some("2026-03-31"), Some("10"))]
    fn report_query_rejects(
        #[case] start: Option<&str>,
        #[case] end: Option<&str>,
        #[case] class_id: Option<&str>,
    ) {
        let query = ReportQuery {
            start_date: start.map(String::from),
            end_date: end.map(String::from),
            class_id: class_id.map(String::from),
        };
        assert!(query.validate().is_err());
    }
}
