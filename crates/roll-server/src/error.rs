//! API error type and its HTTP mapping.
//!
//! Every crate's error converges here. The response body is always
//! `{"error": <short message>}`; the underlying cause is only logged.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use roll_core::errors::CoreError;
use roll_core::responses::ErrorResponse;
use roll_db::DatabaseError;
use roll_lookup::LookupError;
use roll_parser::ParserError;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed query string, body, or URL.
    #[error("{0}")]
    BadRequest(String),

    /// The upload could not be read as a workbook.
    #[error("Error processing file")]
    Parse(String),

    /// A batch insert or the commit failed; nothing was kept.
    #[error("Failed to insert data")]
    ImportFailed(#[source] DatabaseError),

    #[error("Database query failed")]
    Query(#[source] DatabaseError),

    /// The lookup page had no RA after the marker label.
    #[error("RA not found.")]
    NotFound,

    /// The lookup page could not be fetched.
    #[error("Failed to fetch page")]
    Upstream(#[source] LookupError),

    /// The import did not finish within `import.timeout_secs`.
    #[error("Import timed out")]
    Timeout,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Parse(_) => StatusCode::BAD_REQUEST,
            Self::ImportFailed(_) | Self::Query(_) | Self::NotFound => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Timeout => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Detail for the log line; never sent to the client.
    fn cause(&self) -> Option<String> {
        match self {
            Self::Parse(cause) => Some(cause.clone()),
            Self::ImportFailed(e) | Self::Query(e) => Some(e.to_string()),
            Self::Upstream(e) => Some(e.to_string()),
            Self::BadRequest(_) | Self::NotFound | Self::Timeout => None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let cause = self.cause().unwrap_or_default();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, %cause, "request failed");
        } else {
            tracing::debug!(status = status.as_u16(), error = %self, %cause, "request rejected");
        }
        let body = ErrorResponse {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl From<DatabaseError> for ApiError {
    fn from(e: DatabaseError) -> Self {
        match e {
            DatabaseError::ImportFailed { .. } => Self::ImportFailed(e),
            DatabaseError::DeadlineExceeded { .. } => Self::Timeout,
            other => Self::Query(other),
        }
    }
}

impl From<ParserError> for ApiError {
    fn from(e: ParserError) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<LookupError> for ApiError {
    fn from(e: LookupError) -> Self {
        match e {
            LookupError::InvalidUrl(_) | LookupError::HostNotAllowed(_) => {
                Self::BadRequest(e.to_string())
            }
            LookupError::NotFound => Self::NotFound,
            LookupError::Http(_) | LookupError::Api { .. } => Self::Upstream(e),
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation(msg) => Self::BadRequest(msg),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::BadRequest("x".into()), 400, "x")]
    #[case(ApiError::Parse("zip".into()), 400, "Error processing file")]
    #[case(
        ApiError::ImportFailed(DatabaseError::ImportFailed { batch: 2, reason: "FOREIGN KEY".into() }),
        500,
        "Failed to insert data"
    )]
    #[case(ApiError::Query(DatabaseError::NoResult), 500, "Database query failed")]
    #[case(ApiError::NotFound, 500, "RA not found.")]
    #[case(ApiError::Upstream(LookupError::Api { status: 503, message: String::new() }), 502, "Failed to fetch page")]
    #[case(ApiError::Timeout, 504, "Import timed out")]
    fn status_and_message(#[case] error: ApiError, #[case] status: u16, #[case] message: &str) {
        assert_eq!(error.status().as_u16(), status);
        assert_eq!(error.to_string(), message);
    }

    #[test]
    fn database_errors_split_on_import() {
        let import = ApiError::from(DatabaseError::ImportFailed {
            batch: 1,
            reason: "UNIQUE".into(),
        });
        assert!(matches!(import, ApiError::ImportFailed(_)));
        assert!(matches!(
            ApiError::from(DatabaseError::PoolClosed),
            ApiError::Query(_)
        ));
        assert!(matches!(
            ApiError::from(DatabaseError::DeadlineExceeded { completed: 2 }),
            ApiError::Timeout
        ));
    }

    #[test]
    fn lookup_errors_map_by_cause() {
        assert!(matches!(
            ApiError::from(LookupError::InvalidUrl("x".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(LookupError::HostNotAllowed("h".into())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(ApiError::from(LookupError::NotFound), ApiError::NotFound));
    }

    #[test]
    fn validation_becomes_bad_request() {
        let e = ApiError::from(CoreError::Validation("userId must be an integer".into()));
        assert_eq!(e.status(), StatusCode::BAD_REQUEST);
        assert_eq!(e.to_string(), "userId must be an integer");
    }
}
