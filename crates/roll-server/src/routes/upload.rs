//! Spreadsheet roster uploads.
//!
//! The `file` field is read into memory (bounded by the router's body
//! limit), parsed on a blocking thread, then imported in one transaction
//! under the configured deadline. Parsing does not count against it.

use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use tokio::time::Instant;

use roll_core::enums::ImportKind;
use roll_core::responses::{INSERTED_MESSAGE, ImportResponse};
use roll_db::DatabaseError;

use crate::error::ApiError;
use crate::state::AppState;

/// Multipart field holding the workbook.
const FILE_FIELD: &str = "file";

/// `POST /api/upload/classes`
pub async fn upload_classes(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>, ApiError> {
    import_upload(&state, ImportKind::Class, multipart).await
}

/// `POST /api/upload/students`
pub async fn upload_students(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>, ApiError> {
    import_upload(&state, ImportKind::Student, multipart).await
}

async fn import_upload(
    state: &AppState,
    kind: ImportKind,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<ImportResponse>, ApiError> {
    let mut multipart = multipart.map_err(|e| ApiError::Parse(e.body_text()))?;
    let bytes = read_file_field(&mut multipart).await?;
    tracing::debug!(%kind, bytes = bytes.len(), "upload received");

    let rows = tokio::task::spawn_blocking(move || roll_parser::parse_workbook(bytes, kind))
        .await
        .map_err(|e| ApiError::Parse(format!("parser task failed: {e}")))??;

    let deadline = Instant::now() + state.import_timeout;
    let outcome = tokio::time::timeout_at(
        deadline,
        state.service.import_rows(kind, &rows, Some(deadline)),
    )
    .await
    .map_err(|_| ApiError::Timeout)?
    .map_err(|e| match e {
        DatabaseError::DeadlineExceeded { .. } => ApiError::Timeout,
        other => ApiError::ImportFailed(other),
    })?;

    Ok(Json(ImportResponse {
        message: INSERTED_MESSAGE.to_string(),
        inserted: outcome.rows,
    }))
}

async fn read_file_field(multipart: &mut Multipart) -> Result<Vec<u8>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Parse(e.body_text()))?
    {
        if field.name() == Some(FILE_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Parse(e.body_text()))?;
            return Ok(bytes.to_vec());
        }
    }
    Err(ApiError::Parse(format!(
        "multipart body has no '{FILE_FIELD}' field"
    )))
}
