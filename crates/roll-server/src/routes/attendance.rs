//! Attendance recording and the per-class report.

use axum::Json;
use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{Query, State};

use roll_core::entities::AttendanceReportRow;
use roll_core::requests::{MarkAttendanceRequest, ReportQuery};
use roll_core::responses::MessageResponse;

use crate::error::ApiError;
use crate::state::AppState;

/// `POST /api/mark-attendance` with `{ra, userId}`.
pub async fn mark_attendance(
    State(state): State<AppState>,
    body: Result<Json<MarkAttendanceRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let Json(body) = body?;
    let (ra, user_id) = body.validate()?;
    state.service.mark_attendance(&ra, user_id).await?;
    Ok(Json(MessageResponse::inserted()))
}

/// `GET /api/attendances?startDate=&endDate=&classId=`
pub async fn attendance_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> Result<Json<Vec<AttendanceReportRow>>, ApiError> {
    let Query(query) = query?;
    let range = query.validate()?;
    let rows = state
        .service
        .attendance_report(range.start, range.end, range.class_id)
        .await?;
    Ok(Json(rows))
}
