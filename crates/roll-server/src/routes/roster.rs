//! Roster listings: students, years, grades, classes.

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};

use roll_core::entities::{Class, Grade, SchoolYear, StudentListing};
use roll_core::requests::{ClassFilter, GradeFilter};

use crate::error::ApiError;
use crate::state::AppState;

/// `GET /api/students`
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<StudentListing>>, ApiError> {
    Ok(Json(state.service.list_students().await?))
}

/// `GET /api/years`
pub async fn list_years(State(state): State<AppState>) -> Result<Json<Vec<SchoolYear>>, ApiError> {
    Ok(Json(state.service.list_years().await?))
}

/// `GET /api/grades?yearId=`
pub async fn list_grades(
    State(state): State<AppState>,
    query: Result<Query<GradeFilter>, QueryRejection>,
) -> Result<Json<Vec<Grade>>, ApiError> {
    let Query(filter) = query?;
    let year_id = filter.year_id()?;
    Ok(Json(state.service.list_grades(year_id).await?))
}

/// `GET /api/classes?yearId=&gradeId=`
pub async fn list_classes(
    State(state): State<AppState>,
    query: Result<Query<ClassFilter>, QueryRejection>,
) -> Result<Json<Vec<Class>>, ApiError> {
    let Query(filter) = query?;
    let (year_id, grade_id) = filter.ids()?;
    Ok(Json(state.service.list_classes(year_id, grade_id).await?))
}
