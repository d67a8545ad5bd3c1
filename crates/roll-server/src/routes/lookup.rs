use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use serde::Deserialize;

use roll_core::responses::RaResponse;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RaQuery {
    pub url: Option<String>,
}

/// `GET /api/ra?url=`
pub async fn lookup_ra(
    State(state): State<AppState>,
    query: Result<Query<RaQuery>, QueryRejection>,
) -> Result<Json<RaResponse>, ApiError> {
    let Query(RaQuery { url }) = query?;
    let url = url
        .filter(|u| !u.trim().is_empty())
        .ok_or_else(|| ApiError::BadRequest("url is required".into()))?;
    let ra = state.lookup.lookup_ra(&url).await?;
    Ok(Json(RaResponse { ra }))
}
