//! Route table.

mod attendance;
mod lookup;
mod roster;
mod upload;

pub use attendance::{attendance_report, mark_attendance};
pub use lookup::lookup_ra;
pub use roster::{list_classes, list_grades, list_students, list_years};
pub use upload::{upload_classes, upload_students};

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::http::HeaderValue;
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::middleware::log_requests;
use crate::state::AppState;

/// Build the API router.
pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);
    let cors = cors_layer(&state.cors_origins);
    Router::new()
        .route("/api/students", get(list_students))
        .route("/api/years", get(list_years))
        .route("/api/grades", get(list_grades))
        .route("/api/classes", get(list_classes))
        .route("/api/ra", get(lookup_ra))
        .route("/api/upload/classes", post(upload_classes))
        .route("/api/upload/students", post(upload_students))
        .route("/api/mark-attendance", post(mark_attendance))
        .route("/api/attendances", get(attendance_report))
        .layer(body_limit)
        .layer(axum::middleware::from_fn(log_requests))
        .layer(cors)
        .with_state(state)
}

/// CORS for the browser front-end. No configured origins means any origin.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(error) => {
                tracing::warn!(%origin, %error, "ignoring unusable CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}
