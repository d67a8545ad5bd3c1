//! # roll-server
//!
//! HTTP API for the rollcall attendance backend, built on axum.
//!
//! | Route | Handler |
//! |---|---|
//! | `GET /api/students` | [`routes::list_students`] |
//! | `GET /api/years` | [`routes::list_years`] |
//! | `GET /api/grades` | [`routes::list_grades`] |
//! | `GET /api/classes` | [`routes::list_classes`] |
//! | `GET /api/ra` | [`routes::lookup_ra`] |
//! | `POST /api/upload/classes` | [`routes::upload_classes`] |
//! | `POST /api/upload/students` | [`routes::upload_students`] |
//! | `POST /api/mark-attendance` | [`routes::mark_attendance`] |
//! | `GET /api/attendances` | [`routes::attendance_report`] |
//!
//! The `rollcalld` binary wires config, the database pool and this router
//! together.

pub mod cli;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;

use std::future::Future;

use tokio::net::TcpListener;

/// Serve the API on `listener` until `shutdown` resolves.
///
/// # Errors
///
/// Returns the I/O error that stopped the server.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let app = router(state);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}
