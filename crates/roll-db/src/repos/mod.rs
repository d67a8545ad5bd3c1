//! Roster queries, attendance operations and the bulk importer.
//!
//! Each module adds methods to [`RollService`](crate::service::RollService).

pub mod attendance;
pub mod classes;
pub mod grades;
pub mod import;
pub mod students;
pub mod years;
