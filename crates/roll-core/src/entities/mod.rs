//! Entity structs for the rollcall tables.
//!
//! Listing structs mirror the flat rows the query handlers return, including
//! joined foreign columns.

mod attendance;
mod class;
mod grade;
mod student;
mod year;

pub use attendance::{Attendance, AttendanceReportRow};
pub use class::Class;
pub use grade::Grade;
pub use student::StudentListing;
pub use year::SchoolYear;
