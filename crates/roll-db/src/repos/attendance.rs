//! Attendance repository: recording check-ins and the per-class report.
//!
//! Check-ins are stamped with the server's local clock, never the caller's.
//! The date is the local calendar date; the time keeps its UTC offset
//! (`HH:MM:SS+HH:MM`), which SQLite's `time()` folds back to UTC. The report
//! then shifts that UTC time to the configured report offset and filters on
//! the stored local date.

use chrono::{DateTime, FixedOffset, Local, NaiveDate};

use roll_core::entities::{Attendance, AttendanceReportRow};

use crate::error::DatabaseError;
use crate::helpers::parse_date;
use crate::service::RollService;

fn row_to_attendance(row: &libsql::Row) -> Result<Attendance, DatabaseError> {
    Ok(Attendance {
        id: row.get::<i64>(0)?,
        date: parse_date(&row.get::<String>(1)?)?,
        time: row.get::<String>(2)?,
        student_ra: row.get::<String>(3)?,
        user_id: row.get::<i64>(4)?,
    })
}

fn row_to_report(row: &libsql::Row) -> Result<AttendanceReportRow, DatabaseError> {
    Ok(AttendanceReportRow {
        date: parse_date(&row.get::<String>(0)?)?,
        time: row.get::<String>(1)?,
        student_ra: row.get::<String>(2)?,
        student_name: row.get::<String>(3)?,
        class_name: row.get::<String>(4)?,
    })
}

impl RollService {
    /// Record one check-in for `ra` by `user_id`, stamped now in server-local time.
    ///
    /// Unknown students or users are rejected by the foreign keys.
    pub async fn mark_attendance(
        &self,
        ra: &str,
        user_id: i64,
    ) -> Result<Attendance, DatabaseError> {
        self.mark_attendance_at(ra, user_id, Local::now().fixed_offset())
            .await
    }

    /// Record one check-in stamped at `at`.
    pub async fn mark_attendance_at(
        &self,
        ra: &str,
        user_id: i64,
        at: DateTime<FixedOffset>,
    ) -> Result<Attendance, DatabaseError> {
        let attendance = self
            .pool()
            .query_one(
                "INSERT INTO attendance (date, time, student_ra, user_id)
                 VALUES (?1, ?2, ?3, ?4)
                 RETURNING id, date, time, student_ra, user_id",
                libsql::params![
                    at.date_naive().to_string(),
                    at.format("%H:%M:%S%:z").to_string(),
                    ra,
                    user_id
                ],
                row_to_attendance,
            )
            .await?;
        tracing::debug!(id = attendance.id, ra, user_id, time = %attendance.time, "attendance recorded");
        Ok(attendance)
    }

    /// Check-ins of one class between two local dates, inclusive.
    ///
    /// A start after the end is not an error; it just matches nothing.
    pub async fn attendance_report(
        &self,
        start: NaiveDate,
        end: NaiveDate,
        class_id: i64,
    ) -> Result<Vec<AttendanceReportRow>, DatabaseError> {
        self.pool()
            .query_map(
                "SELECT a.date, time(a.time, ?4), s.ra, s.name, c.name
                 FROM attendance a
                 JOIN student s ON s.ra = a.student_ra
                 JOIN class c ON c.id = s.class_id
                 WHERE ?1 <= a.date AND a.date <= ?2 AND c.id = ?3
                 ORDER BY a.date, a.time, a.id",
                libsql::params![
                    start.to_string(),
                    end.to_string(),
                    class_id,
                    self.report_time_modifier()
                ],
                row_to_report,
            )
            .await
    }
}
