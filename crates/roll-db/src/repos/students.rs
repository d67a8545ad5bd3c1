//! Student repository.

use roll_core::entities::StudentListing;

use crate::error::DatabaseError;
use crate::helpers::get_opt_string;
use crate::service::RollService;

fn row_to_student(row: &libsql::Row) -> Result<StudentListing, DatabaseError> {
    Ok(StudentListing {
        ra: row.get::<String>(0)?,
        name: row.get::<String>(1)?,
        digit: get_opt_string(row, 2)?,
        class_id: row.get::<i64>(3)?,
        year_id: row.get::<i64>(4)?,
        grade_id: row.get::<i64>(5)?,
    })
}

impl RollService {
    /// Every student with the year and grade of their class, ordered by name.
    pub async fn list_students(&self) -> Result<Vec<StudentListing>, DatabaseError> {
        self.pool()
            .query_map(
                "SELECT s.ra, s.name, s.digit, s.class_id, c.year_id, c.grade_id
                 FROM student s
                 JOIN class c ON c.id = s.class_id
                 JOIN school_year y ON y.id = c.year_id
                 JOIN grade g ON g.id = c.grade_id
                 ORDER BY s.name, s.ra",
                (),
                row_to_student,
            )
            .await
    }
}
