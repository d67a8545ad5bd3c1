//! Grade repository.
//!
//! Grades are reached through their classes: a grade with no class in any
//! school year is not listed.

use roll_core::entities::Grade;

use crate::error::DatabaseError;
use crate::helpers::Conditions;
use crate::service::RollService;

fn row_to_grade(row: &libsql::Row) -> Result<Grade, DatabaseError> {
    Ok(Grade {
        id: row.get::<i64>(0)?,
        number: row.get::<i64>(1)?,
    })
}

impl RollService {
    /// Distinct grades that have at least one class, optionally in one year.
    pub async fn list_grades(&self, year_id: Option<i64>) -> Result<Vec<Grade>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions.eq_opt("y.id", year_id);

        let sql = format!(
            "SELECT g.id, g.number
             FROM grade g
             JOIN class c ON c.grade_id = g.id
             JOIN school_year y ON y.id = c.year_id{}
             GROUP BY g.id, g.number
             ORDER BY g.number, g.id",
            conditions.where_clause()
        );
        tracing::debug!(%sql, "listing grades");
        self.pool()
            .query_map(&sql, conditions.into_params(), row_to_grade)
            .await
    }
}
