//! Class repository.

use roll_core::entities::Class;

use crate::error::DatabaseError;
use crate::helpers::Conditions;
use crate::service::RollService;

fn row_to_class(row: &libsql::Row) -> Result<Class, DatabaseError> {
    Ok(Class {
        id: row.get::<i64>(0)?,
        name: row.get::<String>(1)?,
        grade_id: row.get::<i64>(2)?,
        year_id: row.get::<i64>(3)?,
        course_id: row.get::<Option<i64>>(4)?,
    })
}

impl RollService {
    /// Classes filtered by year and/or grade. Absent filters match everything.
    pub async fn list_classes(
        &self,
        year_id: Option<i64>,
        grade_id: Option<i64>,
    ) -> Result<Vec<Class>, DatabaseError> {
        let mut conditions = Conditions::new();
        conditions
            .eq_opt("y.id", year_id)
            .eq_opt("g.id", grade_id);

        let sql = format!(
            "SELECT c.id, c.name, c.grade_id, c.year_id, c.course_id
             FROM class c
             JOIN grade g ON g.id = c.grade_id
             JOIN school_year y ON y.id = c.year_id{}
             ORDER BY c.id",
            conditions.where_clause()
        );
        tracing::debug!(%sql, "listing classes");
        self.pool()
            .query_map(&sql, conditions.into_params(), row_to_class)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{seed_reference_data, test_service};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(None, None, vec![10, 11, 12])]
    #[case(Some(2), None, vec![10, 11])]
    #[case(None, Some(3), vec![12])]
    #[case(Some(2), Some(2), vec![11])]
    #[case(Some(1), Some(1), vec![])]
    #[tokio::test]
    async fn filters_combine_with_and(
        #[case] year_id: Option<i64>,
        #[case] grade_id: Option<i64>,
        #[case] expected: Vec<i64>,
    ) {
        let db = test_service().await;
        seed_reference_data(&db.svc).await;

        let ids: Vec<_> = db
            .svc
            .list_classes(year_id, grade_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn keeps_optional_course() {
        let db = test_service().await;
        seed_reference_data(&db.svc).await;

        let classes = db.svc.list_classes(Some(2), None).await.unwrap();
        assert_eq!(classes[0].course_id, None);
        assert_eq!(classes[1].course_id, Some(3));
        assert_eq!(classes[1].name, "7A");
    }
}
