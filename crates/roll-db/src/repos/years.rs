//! School year repository.

use roll_core::entities::SchoolYear;

use crate::error::DatabaseError;
use crate::service::RollService;

fn row_to_year(row: &libsql::Row) -> Result<SchoolYear, DatabaseError> {
    Ok(SchoolYear {
        id: row.get::<i64>(0)?,
        label: row.get::<String>(1)?,
    })
}

impl RollService {
    /// All school years, ordered by id.
    pub async fn list_years(&self) -> Result<Vec<SchoolYear>, DatabaseError> {
        self.pool()
            .query_map("SELECT id, label FROM school_year ORDER BY id", (), row_to_year)
            .await
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{seed_reference_data, test_service};
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn empty_store_lists_no_years() {
        let db = test_service().await;
        assert!(db.svc.list_years().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn years_come_back_in_id_order() {
        let db = test_service().await;
        seed_reference_data(&db.svc).await;

        let labels: Vec<_> = db
            .svc
            .list_years()
            .await
            .unwrap()
            .into_iter()
            .map(|y| (y.id, y.label))
            .collect();
        assert_eq!(labels, vec![(1, "2025".to_string()), (2, "2026".to_string())]);
    }
}
