//! Shared test utilities for roll-db unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use roll_config::{ImportConfig, ReportConfig};
    use roll_core::import::{CellValue, ImportRow};
    use tempfile::TempDir;

    use crate::pool::DbPool;
    use crate::service::RollService;

    /// A service over a file database in a temp dir. Keep the dir alive.
    pub struct TestDb {
        pub svc: RollService,
        _dir: TempDir,
    }

    /// File-backed service with a four-connection pool and the schema applied.
    pub async fn test_service() -> TestDb {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roll.db");
        let pool = DbPool::open_local(path.to_str().unwrap(), 4).await.unwrap();
        let svc = RollService::new(pool, &ImportConfig::default(), &ReportConfig::default());
        TestDb { svc, _dir: dir }
    }

    /// Years 1 (`2025`) and 2 (`2026`); grades 1..=3 numbered 6..=8;
    /// classes 10 (`6A`, 2026), 11 (`7A`, 2026), 12 (`8A`, 2025); user 4.
    pub async fn seed_reference_data(svc: &RollService) {
        let conn = svc.pool().acquire().await.unwrap();
        conn.execute_batch(
            "INSERT INTO school_year (id, label) VALUES (1, '2025'), (2, '2026');
             INSERT INTO grade (id, number) VALUES (1, 6), (2, 7), (3, 8);
             INSERT INTO class (id, name, grade_id, year_id, course_id) VALUES
                 (10, '6A', 1, 2, NULL),
                 (11, '7A', 2, 2, 3),
                 (12, '8A', 3, 1, NULL);
             INSERT INTO app_user (id, name) VALUES (4, 'Secretaria');",
        )
        .await
        .unwrap();
    }

    /// Insert one student directly.
    pub async fn insert_student(svc: &RollService, ra: &str, name: &str, class_id: i64) {
        svc.pool()
            .execute(
                "INSERT INTO student (ra, name, digit, class_id) VALUES (?1, ?2, NULL, ?3)",
                libsql::params![ra, name, class_id],
            )
            .await
            .unwrap();
    }

    /// `count` student rows for `class_id` with RAs starting at 1000.
    pub fn student_rows(count: usize, class_id: i64) -> Vec<ImportRow> {
        (0..count)
            .map(|i| {
                ImportRow::new(vec![
                    CellValue::Text(format!("{}", 1000 + i)),
                    CellValue::Text(format!("Aluno {i:04}")),
                    CellValue::Text("1".into()),
                    CellValue::Integer(class_id),
                ])
            })
            .collect()
    }

    /// Count rows in `table`.
    pub async fn count(svc: &RollService, table: &str) -> i64 {
        svc.pool()
            .query_one(&format!("SELECT COUNT(*) FROM {table}"), (), |row| {
                Ok(row.get::<i64>(0)?)
            })
            .await
            .unwrap()
    }
}
