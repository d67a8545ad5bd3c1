//! # roll-db
//!
//! libSQL storage for rollcall: a bounded connection pool, the roster and
//! attendance schema, and every operation the HTTP service exposes.
//!
//! Local files are the default; a remote libSQL server is used when a URL and
//! auth token are configured. Every connection enables foreign keys, and
//! tables are `STRICT`, so the store itself rejects rows that do not fit.

pub mod error;
pub mod helpers;
pub mod pool;
pub mod repos;
mod schema;
pub mod service;

mod test_support;

pub use error::DatabaseError;
pub use pool::{DbPool, PooledConnection};
pub use repos::import::ImportOutcome;
pub use service::RollService;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn schema_creates_all_tables() {
        let pool = DbPool::open_local(":memory:", 1).await.unwrap();
        let conn = pool.acquire().await.unwrap();

        for table in [
            "school_year",
            "grade",
            "class",
            "student",
            "app_user",
            "attendance",
        ] {
            let mut rows = conn
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn schema_is_idempotent() {
        let pool = DbPool::open_local(":memory:", 1).await.unwrap();
        pool.apply_schema().await.unwrap();
        pool.apply_schema().await.unwrap();
    }

    #[tokio::test]
    async fn skipping_schema_leaves_database_empty() {
        let config = roll_config::DatabaseConfig {
            path: ":memory:".into(),
            apply_schema: false,
            ..Default::default()
        };
        let pool = DbPool::open(&config).await.unwrap();
        let count = pool
            .query_one(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table'",
                (),
                |row| Ok(row.get::<i64>(0)?),
            )
            .await
            .unwrap();
        assert_eq!(count, 0);
    }
}
