//! Service layer over the connection pool.
//!
//! `RollService` owns the pool plus the settings the operations need (import
//! batch size, report time shift). All repo methods are implemented as
//! `impl RollService` in `crate::repos`.

use roll_config::{ImportConfig, ReportConfig, RollConfig};

use crate::error::DatabaseError;
use crate::pool::DbPool;

/// Highest parameter number SQLite accepts in one statement.
pub const MAX_BIND_PARAMS: usize = 32_766;

#[derive(Clone)]
pub struct RollService {
    pool: DbPool,
    batch_size: usize,
    report_time_modifier: String,
}

impl RollService {
    /// Wrap an open pool.
    #[must_use]
    pub fn new(pool: DbPool, import: &ImportConfig, report: &ReportConfig) -> Self {
        Self {
            pool,
            batch_size: import.batch_size.max(1),
            report_time_modifier: report.time_modifier(),
        }
    }

    /// Open the configured database and wrap it.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the pool cannot be opened.
    pub async fn open(config: &RollConfig) -> Result<Self, DatabaseError> {
        let pool = DbPool::open(&config.database).await?;
        Ok(Self::new(pool, &config.import, &config.report))
    }

    /// Override the import batch size.
    #[must_use]
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    #[must_use]
    pub const fn pool(&self) -> &DbPool {
        &self.pool
    }

    #[must_use]
    pub const fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// SQLite time modifier applied to check-in times in the report.
    #[must_use]
    pub fn report_time_modifier(&self) -> &str {
        &self.report_time_modifier
    }

    /// Rows per `INSERT` for a table with `width` columns.
    ///
    /// Capped so a single statement never exceeds [`MAX_BIND_PARAMS`].
    #[must_use]
    pub fn effective_batch_size(&self, width: usize) -> usize {
        let cap = (MAX_BIND_PARAMS / width.max(1)).max(1);
        self.batch_size.min(cap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batch_size_is_capped_by_bind_limit() {
        let pool = DbPool::open_local(":memory:", 1).await.unwrap();
        let import = ImportConfig {
            batch_size: 50_000,
            ..ImportConfig::default()
        };
        let svc = RollService::new(pool, &import, &ReportConfig::default());
        assert_eq!(svc.batch_size(), 50_000);
        assert_eq!(svc.effective_batch_size(5), 6_553);
        assert_eq!(svc.effective_batch_size(4), 8_191);

        let svc = svc.with_batch_size(100);
        assert_eq!(svc.effective_batch_size(5), 100);
    }

    #[tokio::test]
    async fn report_modifier_comes_from_config() {
        let pool = DbPool::open_local(":memory:", 1).await.unwrap();
        let report = ReportConfig {
            utc_offset_minutes: 60,
        };
        let svc = RollService::new(pool, &ImportConfig::default(), &report);
        assert_eq!(svc.report_time_modifier(), "+60 minutes");
    }
}
