//! Bootstrap schema.
//!
//! Embeds the DDL at compile time. Every statement uses `IF NOT EXISTS`, so
//! applying it on each startup is harmless.

use crate::error::DatabaseError;
use crate::pool::DbPool;

/// Roster tables, attendance log, and their indexes.
const SCHEMA_001: &str = include_str!("../schema/001_roster.sql");

impl DbPool {
    /// Create any missing tables and indexes.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Schema` if the DDL batch fails.
    pub async fn apply_schema(&self) -> Result<(), DatabaseError> {
        let conn = self.acquire().await?;
        conn.execute_batch(SCHEMA_001)
            .await
            .map_err(|e| DatabaseError::Schema(format!("001_roster: {e}")))?;
        Ok(())
    }
}
