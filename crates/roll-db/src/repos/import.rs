//! Transactional bulk import of spreadsheet rows.
//!
//! All rows of one upload are written inside a single `BEGIN IMMEDIATE`
//! transaction on a single pooled connection, `batch_size` rows per
//! multi-row `INSERT`. Any failing batch rolls the whole upload back, so a
//! caller sees either every row or none of them.
//!
//! Local libSQL calls can finish without yielding, so an outer
//! `tokio::time::timeout` alone may never get to fire. A deadline passed to
//! [`RollService::import_rows`] is also checked before every batch
//! and before the commit.

use libsql::{Transaction, TransactionBehavior, Value};
use tokio::time::Instant;

use roll_core::enums::ImportKind;
use roll_core::import::ImportRow;

use crate::error::DatabaseError;
use crate::helpers::cell_to_value;
use crate::service::RollService;

/// What a successful import wrote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportOutcome {
    pub rows: usize,
    pub batches: usize,
}

/// `INSERT INTO t (a, b) VALUES (?1, ?2), (?3, ?4), ...` for `rows` rows.
fn insert_sql(kind: ImportKind, rows: usize) -> String {
    let columns = kind.columns();
    let width = columns.len();
    let names = columns
        .iter()
        .map(|c| c.column)
        .collect::<Vec<_>>()
        .join(", ");
    let groups = (0..rows)
        .map(|r| {
            let placeholders = (1..=width)
                .map(|c| format!("?{}", r * width + c))
                .collect::<Vec<_>>()
                .join(", ");
            format!("({placeholders})")
        })
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({names}) VALUES {groups}", kind.table())
}

impl RollService {
    /// Insert every row of an upload, or none of them.
    ///
    /// An empty upload commits an empty transaction and reports zero rows.
    /// With a `deadline`, the import rolls back once it is found passed
    /// before a batch or before the commit.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::InvalidState` for rows of the wrong width
    /// (before anything is written), `DatabaseError::ImportFailed` naming
    /// the 1-based batch whose `INSERT` (or the final commit) failed, and
    /// `DatabaseError::DeadlineExceeded` when the deadline passed.
    pub async fn import_rows(
        &self,
        kind: ImportKind,
        rows: &[ImportRow],
        deadline: Option<Instant>,
    ) -> Result<ImportOutcome, DatabaseError> {
        let width = kind.columns().len();
        if let Some(pos) = rows.iter().position(|r| r.values.len() != width) {
            return Err(DatabaseError::InvalidState(format!(
                "{kind} row {} has {} values, expected {width}",
                pos + 1,
                rows[pos].values.len()
            )));
        }
        let expired = || deadline.is_some_and(|d| Instant::now() >= d);

        let batch_size = self.effective_batch_size(width);
        let conn = self.pool().acquire().await?;
        let tx = conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .await?;

        let mut batches = 0;
        for (index, chunk) in rows.chunks(batch_size).enumerate() {
            let batch = index + 1;
            if expired() {
                tracing::warn!(%kind, completed = batches, "import deadline passed, rolling back");
                rollback(tx).await;
                return Err(DatabaseError::DeadlineExceeded { completed: batches });
            }
            if let Err(e) = insert_batch(&tx, kind, chunk).await {
                tracing::warn!(%kind, batch, error = %e, "import batch failed, rolling back");
                rollback(tx).await;
                return Err(DatabaseError::ImportFailed {
                    batch,
                    reason: e.to_string(),
                });
            }
            batches = batch;
        }

        if expired() {
            tracing::warn!(%kind, completed = batches, "import deadline passed before commit");
            rollback(tx).await;
            return Err(DatabaseError::DeadlineExceeded { completed: batches });
        }
        if let Err(e) = tx.commit().await {
            tracing::warn!(%kind, error = %e, "import commit failed");
            return Err(DatabaseError::ImportFailed {
                batch: batches.max(1),
                reason: e.to_string(),
            });
        }

        tracing::info!(%kind, rows = rows.len(), batches, batch_size, "import committed");
        Ok(ImportOutcome {
            rows: rows.len(),
            batches,
        })
    }
}

async fn insert_batch(
    tx: &Transaction,
    kind: ImportKind,
    chunk: &[ImportRow],
) -> Result<u64, libsql::Error> {
    let sql = insert_sql(kind, chunk.len());
    let params: Vec<Value> = chunk
        .iter()
        .flat_map(|row| row.values.iter().map(cell_to_value))
        .collect();
    tx.execute(&sql, libsql::params::Params::Positional(params))
        .await
}

async fn rollback(tx: Transaction) {
    if let Err(e) = tx.rollback().await {
        // The guard discards a connection still inside a transaction.
        tracing::error!(error = %e, "import rollback failed");
    }
}
