//! Database error types for roll-db.

use thiserror::Error;

/// Errors from pool and database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Applying the bootstrap schema failed.
    #[error("Schema setup failed: {0}")]
    Schema(String),

    /// Opening or configuring a connection failed.
    #[error("Connection setup failed: {0}")]
    Connection(String),

    /// The pool was closed while waiting for a connection.
    #[error("Connection pool is closed")]
    PoolClosed,

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// A bulk import batch (1-based) or its commit failed; nothing was kept.
    #[error("Import failed at batch {batch}: {reason}")]
    ImportFailed { batch: usize, reason: String },

    /// A bulk import ran past its deadline after `completed` batches; nothing was kept.
    #[error("Import deadline passed after {completed} batches")]
    DeadlineExceeded { completed: usize },

    /// Invalid state encountered (e.g., malformed rows handed to the importer).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),
}
