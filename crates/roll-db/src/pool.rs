//! Bounded libSQL connection pool.
//!
//! A `libsql::Database` hands out any number of connections; the pool caps how
//! many are in use at once with a semaphore and keeps released connections in
//! an idle list for reuse. Callers hold a [`PooledConnection`] guard; dropping
//! it returns the connection and its permit on every exit path, including
//! errors and panics.

use std::ops::Deref;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use libsql::params::IntoParams;
use libsql::{Builder, Connection, Database, Row};
use tokio::sync::{OwnedSemaphorePermit, Semaphore};

use roll_config::DatabaseConfig;

use crate::error::DatabaseError;

/// Shared handle to the pool. Cloning is cheap.
#[derive(Clone)]
pub struct DbPool {
    inner: Arc<PoolInner>,
}

struct PoolInner {
    db: Database,
    idle: Mutex<Vec<Connection>>,
    permits: Arc<Semaphore>,
    size: usize,
    local: bool,
    busy_timeout: Duration,
}

impl DbPool {
    /// Open the configured database (remote when URL and token are set).
    ///
    /// `:memory:` databases are private to each connection, so their pool is
    /// clamped to a single connection. Applies the schema when
    /// `apply_schema` is set.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or the schema
    /// cannot be applied.
    pub async fn open(config: &DatabaseConfig) -> Result<Self, DatabaseError> {
        let local = !config.is_remote();
        let db = if local {
            Builder::new_local(&config.path).build().await?
        } else {
            Builder::new_remote(config.url.clone(), config.auth_token.clone())
                .build()
                .await?
        };
        let size = if config.is_memory() {
            1
        } else {
            config.pool_size.max(1)
        };

        let pool = Self {
            inner: Arc::new(PoolInner {
                db,
                idle: Mutex::new(Vec::with_capacity(size)),
                permits: Arc::new(Semaphore::new(size)),
                size,
                local,
                busy_timeout: Duration::from_millis(config.busy_timeout_ms),
            }),
        };

        if local && !config.is_memory() {
            let conn = pool.acquire().await?;
            // journal_mode answers with a row, so it goes through query().
            conn.query("PRAGMA journal_mode = WAL", ())
                .await
                .map_err(|e| DatabaseError::Connection(format!("PRAGMA journal_mode: {e}")))?;
        }

        if config.apply_schema {
            pool.apply_schema().await?;
        }

        tracing::info!(
            location = if local { config.path.as_str() } else { config.url.as_str() },
            size,
            "database pool ready"
        );
        Ok(pool)
    }

    /// Open a local database file with `size` connections and the schema applied.
    ///
    /// # Errors
    ///
    /// Same as [`Self::open`].
    pub async fn open_local(path: &str, size: usize) -> Result<Self, DatabaseError> {
        let config = DatabaseConfig {
            path: path.to_string(),
            pool_size: size,
            ..DatabaseConfig::default()
        };
        Self::open(&config).await
    }

    /// Wait for a free slot and check out a connection.
    ///
    /// Reuses an idle connection when one exists, otherwise opens a new one.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::PoolClosed` if the pool was closed, or a
    /// connection error if a new connection cannot be configured.
    pub async fn acquire(&self) -> Result<PooledConnection, DatabaseError> {
        let permit = Arc::clone(&self.inner.permits)
            .acquire_owned()
            .await
            .map_err(|_| DatabaseError::PoolClosed)?;

        let conn = match self.inner.pop_idle() {
            Some(conn) => conn,
            None => self.inner.connect().await?,
        };

        Ok(PooledConnection {
            conn,
            pool: Arc::clone(&self.inner),
            _permit: permit,
        })
    }

    /// Maximum number of connections checked out at once.
    #[must_use]
    pub fn size(&self) -> usize {
        self.inner.size
    }

    /// Number of connections that can be checked out right now.
    #[must_use]
    pub fn available(&self) -> usize {
        self.inner.permits.available_permits()
    }

    /// Number of opened connections waiting for reuse.
    #[must_use]
    pub fn idle(&self) -> usize {
        self.inner
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Stop handing out connections. Waiters get `PoolClosed`.
    pub fn close(&self) {
        self.inner.permits.close();
        self.inner
            .idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Execute one statement on a pooled connection.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if no connection is available or the statement fails.
    pub async fn execute(
        &self,
        sql: &str,
        params: impl IntoParams + Send,
    ) -> Result<u64, DatabaseError> {
        let conn = self.acquire().await?;
        Ok(conn.execute(sql, params).await?)
    }

    /// Run a query and map every row.
    ///
    /// The connection is held until the last row has been read.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query or any row mapping fails.
    pub async fn query_map<T, F>(
        &self,
        sql: &str,
        params: impl IntoParams + Send,
        map: F,
    ) -> Result<Vec<T>, DatabaseError>
    where
        T: Send,
        F: Fn(&Row) -> Result<T, DatabaseError> + Send,
    {
        let conn = self.acquire().await?;
        let mut rows = conn.query(sql, params).await?;
        let mut out = Vec::new();
        while let Some(row) = rows.next().await? {
            out.push(map(&row)?);
        }
        Ok(out)
    }

    /// Run a query and map its first row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NoResult` if the query yields no rows.
    pub async fn query_one<T, F>(
        &self,
        sql: &str,
        params: impl IntoParams + Send,
        map: F,
    ) -> Result<T, DatabaseError>
    where
        T: Send,
        F: FnOnce(&Row) -> Result<T, DatabaseError> + Send,
    {
        let conn = self.acquire().await?;
        let mut rows = conn.query(sql, params).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        map(&row)
    }
}

impl PoolInner {
    fn pop_idle(&self) -> Option<Connection> {
        self.idle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop()
    }

    async fn connect(&self) -> Result<Connection, DatabaseError> {
        let conn = self.db.connect()?;

        // Foreign keys are per-connection in SQLite.
        let fk = conn.execute("PRAGMA foreign_keys = ON", ()).await;
        if self.local {
            fk.map_err(|e| DatabaseError::Connection(format!("PRAGMA foreign_keys: {e}")))?;
            conn.query(
                &format!("PRAGMA busy_timeout = {}", self.busy_timeout.as_millis()),
                (),
            )
            .await
            .map_err(|e| DatabaseError::Connection(format!("PRAGMA busy_timeout: {e}")))?;
        } else if let Err(e) = fk {
            tracing::warn!(error = %e, "remote connection refused PRAGMA foreign_keys");
        }

        tracing::debug!("opened pooled connection");
        Ok(conn)
    }
}

/// A checked-out connection. Dereferences to [`libsql::Connection`].
///
/// On drop the connection goes back to the idle list, unless it is still
/// inside a transaction, in which case it is discarded.
pub struct PooledConnection {
    conn: Connection,
    pool: Arc<PoolInner>,
    _permit: OwnedSemaphorePermit,
}

impl Deref for PooledConnection {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        &self.conn
    }
}

impl Drop for PooledConnection {
    fn drop(&mut self) {
        if self.pool.permits.is_closed() {
            return;
        }
        if self.conn.is_autocommit() {
            self.pool
                .idle
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(self.conn.clone());
        } else {
            tracing::warn!("discarding pooled connection left inside a transaction");
        }
    }
}
