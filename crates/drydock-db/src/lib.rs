//! # drydock-db
//!
//! libSQL storage for drydock repair records.
//!
//! Owns the relational schema (vessels, repairs, component and config change
//! logs, the checklist catalog and per-repair checklist state) and exposes
//! every repair-facing operation as a method on [`service::RepairService`].
//!
//! Uses the `libsql` crate with a local database file, or `:memory:` in tests.

pub mod error;
pub mod helpers;
mod migrations;
pub mod repos;
pub mod service;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::DatabaseError;
pub use repos::repair::RepairFilter;
pub use service::RepairService;
use std::ops::Deref;
use std::sync::Arc;

use libsql::Builder;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Path that selects a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Central database handle.
///
/// Wraps a libSQL database and a primary connection used for migrations.
/// Operations obtain their own unit-of-work connection via [`Self::connect`].
pub struct DrydockDb {
    db: libsql::Database,
    conn: libsql::Connection,
    /// Set for `:memory:`, where the primary connection is the only view of
    /// the data and units of work must take turns on it.
    shared: Option<Arc<Mutex<libsql::Connection>>>,
}

/// Connection held for one unit of work.
///
/// Dereferences to [`libsql::Connection`]. For a shared in-memory
/// connection it also holds the lock, so a second unit of work waits until
/// this one is dropped instead of joining its transaction.
pub enum UnitOfWork {
    Owned(libsql::Connection),
    Shared(OwnedMutexGuard<libsql::Connection>),
}

impl Deref for UnitOfWork {
    type Target = libsql::Connection;

    fn deref(&self) -> &Self::Target {
        match self {
            Self::Owned(conn) => conn,
            Self::Shared(guard) => &**guard,
        }
    }
}

impl DrydockDb {
    /// Open a local database at the given path.
    ///
    /// Runs migrations automatically on first open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        Self::configure(&conn).await?;

        let shared = (path == IN_MEMORY).then(|| Arc::new(Mutex::new(conn.clone())));
        let drydock_db = Self { db, conn, shared };
        drydock_db.run_migrations().await?;
        tracing::debug!(path, "database opened");
        Ok(drydock_db)
    }

    /// Acquire a connection for one unit of work.
    ///
    /// File-backed databases get a fresh connection each call, released when
    /// the caller drops it. An in-memory database exists only on its primary
    /// connection, so that connection is handed out under a lock.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a connection cannot be opened.
    pub async fn connect(&self) -> Result<UnitOfWork, DatabaseError> {
        if let Some(shared) = &self.shared {
            return Ok(UnitOfWork::Shared(Arc::clone(shared).lock_owned().await));
        }
        let conn = self.db.connect()?;
        Self::configure(&conn).await?;
        Ok(UnitOfWork::Owned(conn))
    }

    /// Access the primary libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Produce `bytes` random bytes as upper-case hex via libSQL's `randomblob`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or returns no rows.
    pub async fn random_hex(
        conn: &libsql::Connection,
        bytes: u8,
    ) -> Result<String, DatabaseError> {
        let mut rows = conn
            .query("SELECT upper(hex(randomblob(?1)))", [i64::from(bytes)])
            .await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        Ok(row.get::<String>(0)?)
    }

    /// Per-connection settings. Foreign keys must be enabled on every
    /// connection in SQLite.
    async fn configure(conn: &libsql::Connection) -> Result<(), DatabaseError> {
        conn.execute("PRAGMA foreign_keys = ON", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
        let mut rows = conn
            .query("PRAGMA busy_timeout = 5000", ())
            .await
            .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;
        while rows.next().await?.is_some() {}
        Ok(())
    }
}
