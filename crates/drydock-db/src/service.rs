//! Service layer hosting every repair-facing operation.
//!
//! `RepairService` wraps `DrydockDb`. All repo methods are implemented as
//! `impl RepairService` blocks in `repos/`.
//!
//! Every operation follows the same unit-of-work protocol:
//! 1. Acquire a connection (`DrydockDb::connect`)
//! 2. Begin a transaction if more than one row is written
//! 3. Execute SQL
//! 4. Commit on success, roll back on any error
//! 5. Drop the connection on every exit path

use crate::{DrydockDb, UnitOfWork};
use crate::error::DatabaseError;

/// Limit applied to repair listings when the caller does not give one.
pub const DEFAULT_LIST_LIMIT: u32 = 50;

/// Orchestrates repair record mutations and reads.
pub struct RepairService {
    db: DrydockDb,
}

impl RepairService {
    /// Create a new service wrapping a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = DrydockDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `DrydockDb`.
    #[must_use]
    pub const fn from_db(db: DrydockDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &DrydockDb {
        &self.db
    }

    /// Acquire a unit-of-work connection.
    pub(crate) async fn unit_of_work(&self) -> Result<UnitOfWork, DatabaseError> {
        self.db.connect().await
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the
/// original error.
///
/// A failed rollback is logged, not returned: the caller's error is the one
/// that explains what went wrong.
pub(crate) async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "transaction rollback failed");
            }
            Err(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::IN_MEMORY;

    async fn count_vessels(conn: &libsql::Connection) -> i64 {
        let mut rows = conn.query("SELECT count(*) FROM vessels", ()).await.unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn finish_commits_on_ok() {
        let svc = RepairService::new_local(IN_MEMORY).await.unwrap();
        let conn = svc.unit_of_work().await.unwrap();

        let tx = conn.transaction().await.unwrap();
        let result = tx
            .execute("INSERT INTO vessels (hull_id) VALUES ('R1')", ())
            .await
            .map_err(DatabaseError::from);
        finish(tx, result).await.unwrap();

        assert_eq!(count_vessels(&conn).await, 1);
    }

    #[tokio::test]
    async fn finish_rolls_back_on_err() {
        let svc = RepairService::new_local(IN_MEMORY).await.unwrap();
        let conn = svc.unit_of_work().await.unwrap();

        let tx = conn.transaction().await.unwrap();
        tx.execute("INSERT INTO vessels (hull_id) VALUES ('R1')", ())
            .await
            .unwrap();
        let result: Result<(), DatabaseError> = Err(DatabaseError::InvalidState("boom".into()));
        let err = finish(tx, result).await.unwrap_err();

        assert!(matches!(err, DatabaseError::InvalidState(_)));
        assert_eq!(count_vessels(&conn).await, 0);
    }
}
