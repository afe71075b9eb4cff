//! Vessel repository.
//!
//! Vessels are never created directly: the first repair naming an unknown
//! hull id creates it.

use chrono::Utc;
use drydock_core::entities::Vessel;

use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime};
use crate::service::RepairService;

const SELECT_COLS: &str = "id, hull_id, notes, created_at";

fn row_to_vessel(row: &libsql::Row) -> Result<Vessel, DatabaseError> {
    Ok(Vessel {
        id: row.get::<i64>(0)?,
        hull_id: row.get::<String>(1)?,
        notes: get_opt_string(row, 2)?,
        created_at: parse_datetime(&row.get::<String>(3)?)?,
    })
}

fn normalize_hull_id(hull_id: &str) -> Result<&str, DatabaseError> {
    let trimmed = hull_id.trim();
    if trimmed.is_empty() {
        return Err(DatabaseError::Validation {
            field: "hull_id".into(),
            reason: "hull id is required".into(),
        });
    }
    Ok(trimmed)
}

pub(crate) async fn find_vessel_by_hull(
    conn: &libsql::Connection,
    hull_id: &str,
) -> Result<Option<Vessel>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM vessels WHERE hull_id = ?1");
    let mut rows = conn.query(&sql, [hull_id]).await?;
    rows.next().await?.map(|row| row_to_vessel(&row)).transpose()
}

pub(crate) async fn find_vessel_by_id(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Vessel>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM vessels WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    rows.next().await?.map(|row| row_to_vessel(&row)).transpose()
}

/// Look up the vessel for `hull_id`, inserting it if absent.
///
/// The insert is `ON CONFLICT DO NOTHING`, so two writers racing on the same
/// new hull id both end up reading the one row that won.
pub(crate) async fn get_or_create_vessel_on(
    conn: &libsql::Connection,
    hull_id: &str,
) -> Result<Vessel, DatabaseError> {
    let inserted = conn
        .execute(
            "INSERT INTO vessels (hull_id, created_at) VALUES (?1, ?2)
             ON CONFLICT(hull_id) DO NOTHING",
            libsql::params![hull_id, Utc::now().to_rfc3339()],
        )
        .await?;
    if inserted > 0 {
        tracing::info!(hull_id, "vessel created");
    }
    find_vessel_by_hull(conn, hull_id)
        .await?
        .ok_or(DatabaseError::NoResult)
}

impl RepairService {
    /// Return the vessel with `hull_id`, creating it with no notes if absent.
    ///
    /// Surrounding whitespace is trimmed from the hull id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` for a blank hull id.
    pub async fn get_or_create_vessel(&self, hull_id: &str) -> Result<Vessel, DatabaseError> {
        let hull_id = normalize_hull_id(hull_id)?;
        let conn = self.unit_of_work().await?;
        get_or_create_vessel_on(&conn, hull_id).await
    }

    /// Get a vessel by hull id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn get_vessel(&self, hull_id: &str) -> Result<Option<Vessel>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        find_vessel_by_hull(&conn, hull_id.trim()).await
    }

    /// Get a vessel by row id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no vessel has this id.
    pub async fn get_vessel_by_id(&self, id: i64) -> Result<Vessel, DatabaseError> {
        let conn = self.unit_of_work().await?;
        find_vessel_by_id(&conn, id)
            .await?
            .ok_or_else(|| DatabaseError::not_found("vessel", id))
    }
}
