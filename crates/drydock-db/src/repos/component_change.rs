//! Component change repository.
//!
//! Append-only log of hardware swaps under a repair. Rows are returned in
//! creation order.

use chrono::Utc;
use drydock_core::entities::ComponentChange;
use drydock_core::requests::ComponentChangeCreate;

use super::repair::require_repair_id;
use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_date, get_opt_string, parse_datetime, parse_enum, text_or_null,
};
use crate::service::RepairService;

const SELECT_COLS: &str = "id, repair_id, subsystem, component, old_serial, new_serial, \
    old_fw, new_fw, reason, performed_by, change_date, created_at";

fn row_to_component_change(row: &libsql::Row) -> Result<ComponentChange, DatabaseError> {
    Ok(ComponentChange {
        id: row.get::<i64>(0)?,
        repair_id: row.get::<i64>(1)?,
        subsystem: parse_enum(&row.get::<String>(2)?)?,
        component: row.get::<String>(3)?,
        old_serial: get_opt_string(row, 4)?,
        new_serial: get_opt_string(row, 5)?,
        old_fw: get_opt_string(row, 6)?,
        new_fw: get_opt_string(row, 7)?,
        reason: get_opt_string(row, 8)?,
        performed_by: get_opt_string(row, 9)?,
        change_date: get_opt_date(row, 10)?,
        created_at: parse_datetime(&row.get::<String>(11)?)?,
    })
}

pub(crate) async fn list_component_changes_on(
    conn: &libsql::Connection,
    repair_id: i64,
) -> Result<Vec<ComponentChange>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM component_changes WHERE repair_id = ?1 ORDER BY id");
    let mut rows = conn.query(&sql, [repair_id]).await?;
    let mut changes = Vec::new();
    while let Some(row) = rows.next().await? {
        changes.push(row_to_component_change(&row)?);
    }
    Ok(changes)
}

impl RepairService {
    /// Log a component change under the repair with `repair_uid`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the repair does not exist, or
    /// `Validation` if the component name is blank.
    pub async fn add_component_change(
        &self,
        repair_uid: &str,
        change: &ComponentChangeCreate,
    ) -> Result<ComponentChange, DatabaseError> {
        change.validate()?;
        let conn = self.unit_of_work().await?;
        let repair_id = require_repair_id(&conn, repair_uid).await?;

        let params = vec![
            libsql::Value::Integer(repair_id),
            libsql::Value::Text(change.subsystem.as_str().to_string()),
            libsql::Value::Text(change.component.clone()),
            text_or_null(change.old_serial.as_deref()),
            text_or_null(change.new_serial.as_deref()),
            text_or_null(change.old_fw.as_deref()),
            text_or_null(change.new_fw.as_deref()),
            text_or_null(change.reason.as_deref()),
            text_or_null(change.performed_by.as_deref()),
            change
                .change_date
                .map_or(libsql::Value::Null, |d| libsql::Value::Text(format_date(d))),
            libsql::Value::Text(Utc::now().to_rfc3339()),
        ];
        let sql = format!(
            "INSERT INTO component_changes (repair_id, subsystem, component, old_serial,
                new_serial, old_fw, new_fw, reason, performed_by, change_date, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
             RETURNING {SELECT_COLS}"
        );
        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let created = row_to_component_change(&row)?;

        tracing::debug!(repair_uid, id = created.id, subsystem = %created.subsystem, "component change added");
        Ok(created)
    }

    /// Remove a component change. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn remove_component_change(&self, id: i64) -> Result<bool, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let removed = conn
            .execute("DELETE FROM component_changes WHERE id = ?1", [id])
            .await?;
        if removed > 0 {
            tracing::debug!(id, "component change removed");
        }
        Ok(removed > 0)
    }

    /// Get a component change by id.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no change has this id.
    pub async fn get_component_change(&self, id: i64) -> Result<ComponentChange, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let sql = format!("SELECT {SELECT_COLS} FROM component_changes WHERE id = ?1");
        let mut rows = conn.query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("component change", id))?;
        row_to_component_change(&row)
    }

    /// List the component changes of a repair in creation order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the repair does not exist.
    pub async fn list_component_changes(
        &self,
        repair_uid: &str,
    ) -> Result<Vec<ComponentChange>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let repair_id = require_repair_id(&conn, repair_uid).await?;
        list_component_changes_on(&conn, repair_id).await
    }
}
