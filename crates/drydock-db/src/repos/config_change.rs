//! Config change repository.

use chrono::Utc;
use drydock_core::entities::ConfigChange;
use drydock_core::requests::ConfigChangeCreate;

use super::repair::require_repair_id;
use crate::error::DatabaseError;
use crate::helpers::{get_opt_string, parse_datetime, text_or_null};
use crate::service::RepairService;

const SELECT_COLS: &str =
    "id, repair_id, system, parameter, old_value, new_value, reason, created_at";

fn row_to_config_change(row: &libsql::Row) -> Result<ConfigChange, DatabaseError> {
    Ok(ConfigChange {
        id: row.get::<i64>(0)?,
        repair_id: row.get::<i64>(1)?,
        system: row.get::<String>(2)?,
        parameter: row.get::<String>(3)?,
        old_value: get_opt_string(row, 4)?,
        new_value: get_opt_string(row, 5)?,
        reason: get_opt_string(row, 6)?,
        created_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

pub(crate) async fn list_config_changes_on(
    conn: &libsql::Connection,
    repair_id: i64,
) -> Result<Vec<ConfigChange>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM config_changes WHERE repair_id = ?1 ORDER BY id");
    let mut rows = conn.query(&sql, [repair_id]).await?;
    let mut changes = Vec::new();
    while let Some(row) = rows.next().await? {
        changes.push(row_to_config_change(&row)?);
    }
    Ok(changes)
}

impl RepairService {
    /// Log a configuration change under the repair with `repair_uid`.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the repair does not exist, or
    /// `Validation` if `system` or `parameter` is blank.
    pub async fn add_config_change(
        &self,
        repair_uid: &str,
        change: &ConfigChangeCreate,
    ) -> Result<ConfigChange, DatabaseError> {
        change.validate()?;
        let conn = self.unit_of_work().await?;
        let repair_id = require_repair_id(&conn, repair_uid).await?;

        let params = vec![
            libsql::Value::Integer(repair_id),
            libsql::Value::Text(change.system.clone()),
            libsql::Value::Text(change.parameter.clone()),
            text_or_null(change.old_value.as_deref()),
            text_or_null(change.new_value.as_deref()),
            text_or_null(change.reason.as_deref()),
            libsql::Value::Text(Utc::now().to_rfc3339()),
        ];
        let sql = format!(
            "INSERT INTO config_changes (repair_id, system, parameter, old_value, new_value,
                reason, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
             RETURNING {SELECT_COLS}"
        );
        let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
        let row = rows.next().await?.ok_or(DatabaseError::NoResult)?;
        let created = row_to_config_change(&row)?;

        tracing::debug!(repair_uid, id = created.id, system = %created.system, "config change added");
        Ok(created)
    }

    /// Remove a config change. Returns whether a row was removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the delete fails.
    pub async fn remove_config_change(&self, id: i64) -> Result<bool, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let removed = conn
            .execute("DELETE FROM config_changes WHERE id = ?1", [id])
            .await?;
        if removed > 0 {
            tracing::debug!(id, "config change removed");
        }
        Ok(removed > 0)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no change has this id.
    pub async fn get_config_change(&self, id: i64) -> Result<ConfigChange, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let sql = format!("SELECT {SELECT_COLS} FROM config_changes WHERE id = ?1");
        let mut rows = conn.query(&sql, [id]).await?;
        let row = rows
            .next()
            .await?
            .ok_or_else(|| DatabaseError::not_found("config change", id))?;
        row_to_config_change(&row)
    }

    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the repair does not exist.
    pub async fn list_config_changes(
        &self,
        repair_uid: &str,
    ) -> Result<Vec<ConfigChange>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let repair_id = require_repair_id(&conn, repair_uid).await?;
        list_config_changes_on(&conn, repair_id).await
    }
}

#[cfg(test)]
mod tests {
    use drydock_core::requests::ConfigChangeCreate;
    use pretty_assertions::assert_eq;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::{create_test_repair, day, test_service};

    #[tokio::test]
    async fn add_and_list() {
        let svc = test_service().await;
        let repair = create_test_repair(&svc, "R1", day(2024, 1, 1)).await;

        let change = ConfigChangeCreate {
            old_value: Some("10".into()),
            new_value: Some("12".into()),
            reason: Some("drift".into()),
            ..ConfigChangeCreate::new("Orca", "gain")
        };
        let created = svc.add_config_change(&repair.repair_uid, &change).await.unwrap();
        assert_eq!(created.parameter, "gain");
        assert_eq!(created.new_value.as_deref(), Some("12"));

        let listed = svc.list_config_changes(&repair.repair_uid).await.unwrap();
        assert_eq!(listed, vec![created.clone()]);
        assert_eq!(svc.get_config_change(created.id).await.unwrap(), created);
    }

    #[tokio::test]
    async fn add_to_missing_repair() {
        let svc = test_service().await;
        let err = svc
            .add_config_change("REP-20240101-000000", &ConfigChangeCreate::new("Orca", "gain"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }

    #[tokio::test]
    async fn remove_missing_is_false() {
        let svc = test_service().await;
        assert!(!svc.remove_config_change(42).await.unwrap());
        let err = svc.get_config_change(42).await.unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { entity: "config change", .. }));
    }
}
