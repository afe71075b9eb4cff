//! Repair repository.
//!
//! Creation resolves the vessel and the repair UID inside one transaction.
//! Updates are merges: only fields present in [`RepairUpdate`] are written.

use chrono::{NaiveDate, Utc};
use drydock_core::entities::Repair;
use drydock_core::ids::format_repair_uid;
use drydock_core::requests::{NewRepair, RepairCreate};
use drydock_core::responses::RepairView;
use drydock_core::view::RepairAggregate;
use serde::{Deserialize, Serialize};

use super::checklist::list_entries_for_repair;
use super::component_change::list_component_changes_on;
use super::config_change::list_config_changes_on;
use super::vessel::{find_vessel_by_id, get_or_create_vessel_on};
use crate::DrydockDb;
use crate::error::DatabaseError;
use crate::helpers::{
    format_date, get_opt_bool, get_opt_string, parse_date, parse_datetime, parse_enum,
    text_or_null,
};
use crate::service::{DEFAULT_LIST_LIMIT, RepairService, finish};
use crate::updates::repair::RepairUpdate;

const SELECT_COLS: &str = "id, repair_uid, vessel_id, date_opened, location, ticket, \
    technicians, program, service_type, root_cause_cat, issue_desc, root_cause_details, \
    wiring_notes, structural_notes, verification_notes, final_status, limitations, \
    snapshot_ilmor_sn, snapshot_ilmor_fw, snapshot_icu_sn, snapshot_orca_sn, \
    snapshot_battery_sns, snapshot_camera, snapshot_radar, snapshot_compass, \
    snapshot_two_battery, created_at, updated_at";

/// Random bytes in a repair UID suffix.
const UID_SUFFIX_BYTES: u8 = 3;

/// Fresh suffixes tried after the first one collides.
const MAX_UID_RETRIES: u32 = 3;

/// Filters for [`RepairService::list_repairs`]. Both date bounds are inclusive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepairFilter {
    #[serde(default)]
    pub hull_id: Option<String>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
    #[serde(default)]
    pub limit: Option<u32>,
}

fn row_to_repair(row: &libsql::Row) -> Result<Repair, DatabaseError> {
    let final_status = get_opt_string(row, 15)?
        .as_deref()
        .map(parse_enum)
        .transpose()?;

    Ok(Repair {
        id: row.get::<i64>(0)?,
        repair_uid: row.get::<String>(1)?,
        vessel_id: row.get::<i64>(2)?,
        date_opened: parse_date(&row.get::<String>(3)?)?,
        location: get_opt_string(row, 4)?,
        ticket: get_opt_string(row, 5)?,
        technicians: get_opt_string(row, 6)?,
        program: get_opt_string(row, 7)?,
        service_type: get_opt_string(row, 8)?,
        root_cause_cat: get_opt_string(row, 9)?,
        issue_desc: get_opt_string(row, 10)?,
        root_cause_details: get_opt_string(row, 11)?,
        wiring_notes: get_opt_string(row, 12)?,
        structural_notes: get_opt_string(row, 13)?,
        verification_notes: get_opt_string(row, 14)?,
        final_status,
        limitations: get_opt_string(row, 16)?,
        snapshot_ilmor_sn: get_opt_string(row, 17)?,
        snapshot_ilmor_fw: get_opt_string(row, 18)?,
        snapshot_icu_sn: get_opt_string(row, 19)?,
        snapshot_orca_sn: get_opt_string(row, 20)?,
        snapshot_battery_sns: get_opt_string(row, 21)?,
        snapshot_camera: get_opt_string(row, 22)?,
        snapshot_radar: get_opt_bool(row, 23)?,
        snapshot_compass: get_opt_bool(row, 24)?,
        snapshot_two_battery: get_opt_bool(row, 25)?,
        created_at: parse_datetime(&row.get::<String>(26)?)?,
        updated_at: parse_datetime(&row.get::<String>(27)?)?,
    })
}

pub(crate) async fn find_repair_by_uid(
    conn: &libsql::Connection,
    repair_uid: &str,
) -> Result<Option<Repair>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM repairs WHERE repair_uid = ?1");
    let mut rows = conn.query(&sql, [repair_uid]).await?;
    rows.next().await?.map(|row| row_to_repair(&row)).transpose()
}

async fn find_repair_by_id(
    conn: &libsql::Connection,
    id: i64,
) -> Result<Option<Repair>, DatabaseError> {
    let sql = format!("SELECT {SELECT_COLS} FROM repairs WHERE id = ?1");
    let mut rows = conn.query(&sql, [id]).await?;
    rows.next().await?.map(|row| row_to_repair(&row)).transpose()
}

/// Resolve a repair UID to its row id.
pub(crate) async fn require_repair_id(
    conn: &libsql::Connection,
    repair_uid: &str,
) -> Result<i64, DatabaseError> {
    let mut rows = conn
        .query("SELECT id FROM repairs WHERE repair_uid = ?1", [repair_uid])
        .await?;
    let row = rows
        .next()
        .await?
        .ok_or_else(|| DatabaseError::not_found("repair", repair_uid))?;
    Ok(row.get::<i64>(0)?)
}

/// Insert a repair whose UID is stamped with `day`.
///
/// Suffixes are drawn from `preset` first, then from `randomblob`.
async fn insert_repair(
    conn: &libsql::Connection,
    new: &NewRepair,
    day: NaiveDate,
    mut preset: impl Iterator<Item = String>,
) -> Result<Repair, DatabaseError> {
    let vessel = get_or_create_vessel_on(conn, &new.hull_id).await?;
    let stamp = Utc::now().to_rfc3339();

    let mut retries = 0;
    loop {
        let suffix = match preset.next() {
            Some(suffix) => suffix,
            None => DrydockDb::random_hex(conn, UID_SUFFIX_BYTES).await?,
        };
        let repair_uid = format_repair_uid(day, &suffix);

        let params = vec![
            libsql::Value::Text(repair_uid.clone()),
            libsql::Value::Integer(vessel.id),
            libsql::Value::Text(format_date(new.date_opened)),
            text_or_null(new.location.as_deref()),
            text_or_null(new.ticket.as_deref()),
            text_or_null(new.technicians.as_deref()),
            text_or_null(new.program.as_deref()),
            text_or_null(new.service_type.as_deref()),
            text_or_null(new.root_cause_cat.as_deref()),
            text_or_null(new.issue_desc.as_deref()),
            libsql::Value::Text(stamp.clone()),
            libsql::Value::Text(stamp.clone()),
        ];
        let inserted = conn
            .execute(
                "INSERT INTO repairs (repair_uid, vessel_id, date_opened, location, ticket,
                    technicians, program, service_type, root_cause_cat, issue_desc,
                    created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
                libsql::params_from_iter(params),
            )
            .await
            .map_err(DatabaseError::from);

        match inserted {
            Ok(_) => {
                return find_repair_by_uid(conn, &repair_uid)
                    .await?
                    .ok_or(DatabaseError::NoResult);
            }
            Err(e) if e.is_unique_violation_on("repairs.repair_uid") && retries < MAX_UID_RETRIES => {
                retries += 1;
                tracing::warn!(%repair_uid, retries, "repair uid collision, retrying");
            }
            Err(e) => return Err(e),
        }
    }
}

async fn apply_update(
    conn: &libsql::Connection,
    repair_uid: &str,
    update: &RepairUpdate,
) -> Result<Repair, DatabaseError> {
    let current = find_repair_by_uid(conn, repair_uid)
        .await?
        .ok_or_else(|| DatabaseError::not_found("repair", repair_uid))?;

    let mut assignments = update.assignments();
    if assignments.is_empty() {
        return Ok(current);
    }
    assignments.push("updated_at", libsql::Value::Text(Utc::now().to_rfc3339()));

    let (sql, params) =
        assignments.into_update("repairs", "id", libsql::Value::Integer(current.id));
    conn.execute(&sql, libsql::params_from_iter(params)).await?;

    find_repair_by_id(conn, current.id)
        .await?
        .ok_or(DatabaseError::NoResult)
}

async fn load_aggregate(
    conn: &libsql::Connection,
    repair: Repair,
) -> Result<RepairAggregate, DatabaseError> {
    let vessel = find_vessel_by_id(conn, repair.vessel_id).await?;
    let component_changes = list_component_changes_on(conn, repair.id).await?;
    let config_changes = list_config_changes_on(conn, repair.id).await?;
    let checklist = list_entries_for_repair(conn, repair.id).await?;
    Ok(RepairAggregate {
        repair,
        vessel,
        component_changes,
        config_changes,
        checklist,
    })
}

async fn select_repairs(
    conn: &libsql::Connection,
    filter: &RepairFilter,
) -> Result<Vec<Repair>, DatabaseError> {
    let mut clauses = Vec::new();
    let mut params: Vec<libsql::Value> = Vec::new();

    if let Some(hull_id) = filter.hull_id.as_deref().map(str::trim).filter(|h| !h.is_empty()) {
        params.push(libsql::Value::Text(hull_id.to_string()));
        clauses.push(format!(
            "vessel_id = (SELECT id FROM vessels WHERE hull_id = ?{})",
            params.len()
        ));
    }
    if let Some(from) = filter.date_from {
        params.push(libsql::Value::Text(format_date(from)));
        clauses.push(format!("date_opened >= ?{}", params.len()));
    }
    if let Some(to) = filter.date_to {
        params.push(libsql::Value::Text(format_date(to)));
        clauses.push(format!("date_opened <= ?{}", params.len()));
    }
    params.push(libsql::Value::Integer(i64::from(
        filter.limit.unwrap_or(DEFAULT_LIST_LIMIT),
    )));
    let limit_idx = params.len();

    let where_sql = if clauses.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", clauses.join(" AND "))
    };
    let sql = format!(
        "SELECT {SELECT_COLS} FROM repairs {where_sql}
         ORDER BY date_opened DESC, id DESC LIMIT ?{limit_idx}"
    );

    let mut rows = conn.query(&sql, libsql::params_from_iter(params)).await?;
    let mut repairs = Vec::new();
    while let Some(row) = rows.next().await? {
        repairs.push(row_to_repair(&row)?);
    }
    Ok(repairs)
}

async fn delete_repair_rows(
    conn: &libsql::Connection,
    repair_uid: &str,
) -> Result<bool, DatabaseError> {
    let mut rows = conn
        .query("SELECT id FROM repairs WHERE repair_uid = ?1", [repair_uid])
        .await?;
    let Some(row) = rows.next().await? else {
        return Ok(false);
    };
    let id = row.get::<i64>(0)?;
    drop(rows);

    for table in ["repair_checklist", "component_changes", "config_changes"] {
        conn.execute(&format!("DELETE FROM {table} WHERE repair_id = ?1"), [id])
            .await?;
    }
    conn.execute("DELETE FROM repairs WHERE id = ?1", [id]).await?;
    Ok(true)
}

impl RepairService {
    /// Create a repair, creating its vessel on first sight of the hull id.
    ///
    /// The UID is `REP-<today UTC>-<6 hex>`; a UID collision is retried with
    /// a fresh suffix.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Validation` if `hull_id` or `date_opened` is
    /// missing, or `ConstraintViolation` if every UID attempt collided.
    pub async fn create_repair(&self, payload: RepairCreate) -> Result<Repair, DatabaseError> {
        let new = payload.validated()?;
        let conn = self.unit_of_work().await?;
        let tx = conn.transaction().await?;
        let result = insert_repair(&tx, &new, Utc::now().date_naive(), std::iter::empty()).await;
        let repair = finish(tx, result).await?;
        tracing::debug!(repair_uid = %repair.repair_uid, hull_id = %new.hull_id, "repair created");
        Ok(repair)
    }

    /// Get a repair by UID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no repair has this UID.
    pub async fn get_repair(&self, repair_uid: &str) -> Result<Repair, DatabaseError> {
        let conn = self.unit_of_work().await?;
        find_repair_by_uid(&conn, repair_uid)
            .await?
            .ok_or_else(|| DatabaseError::not_found("repair", repair_uid))
    }

    /// Merge `update` into the repair and bump `updated_at`.
    ///
    /// An update with no fields present returns the repair unchanged.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no repair has this UID. Any failure
    /// leaves the row untouched.
    pub async fn update_repair(
        &self,
        repair_uid: &str,
        update: &RepairUpdate,
    ) -> Result<Repair, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let tx = conn.transaction().await?;
        let result = apply_update(&tx, repair_uid, update).await;
        let repair = finish(tx, result).await?;
        tracing::debug!(repair_uid, "repair updated");
        Ok(repair)
    }

    /// List repairs newest-opened first, ties broken by newest row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_repairs(&self, filter: &RepairFilter) -> Result<Vec<Repair>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        select_repairs(&conn, filter).await
    }

    /// Load the full aggregate view of one repair.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if no repair has this UID.
    pub async fn get_repair_view(&self, repair_uid: &str) -> Result<RepairView, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let repair = find_repair_by_uid(&conn, repair_uid)
            .await?
            .ok_or_else(|| DatabaseError::not_found("repair", repair_uid))?;
        Ok(load_aggregate(&conn, repair).await?.to_view())
    }

    /// [`Self::list_repairs`], each mapped to its aggregate view.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any query fails.
    pub async fn list_repair_views(
        &self,
        filter: &RepairFilter,
    ) -> Result<Vec<RepairView>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let repairs = select_repairs(&conn, filter).await?;
        let mut views = Vec::with_capacity(repairs.len());
        for repair in repairs {
            views.push(load_aggregate(&conn, repair).await?.to_view());
        }
        Ok(views)
    }

    /// Delete a repair together with its change logs and checklist rows.
    ///
    /// Returns `false` if no repair has this UID.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a delete fails; nothing is removed then.
    pub async fn delete_repair(&self, repair_uid: &str) -> Result<bool, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let tx = conn.transaction().await?;
        let result = delete_repair_rows(&tx, repair_uid).await;
        let deleted = finish(tx, result).await?;
        if deleted {
            tracing::debug!(repair_uid, "repair deleted");
        }
        Ok(deleted)
    }
}
