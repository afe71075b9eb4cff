//! Checklist repository: the item catalog and per-repair completion state.
//!
//! A submitted state map is reconciled against the whole catalog in one
//! transaction. Codes the catalog does not know are skipped, so clients and
//! catalog may drift apart without breaking submissions.

use std::collections::{BTreeMap, HashMap};

use chrono::Utc;
use drydock_core::entities::{ChecklistItem, ChecklistItemSeed, RepairChecklistEntry};

use super::repair::require_repair_id;
use crate::error::DatabaseError;
use crate::helpers::{get_bool, parse_optional_datetime};
use crate::service::{RepairService, finish};

const ITEM_COLS: &str = "id, code, label, sort_order, active";

fn row_to_item(row: &libsql::Row) -> Result<ChecklistItem, DatabaseError> {
    Ok(ChecklistItem {
        id: row.get::<i64>(0)?,
        code: row.get::<String>(1)?,
        label: row.get::<String>(2)?,
        sort_order: row.get::<i64>(3)?,
        active: get_bool(row, 4)?,
    })
}

fn row_to_entry(row: &libsql::Row) -> Result<RepairChecklistEntry, DatabaseError> {
    let checked_at = row.get::<Option<String>>(4)?;
    Ok(RepairChecklistEntry {
        repair_id: row.get::<i64>(0)?,
        item_id: row.get::<i64>(1)?,
        code: row.get::<String>(2)?,
        checked: get_bool(row, 3)?,
        checked_at: parse_optional_datetime(checked_at.as_deref())?,
    })
}

async fn query_items(
    conn: &libsql::Connection,
    active_only: bool,
) -> Result<Vec<ChecklistItem>, DatabaseError> {
    let filter = if active_only { "WHERE active = 1" } else { "" };
    let sql = format!("SELECT {ITEM_COLS} FROM checklist_items {filter} ORDER BY sort_order, id");
    let mut rows = conn.query(&sql, ()).await?;
    let mut items = Vec::new();
    while let Some(row) = rows.next().await? {
        items.push(row_to_item(&row)?);
    }
    Ok(items)
}

/// Checklist rows of one repair with their catalog codes, in catalog order.
pub(crate) async fn list_entries_for_repair(
    conn: &libsql::Connection,
    repair_id: i64,
) -> Result<Vec<RepairChecklistEntry>, DatabaseError> {
    let mut rows = conn
        .query(
            "SELECT rc.repair_id, rc.item_id, ci.code, rc.checked, rc.checked_at
             FROM repair_checklist rc
             JOIN checklist_items ci ON ci.id = rc.item_id
             WHERE rc.repair_id = ?1
             ORDER BY ci.sort_order, ci.id",
            [repair_id],
        )
        .await?;
    let mut entries = Vec::new();
    while let Some(row) = rows.next().await? {
        entries.push(row_to_entry(&row)?);
    }
    Ok(entries)
}

async fn upsert_seeds(
    conn: &libsql::Connection,
    seeds: &[ChecklistItemSeed],
) -> Result<(), DatabaseError> {
    for seed in seeds {
        conn.execute(
            "INSERT INTO checklist_items (code, label, sort_order, active)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(code) DO UPDATE SET
                label = excluded.label,
                sort_order = excluded.sort_order,
                active = excluded.active",
            libsql::params![
                seed.code.as_str(),
                seed.label.as_str(),
                seed.sort_order,
                i64::from(seed.active)
            ],
        )
        .await?;
    }
    Ok(())
}

/// Apply `states` to one repair. Returns the number of unknown codes skipped.
async fn reconcile_states(
    conn: &libsql::Connection,
    repair_id: i64,
    states: &BTreeMap<String, bool>,
) -> Result<usize, DatabaseError> {
    let catalog: HashMap<String, i64> = query_items(conn, false)
        .await?
        .into_iter()
        .map(|item| (item.code, item.id))
        .collect();

    let now = Utc::now().to_rfc3339();
    let mut skipped = 0;
    for (code, &checked) in states {
        let Some(&item_id) = catalog.get(code) else {
            skipped += 1;
            continue;
        };
        let checked_at = if checked {
            libsql::Value::Text(now.clone())
        } else {
            libsql::Value::Null
        };
        conn.execute(
            "INSERT INTO repair_checklist (repair_id, item_id, checked, checked_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(repair_id, item_id) DO UPDATE SET
                checked = excluded.checked,
                checked_at = excluded.checked_at",
            libsql::params_from_iter(vec![
                libsql::Value::Integer(repair_id),
                libsql::Value::Integer(item_id),
                libsql::Value::Integer(i64::from(checked)),
                checked_at,
            ]),
        )
        .await?;
    }
    Ok(skipped)
}

impl RepairService {
    /// Active catalog items, ascending by sort order.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_active_checklist_items(&self) -> Result<Vec<ChecklistItem>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        query_items(&conn, true).await
    }

    /// Every catalog item, inactive ones included.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn list_checklist_items(&self) -> Result<Vec<ChecklistItem>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        query_items(&conn, false).await
    }

    /// Insert or update catalog items by code, all in one transaction.
    ///
    /// Items already in the catalog but absent from `seeds` are left alone.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if any write fails; the catalog is then unchanged.
    pub async fn seed_checklist_items(
        &self,
        seeds: &[ChecklistItemSeed],
    ) -> Result<(), DatabaseError> {
        let conn = self.unit_of_work().await?;
        let tx = conn.transaction().await?;
        let result = upsert_seeds(&tx, seeds).await;
        finish(tx, result).await?;
        tracing::debug!(count = seeds.len(), "checklist catalog seeded");
        Ok(())
    }

    /// Apply a code-to-checked map to a repair's checklist.
    ///
    /// Each known code is upserted: `checked_at` is set to now when checked
    /// and cleared when unchecked. Unknown codes are ignored. The whole map is
    /// applied atomically. Returns the repair's checklist rows afterwards.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the repair does not exist.
    pub async fn apply_checklist_states(
        &self,
        repair_uid: &str,
        states: &BTreeMap<String, bool>,
    ) -> Result<Vec<RepairChecklistEntry>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let tx = conn.transaction().await?;
        let result = async {
            let repair_id = require_repair_id(&tx, repair_uid).await?;
            let skipped = reconcile_states(&tx, repair_id, states).await?;
            let entries = list_entries_for_repair(&tx, repair_id).await?;
            Ok::<_, DatabaseError>((entries, skipped))
        }
        .await;
        let (entries, skipped) = finish(tx, result).await?;

        if skipped > 0 {
            tracing::warn!(repair_uid, skipped, "ignored unknown checklist codes");
        }
        tracing::debug!(repair_uid, applied = states.len() - skipped, "checklist updated");
        Ok(entries)
    }

    /// Checklist rows of one repair. Codes never submitted have no row.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::NotFound` if the repair does not exist.
    pub async fn repair_checklist(
        &self,
        repair_uid: &str,
    ) -> Result<Vec<RepairChecklistEntry>, DatabaseError> {
        let conn = self.unit_of_work().await?;
        let repair_id = require_repair_id(&conn, repair_uid).await?;
        list_entries_for_repair(&conn, repair_id).await
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use pretty_assertions::assert_eq;

    use crate::error::DatabaseError;
    use crate::test_support::helpers::{
        create_test_repair, day, seed, seed_test_catalog, test_service,
    };

    fn states(pairs: &[(&str, bool)]) -> BTreeMap<String, bool> {
        pairs.iter().map(|(c, v)| ((*c).to_string(), *v)).collect()
    }

    #[tokio::test]
    async fn active_items_sorted() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;

        let codes: Vec<String> = svc
            .list_active_checklist_items()
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.code)
            .collect();
        assert_eq!(codes, vec!["PRE", "WIRING", "SEA_TRIAL"]);

        let all = svc.list_checklist_items().await.unwrap();
        assert_eq!(all.len(), 4);
        assert_eq!(all[0].code, "LEGACY");
        assert!(!all[0].active);
    }

    #[tokio::test]
    async fn seeding_updates_by_code() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let before = svc.list_checklist_items().await.unwrap();

        svc.seed_checklist_items(&[seed("PRE", 40, false)]).await.unwrap();

        let after = svc.list_checklist_items().await.unwrap();
        assert_eq!(after.len(), before.len());
        let pre = after.iter().find(|i| i.code == "PRE").unwrap();
        assert_eq!(pre.sort_order, 40);
        assert!(!pre.active);
        let original = before.iter().find(|i| i.code == "PRE").unwrap();
        assert_eq!(pre.id, original.id);
    }

    #[tokio::test]
    async fn apply_twice_keeps_one_row() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let repair = create_test_repair(&svc, "R1", day(2024, 1, 1)).await;

        svc.apply_checklist_states(&repair.repair_uid, &states(&[("PRE", true)]))
            .await
            .unwrap();
        let entries = svc
            .apply_checklist_states(&repair.repair_uid, &states(&[("PRE", true)]))
            .await
            .unwrap();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].checked);
        assert!(entries[0].checked_at.is_some());

        let entries = svc
            .apply_checklist_states(&repair.repair_uid, &states(&[("PRE", false)]))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert!(!entries[0].checked);
        assert_eq!(entries[0].checked_at, None);
    }

    #[tokio::test]
    async fn unchecked_first_submission_has_no_timestamp() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let repair = create_test_repair(&svc, "R1", day(2024, 1, 1)).await;

        let entries = svc
            .apply_checklist_states(&repair.repair_uid, &states(&[("WIRING", false)]))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].checked_at, None);
    }

    #[tokio::test]
    async fn unknown_codes_ignored() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let repair = create_test_repair(&svc, "R1", day(2024, 1, 1)).await;

        let entries = svc
            .apply_checklist_states(&repair.repair_uid, &states(&[("ZZZ", true)]))
            .await
            .unwrap();
        assert!(entries.is_empty());

        let entries = svc
            .apply_checklist_states(&repair.repair_uid, &states(&[("ZZZ", true), ("PRE", true)]))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].code, "PRE");
    }

    #[tokio::test]
    async fn inactive_items_still_accept_state() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let repair = create_test_repair(&svc, "R1", day(2024, 1, 1)).await;

        let entries = svc
            .apply_checklist_states(&repair.repair_uid, &states(&[("LEGACY", true)]))
            .await
            .unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn entries_in_catalog_order() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let repair = create_test_repair(&svc, "R1", day(2024, 1, 1)).await;

        svc.apply_checklist_states(
            &repair.repair_uid,
            &states(&[("SEA_TRIAL", true), ("PRE", false), ("WIRING", true)]),
        )
        .await
        .unwrap();

        let codes: Vec<String> = svc
            .repair_checklist(&repair.repair_uid)
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.code)
            .collect();
        assert_eq!(codes, vec!["PRE", "WIRING", "SEA_TRIAL"]);
    }

    #[tokio::test]
    async fn missing_repair_rejected() {
        let svc = test_service().await;
        seed_test_catalog(&svc).await;
        let err = svc
            .apply_checklist_states("REP-20240101-000000", &states(&[("PRE", true)]))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::NotFound { .. }));
    }
}
