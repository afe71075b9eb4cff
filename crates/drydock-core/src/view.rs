//! Presentation mapping from a loaded repair aggregate to [`RepairView`].
//!
//! Pure and read-only: the storage layer loads a [`RepairAggregate`], this
//! module only reshapes it.

use std::collections::BTreeMap;

use crate::entities::{ComponentChange, ConfigChange, Repair, RepairChecklistEntry, Vessel};
use crate::responses::{ComponentChangeRecord, ConfigChangeRecord, RepairView};

/// A repair together with every row that hangs off it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepairAggregate {
    pub repair: Repair,
    /// Owning vessel. `None` only if the relation could not be resolved.
    pub vessel: Option<Vessel>,
    /// In creation order.
    pub component_changes: Vec<ComponentChange>,
    /// In creation order.
    pub config_changes: Vec<ConfigChange>,
    pub checklist: Vec<RepairChecklistEntry>,
}

impl RepairAggregate {
    /// Build the outward representation of this repair.
    #[must_use]
    pub fn to_view(&self) -> RepairView {
        let r = &self.repair;
        let hull_id = self
            .vessel
            .as_ref()
            .map(|v| v.hull_id.clone())
            .unwrap_or_default();

        let checklist: BTreeMap<String, bool> = self
            .checklist
            .iter()
            .filter(|entry| !entry.code.is_empty())
            .map(|entry| (entry.code.clone(), entry.checked))
            .collect();

        RepairView {
            repair_uid: r.repair_uid.clone(),
            hull_id,
            date_opened: r.date_opened,
            location: r.location.clone(),
            ticket: r.ticket.clone(),
            technicians: r.technicians.clone(),
            program: r.program.clone(),
            service_type: r.service_type.clone(),
            root_cause_cat: r.root_cause_cat.clone(),
            issue_desc: r.issue_desc.clone(),
            root_cause_details: r.root_cause_details.clone(),
            wiring_notes: r.wiring_notes.clone(),
            structural_notes: r.structural_notes.clone(),
            verification_notes: r.verification_notes.clone(),
            final_status: r.final_status,
            limitations: r.limitations.clone(),
            snapshot: r.snapshot(),
            component_changes: self
                .component_changes
                .iter()
                .map(ComponentChangeRecord::from)
                .collect(),
            config_changes: self
                .config_changes
                .iter()
                .map(ConfigChangeRecord::from)
                .collect(),
            checklist,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::RepairSnapshot;
    use crate::enums::Subsystem;
    use chrono::{NaiveDate, Utc};
    use pretty_assertions::assert_eq;

    fn sample_repair() -> Repair {
        let now = Utc::now();
        Repair {
            id: 7,
            repair_uid: "REP-20240131-A3F8B2".into(),
            vessel_id: 3,
            date_opened: NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            location: Some("Miami".into()),
            ticket: None,
            technicians: Some("jd, mk".into()),
            program: None,
            service_type: None,
            root_cause_cat: None,
            issue_desc: None,
            root_cause_details: None,
            wiring_notes: None,
            structural_notes: None,
            verification_notes: None,
            final_status: None,
            limitations: None,
            snapshot_ilmor_sn: Some("IL-1".into()),
            snapshot_ilmor_fw: None,
            snapshot_icu_sn: None,
            snapshot_orca_sn: None,
            snapshot_battery_sns: None,
            snapshot_camera: Some("CAM-1".into()),
            snapshot_radar: Some(true),
            snapshot_compass: None,
            snapshot_two_battery: Some(false),
            created_at: now,
            updated_at: now,
        }
    }

    fn aggregate() -> RepairAggregate {
        RepairAggregate {
            repair: sample_repair(),
            vessel: Some(Vessel {
                id: 3,
                hull_id: "R132".into(),
                notes: None,
                created_at: Utc::now(),
            }),
            component_changes: Vec::new(),
            config_changes: Vec::new(),
            checklist: Vec::new(),
        }
    }

    fn entry(code: &str, checked: bool) -> RepairChecklistEntry {
        RepairChecklistEntry {
            repair_id: 7,
            item_id: 1,
            code: code.into(),
            checked,
            checked_at: checked.then(Utc::now),
        }
    }

    #[test]
    fn hull_id_from_vessel() {
        assert_eq!(aggregate().to_view().hull_id, "R132");
    }

    #[test]
    fn missing_vessel_yields_empty_hull_id() {
        let mut agg = aggregate();
        agg.vessel = None;
        assert_eq!(agg.to_view().hull_id, "");
    }

    #[test]
    fn snapshot_columns_are_nested() {
        let view = aggregate().to_view();
        assert_eq!(
            view.snapshot,
            RepairSnapshot {
                ilmor_sn: Some("IL-1".into()),
                camera: Some("CAM-1".into()),
                radar: Some(true),
                two_battery: Some(false),
                ..RepairSnapshot::default()
            }
        );
    }

    #[test]
    fn checklist_only_contains_stored_codes() {
        let mut agg = aggregate();
        agg.checklist = vec![entry("HULL_INSPECT", true), entry("PROP_CHECK", false)];
        let view = agg.to_view();

        assert_eq!(view.checklist.len(), 2);
        assert_eq!(view.checklist.get("HULL_INSPECT"), Some(&true));
        assert_eq!(view.checklist.get("PROP_CHECK"), Some(&false));
        assert_eq!(view.checklist.get("RADAR_TEST"), None);
    }

    #[test]
    fn children_keep_their_order() {
        let mut agg = aggregate();
        let now = Utc::now();
        agg.component_changes = (1..=3)
            .map(|id| ComponentChange {
                id,
                repair_id: 7,
                subsystem: Subsystem::Battery,
                component: format!("cell-{id}"),
                old_serial: None,
                new_serial: None,
                old_fw: None,
                new_fw: None,
                reason: None,
                performed_by: None,
                change_date: None,
                created_at: now,
            })
            .collect();
        agg.config_changes = vec![ConfigChange {
            id: 11,
            repair_id: 7,
            system: "Orca".into(),
            parameter: "gain".into(),
            old_value: Some("1".into()),
            new_value: Some("2".into()),
            reason: None,
            created_at: now,
        }];

        let view = agg.to_view();
        let ids: Vec<i64> = view.component_changes.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(view.config_changes[0].parameter, "gain");
    }
}
