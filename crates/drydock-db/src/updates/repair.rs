//! Repair partial-update types.
//!
//! The snapshot sub-object is merged field by field onto the nine
//! `snapshot_*` columns: a field omitted from [`SnapshotUpdate`] keeps its
//! stored value.

use drydock_core::enums::RepairStatus;
use drydock_core::requests::double_option;
use serde::{Deserialize, Serialize};

use super::Assignments;
use crate::helpers::{bool_or_null, text_or_null};

/// Body of `PATCH /repairs/{uid}`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RepairUpdate {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub location: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ticket: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub technicians: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub program: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub service_type: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub root_cause_cat: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub issue_desc: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub root_cause_details: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub wiring_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub structural_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub verification_notes: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub final_status: Option<Option<RepairStatus>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub limitations: Option<Option<String>>,
    /// `null` and absent both mean "leave the snapshot alone".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot: Option<SnapshotUpdate>,
}

/// Partial snapshot; each present field overwrites one `snapshot_*` column.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SnapshotUpdate {
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ilmor_sn: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub ilmor_fw: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub icu_sn: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub orca_sn: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub battery_sns: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub camera: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub radar: Option<Option<bool>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub compass: Option<Option<bool>>,
    #[serde(default, deserialize_with = "double_option", skip_serializing_if = "Option::is_none")]
    pub two_battery: Option<Option<bool>>,
}

fn push_text(a: &mut Assignments, column: &str, value: Option<&Option<String>>) {
    if let Some(v) = value {
        a.push(column, text_or_null(v.as_deref()));
    }
}

fn push_bool(a: &mut Assignments, column: &str, value: Option<Option<bool>>) {
    if let Some(v) = value {
        a.push(column, bool_or_null(v));
    }
}

impl RepairUpdate {
    /// SET clauses for every field present in this update, snapshot included.
    #[must_use]
    pub fn assignments(&self) -> Assignments {
        let mut a = Assignments::default();
        push_text(&mut a, "location", self.location.as_ref());
        push_text(&mut a, "ticket", self.ticket.as_ref());
        push_text(&mut a, "technicians", self.technicians.as_ref());
        push_text(&mut a, "program", self.program.as_ref());
        push_text(&mut a, "service_type", self.service_type.as_ref());
        push_text(&mut a, "root_cause_cat", self.root_cause_cat.as_ref());
        push_text(&mut a, "issue_desc", self.issue_desc.as_ref());
        push_text(&mut a, "root_cause_details", self.root_cause_details.as_ref());
        push_text(&mut a, "wiring_notes", self.wiring_notes.as_ref());
        push_text(&mut a, "structural_notes", self.structural_notes.as_ref());
        push_text(&mut a, "verification_notes", self.verification_notes.as_ref());
        if let Some(status) = self.final_status {
            a.push("final_status", text_or_null(status.map(RepairStatus::as_str)));
        }
        push_text(&mut a, "limitations", self.limitations.as_ref());
        if let Some(ref snapshot) = self.snapshot {
            snapshot.merge_into(&mut a);
        }
        a
    }
}

impl SnapshotUpdate {
    /// Append one SET clause per present snapshot field.
    pub fn merge_into(&self, a: &mut Assignments) {
        push_text(a, "snapshot_ilmor_sn", self.ilmor_sn.as_ref());
        push_text(a, "snapshot_ilmor_fw", self.ilmor_fw.as_ref());
        push_text(a, "snapshot_icu_sn", self.icu_sn.as_ref());
        push_text(a, "snapshot_orca_sn", self.orca_sn.as_ref());
        push_text(a, "snapshot_battery_sns", self.battery_sns.as_ref());
        push_text(a, "snapshot_camera", self.camera.as_ref());
        push_bool(a, "snapshot_radar", self.radar);
        push_bool(a, "snapshot_compass", self.compass);
        push_bool(a, "snapshot_two_battery", self.two_battery);
    }
}

pub struct RepairUpdateBuilder(RepairUpdate);

impl RepairUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(RepairUpdate::default())
    }

    #[must_use]
    pub fn location(mut self, location: Option<String>) -> Self {
        self.0.location = Some(location);
        self
    }

    #[must_use]
    pub fn ticket(mut self, ticket: Option<String>) -> Self {
        self.0.ticket = Some(ticket);
        self
    }

    #[must_use]
    pub fn technicians(mut self, technicians: Option<String>) -> Self {
        self.0.technicians = Some(technicians);
        self
    }

    #[must_use]
    pub fn root_cause_details(mut self, details: Option<String>) -> Self {
        self.0.root_cause_details = Some(details);
        self
    }

    #[must_use]
    pub fn verification_notes(mut self, notes: Option<String>) -> Self {
        self.0.verification_notes = Some(notes);
        self
    }

    #[must_use]
    pub fn final_status(mut self, status: Option<RepairStatus>) -> Self {
        self.0.final_status = Some(status);
        self
    }

    #[must_use]
    pub fn limitations(mut self, limitations: Option<String>) -> Self {
        self.0.limitations = Some(limitations);
        self
    }

    #[must_use]
    pub fn snapshot(mut self, snapshot: SnapshotUpdate) -> Self {
        self.0.snapshot = Some(snapshot);
        self
    }

    #[must_use]
    pub fn build(self) -> RepairUpdate {
        self.0
    }
}

impl Default for RepairUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}
