//! Outward-facing shapes returned by the HTTP boundary.
//!
//! These mirror the entities minus storage-internal keys (`id` of the repair,
//! `repair_id` on children), with snapshot columns nested and the checklist
//! collapsed to a map.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::{ChecklistItem, ComponentChange, ConfigChange, RepairSnapshot};
use crate::enums::{RepairStatus, Subsystem};

/// Aggregate view of one repair with its children.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepairView {
    pub repair_uid: String,
    pub hull_id: String,
    pub date_opened: NaiveDate,
    pub location: Option<String>,
    pub ticket: Option<String>,
    pub technicians: Option<String>,
    pub program: Option<String>,
    pub service_type: Option<String>,
    pub root_cause_cat: Option<String>,
    pub issue_desc: Option<String>,
    pub root_cause_details: Option<String>,
    pub wiring_notes: Option<String>,
    pub structural_notes: Option<String>,
    pub verification_notes: Option<String>,
    pub final_status: Option<RepairStatus>,
    pub limitations: Option<String>,
    pub snapshot: RepairSnapshot,
    pub component_changes: Vec<ComponentChangeRecord>,
    pub config_changes: Vec<ConfigChangeRecord>,
    /// Only codes with a stored row appear. A missing code is "unset", which
    /// is not the same as `false`.
    pub checklist: BTreeMap<String, bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A component change as presented inside a [`RepairView`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComponentChangeRecord {
    pub id: i64,
    pub subsystem: Subsystem,
    pub component: String,
    pub old_serial: Option<String>,
    pub new_serial: Option<String>,
    pub old_fw: Option<String>,
    pub new_fw: Option<String>,
    pub reason: Option<String>,
    pub performed_by: Option<String>,
    pub change_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl From<&ComponentChange> for ComponentChangeRecord {
    fn from(c: &ComponentChange) -> Self {
        Self {
            id: c.id,
            subsystem: c.subsystem,
            component: c.component.clone(),
            old_serial: c.old_serial.clone(),
            new_serial: c.new_serial.clone(),
            old_fw: c.old_fw.clone(),
            new_fw: c.new_fw.clone(),
            reason: c.reason.clone(),
            performed_by: c.performed_by.clone(),
            change_date: c.change_date,
            created_at: c.created_at,
        }
    }
}

/// A config change as presented inside a [`RepairView`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConfigChangeRecord {
    pub id: i64,
    pub system: String,
    pub parameter: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&ConfigChange> for ConfigChangeRecord {
    fn from(c: &ConfigChange) -> Self {
        Self {
            id: c.id,
            system: c.system.clone(),
            parameter: c.parameter.clone(),
            old_value: c.old_value.clone(),
            new_value: c.new_value.clone(),
            reason: c.reason.clone(),
            created_at: c.created_at,
        }
    }
}

/// Catalog entry as listed by `GET /checklist-items`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItemRecord {
    pub code: String,
    pub label: String,
    pub sort_order: i64,
    pub active: bool,
}

impl From<ChecklistItem> for ChecklistItemRecord {
    fn from(item: ChecklistItem) -> Self {
        Self {
            code: item.code,
            label: item.label,
            sort_order: item.sort_order,
            active: item.active,
        }
    }
}

/// Acknowledgement body for mutations that return nothing else.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub const OK: Self = Self { ok: true };
}
