use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::RepairStatus;

/// A repair ticket for one vessel.
///
/// Snapshot columns are kept flat here, mirroring storage. The aggregate view
/// regroups them into a [`RepairSnapshot`].
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Repair {
    pub id: i64,
    /// System-generated `REP-<YYYYMMDD>-<HEX6>`; never reassigned.
    pub repair_uid: String,
    pub vessel_id: i64,
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
    /// `None` while the repair is still open.
    pub final_status: Option<RepairStatus>,
    pub limitations: Option<String>,
    pub snapshot_ilmor_sn: Option<String>,
    pub snapshot_ilmor_fw: Option<String>,
    pub snapshot_icu_sn: Option<String>,
    pub snapshot_orca_sn: Option<String>,
    pub snapshot_battery_sns: Option<String>,
    pub snapshot_camera: Option<String>,
    pub snapshot_radar: Option<bool>,
    pub snapshot_compass: Option<bool>,
    pub snapshot_two_battery: Option<bool>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Equipment state captured at time of repair.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepairSnapshot {
    pub ilmor_sn: Option<String>,
    pub ilmor_fw: Option<String>,
    pub icu_sn: Option<String>,
    pub orca_sn: Option<String>,
    pub battery_sns: Option<String>,
    pub camera: Option<String>,
    pub radar: Option<bool>,
    pub compass: Option<bool>,
    pub two_battery: Option<bool>,
}

impl Repair {
    /// Regroup the nine snapshot columns into one value.
    #[must_use]
    pub fn snapshot(&self) -> RepairSnapshot {
        RepairSnapshot {
            ilmor_sn: self.snapshot_ilmor_sn.clone(),
            ilmor_fw: self.snapshot_ilmor_fw.clone(),
            icu_sn: self.snapshot_icu_sn.clone(),
            orca_sn: self.snapshot_orca_sn.clone(),
            battery_sns: self.snapshot_battery_sns.clone(),
            camera: self.snapshot_camera.clone(),
            radar: self.snapshot_radar,
            compass: self.snapshot_compass,
            two_battery: self.snapshot_two_battery,
        }
    }
}
