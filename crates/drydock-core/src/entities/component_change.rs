use chrono::{DateTime, NaiveDate, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Subsystem;

/// A hardware swap logged against a repair. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComponentChange {
    pub id: i64,
    pub repair_id: i64,
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
