use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Catalog entry in the fixed verification checklist.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItem {
    pub id: i64,
    pub code: String,
    pub label: String,
    pub sort_order: i64,
    pub active: bool,
}

/// Catalog entry as supplied by configuration, before it has a row id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistItemSeed {
    pub code: String,
    pub label: String,
    #[serde(default)]
    pub sort_order: i64,
    #[serde(default = "default_active")]
    pub active: bool,
}

const fn default_active() -> bool {
    true
}

/// Completion state of one checklist item for one repair.
///
/// `checked_at` is set when the row transitions to checked and cleared when it
/// transitions back.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepairChecklistEntry {
    pub repair_id: i64,
    pub item_id: i64,
    /// Catalog code of `item_id`, joined in for presentation.
    pub code: String,
    pub checked: bool,
    pub checked_at: Option<DateTime<Utc>>,
}
