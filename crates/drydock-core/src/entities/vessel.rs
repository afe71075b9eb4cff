use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A vessel in the fleet, identified by its hull id.
///
/// Vessels are created implicitly the first time a repair names an unknown
/// hull id.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Vessel {
    pub id: i64,
    /// Human-assigned hull identifier, unique across the fleet (e.g. `"R132"`).
    pub hull_id: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}
