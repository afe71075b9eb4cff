//! Entity structs for all drydock domain objects.
//!
//! Each entity maps to one table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and schema
//! validation.

mod checklist;
mod component_change;
mod config_change;
mod repair;
mod vessel;

pub use checklist::{ChecklistItem, ChecklistItemSeed, RepairChecklistEntry};
pub use component_change::ComponentChange;
pub use config_change::ConfigChange;
pub use repair::{Repair, RepairSnapshot};
pub use vessel::Vessel;
