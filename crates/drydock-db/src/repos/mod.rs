//! Repository modules, one per entity family.
//!
//! Each module is an `impl RepairService` block plus the row parser for its
//! table. Pieces that must run inside another operation's transaction are
//! free functions taking a `&libsql::Connection`.

pub mod checklist;
pub mod component_change;
pub mod config_change;
pub mod repair;
pub mod vessel;
