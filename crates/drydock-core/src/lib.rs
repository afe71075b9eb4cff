//! # drydock-core
//!
//! Core types, identifier formatting, and error types for drydock.
//!
//! This crate provides the foundational types shared across all drydock crates:
//! - Entity structs for vessels, repairs, change logs, and the checklist catalog
//! - Closed enumerations for subsystems and repair status
//! - Repair UID formatting and validation
//! - Request payloads accepted at the boundary
//! - The aggregate repair view and the mapper that builds it
//! - Cross-cutting error types

pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod requests;
pub mod responses;
pub mod view;
