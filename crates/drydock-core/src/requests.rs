//! Payloads accepted at the boundary.
//!
//! Deserialization already rejects unknown enum labels and non-calendar dates.
//! The `validated` methods cover what types alone cannot: required fields that
//! were omitted or left blank.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

use crate::enums::Subsystem;
use crate::errors::CoreError;

/// Deserialize a field as `Some(inner)` whenever it is present, so that an
/// explicit `null` becomes `Some(None)` and an absent field (via
/// `#[serde(default)]`) stays `None`.
///
/// # Errors
///
/// Propagates the inner deserializer error.
pub fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Body of `POST /repairs`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RepairCreate {
    #[serde(default)]
    pub hull_id: Option<String>,
    #[serde(default)]
    pub date_opened: Option<NaiveDate>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub ticket: Option<String>,
    #[serde(default)]
    pub technicians: Option<String>,
    #[serde(default)]
    pub program: Option<String>,
    #[serde(default)]
    pub service_type: Option<String>,
    #[serde(default)]
    pub root_cause_cat: Option<String>,
    #[serde(default)]
    pub issue_desc: Option<String>,
}

/// A creation payload whose required fields are known to be present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewRepair {
    pub hull_id: String,
    pub date_opened: NaiveDate,
    pub location: Option<String>,
    pub ticket: Option<String>,
    pub technicians: Option<String>,
    pub program: Option<String>,
    pub service_type: Option<String>,
    pub root_cause_cat: Option<String>,
    pub issue_desc: Option<String>,
}

impl RepairCreate {
    /// Shorthand for the two required fields.
    #[must_use]
    pub fn new(hull_id: impl Into<String>, date_opened: NaiveDate) -> Self {
        Self {
            hull_id: Some(hull_id.into()),
            date_opened: Some(date_opened),
            ..Self::default()
        }
    }

    /// Check required fields and trim the hull id.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming `hull_id` or `date_opened` when
    /// either is missing, or when the hull id is blank.
    pub fn validated(self) -> Result<NewRepair, CoreError> {
        let hull_id = self
            .hull_id
            .as_deref()
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| CoreError::validation("hull_id", "hull id is required"))?
            .to_string();
        let date_opened = self
            .date_opened
            .ok_or_else(|| CoreError::validation("date_opened", "open date is required"))?;

        Ok(NewRepair {
            hull_id,
            date_opened,
            location: self.location,
            ticket: self.ticket,
            technicians: self.technicians,
            program: self.program,
            service_type: self.service_type,
            root_cause_cat: self.root_cause_cat,
            issue_desc: self.issue_desc,
        })
    }
}

/// Body of `POST /repairs/{uid}/component-changes`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ComponentChangeCreate {
    pub subsystem: Subsystem,
    pub component: String,
    #[serde(default)]
    pub old_serial: Option<String>,
    #[serde(default)]
    pub new_serial: Option<String>,
    #[serde(default)]
    pub old_fw: Option<String>,
    #[serde(default)]
    pub new_fw: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub performed_by: Option<String>,
    #[serde(default)]
    pub change_date: Option<NaiveDate>,
}

impl ComponentChangeCreate {
    #[must_use]
    pub fn new(subsystem: Subsystem, component: impl Into<String>) -> Self {
        Self {
            subsystem,
            component: component.into(),
            old_serial: None,
            new_serial: None,
            old_fw: None,
            new_fw: None,
            reason: None,
            performed_by: None,
            change_date: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `component` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.component.trim().is_empty() {
            return Err(CoreError::validation("component", "component name is required"));
        }
        Ok(())
    }
}

/// Body of `POST /repairs/{uid}/config-changes`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ConfigChangeCreate {
    pub system: String,
    pub parameter: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
    #[serde(default)]
    pub reason: Option<String>,
}

impl ConfigChangeCreate {
    #[must_use]
    pub fn new(system: impl Into<String>, parameter: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            parameter: parameter.into(),
            old_value: None,
            new_value: None,
            reason: None,
        }
    }

    /// # Errors
    ///
    /// Returns `CoreError::Validation` if `system` or `parameter` is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.system.trim().is_empty() {
            return Err(CoreError::validation("system", "system name is required"));
        }
        if self.parameter.trim().is_empty() {
            return Err(CoreError::validation("parameter", "parameter name is required"));
        }
        Ok(())
    }
}

/// Body of `PUT /repairs/{uid}/checklist`: checklist item code to checked.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChecklistUpdate {
    pub states: BTreeMap<String, bool>,
}
