//! Cross-cutting error types for drydock.
//!
//! Storage errors (`DatabaseError`) live in `drydock-db`; HTTP mapping lives in
//! `drydock-api`. This module only carries what payload validation can raise
//! before any storage is touched.

use thiserror::Error;

/// Errors that can be raised by any drydock crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A payload field is missing or malformed.
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A string did not name a known enumeration variant.
    #[error("Unknown {kind} value: '{value}'")]
    UnknownVariant { kind: &'static str, value: String },

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl CoreError {
    /// Shorthand for a [`CoreError::Validation`] on `field`.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}
