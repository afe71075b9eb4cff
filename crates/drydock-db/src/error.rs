//! Database error types for drydock-db.

use drydock_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A payload field is missing or malformed.
    #[error("Validation error on '{field}': {reason}")]
    Validation { field: String, reason: String },

    /// A referenced repair, change, or vessel does not exist.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// A uniqueness or CHECK constraint rejected the write.
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// A child row referenced a parent that does not exist.
    #[error("Referential integrity error: {0}")]
    ReferentialIntegrity(String),

    /// A SQL query failed.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error that is not a recognised constraint failure.
    #[error("libSQL error: {0}")]
    LibSql(#[source] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Shorthand for [`DatabaseError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Sort a libSQL error into the constraint taxonomy by its message.
    ///
    /// SQLite reports constraint failures as
    /// `"<KIND> constraint failed: <detail>"`, which survives every libSQL
    /// backend, unlike the numeric extended codes.
    #[must_use]
    pub fn classify(err: libsql::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("FOREIGN KEY constraint failed") {
            Self::ReferentialIntegrity(msg)
        } else if msg.contains("UNIQUE constraint failed")
            || msg.contains("PRIMARY KEY constraint failed")
            || msg.contains("CHECK constraint failed")
        {
            Self::ConstraintViolation(msg)
        } else {
            Self::LibSql(err)
        }
    }

    /// Whether this is a uniqueness conflict on `column` (e.g. `repairs.repair_uid`).
    #[must_use]
    pub fn is_unique_violation_on(&self, column: &str) -> bool {
        matches!(self, Self::ConstraintViolation(msg) if msg.contains("UNIQUE") && msg.contains(column))
    }
}

impl From<libsql::Error> for DatabaseError {
    fn from(err: libsql::Error) -> Self {
        Self::classify(err)
    }
}

impl From<CoreError> for DatabaseError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation { field, reason } => Self::Validation { field, reason },
            CoreError::UnknownVariant { kind, value } => Self::Validation {
                field: kind.to_string(),
                reason: format!("unknown value '{value}'"),
            },
            CoreError::Other(e) => Self::Other(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_matches_column() {
        let err = DatabaseError::ConstraintViolation(
            "UNIQUE constraint failed: repairs.repair_uid".into(),
        );
        assert!(err.is_unique_violation_on("repairs.repair_uid"));
        assert!(!err.is_unique_violation_on("vessels.hull_id"));
    }

    #[test]
    fn core_validation_keeps_field() {
        let err: DatabaseError = CoreError::validation("hull_id", "required").into();
        match err {
            DatabaseError::Validation { field, .. } => assert_eq!(field, "hull_id"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
