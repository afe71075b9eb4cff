//! Mapping from service errors to HTTP responses.

use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use drydock_db::DatabaseError;
use serde::Serialize;
use thiserror::Error;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error("missing or invalid API key")]
    Unauthorized,

    /// The request body or query string could not be deserialized.
    #[error("{0}")]
    BadRequest(String),

    /// A path segment could not be parsed, e.g. a non-numeric id.
    #[error("{0}")]
    InvalidPath(String),
}

/// JSON body of every error response.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            field: None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::InvalidPath(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Database(DatabaseError::Validation { field, reason }) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse {
                    error: reason,
                    field: Some(field),
                },
            ),
            Self::Database(err @ DatabaseError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, ErrorResponse::new(err.to_string()))
            }
            Self::Database(err @ DatabaseError::ConstraintViolation(_)) => {
                (StatusCode::CONFLICT, ErrorResponse::new(err.to_string()))
            }
            Self::Database(err) => {
                tracing::error!(error = %err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new("internal server error"),
                )
            }
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                ErrorResponse::new("missing or invalid API key"),
            ),
            Self::BadRequest(message) => {
                (StatusCode::UNPROCESSABLE_ENTITY, ErrorResponse::new(message))
            }
            Self::InvalidPath(message) => (StatusCode::BAD_REQUEST, ErrorResponse::new(message)),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn status_mapping() {
        assert_eq!(
            status_of(DatabaseError::Validation {
                field: "hull_id".into(),
                reason: "required".into()
            }
            .into()),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_of(DatabaseError::not_found("repair", "REP-1").into()),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(DatabaseError::ConstraintViolation("UNIQUE".into()).into()),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(DatabaseError::ReferentialIntegrity("FOREIGN KEY".into()).into()),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(status_of(ApiError::Unauthorized), StatusCode::UNAUTHORIZED);
        assert_eq!(
            status_of(ApiError::InvalidPath("bad id".into())),
            StatusCode::BAD_REQUEST
        );
    }
}
