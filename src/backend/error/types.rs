/**
 * Backend Error Types
 *
 * The error every handler returns. Each variant maps to one HTTP status:
 *
 * - `Malformed` (422) - request body failed parsing or validation; carries
 *   the failing fields
 * - `Unauthenticated` (401) - missing, invalid or expired token
 * - `Unauthorized` (403) - the caller is not the root user of the document
 * - `NotFound` (404) - the document doesn't exist
 * - `Unprocessable` (422) - well-formed but rejected: duplicate username,
 *   stale or out-of-bounds move
 * - `Internal` (500) - storage, transaction or primitive failure
 *
 * `Internal` never shows its detail to clients unless debug detail is on.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::shared::error::FieldError;
use crate::shared::models::EntityKind;

/// User-safe message for every internal failure
pub const INTERNAL_MESSAGE: &str = "Something went wrong. Please try again.";

/// Backend error taxonomy
///
/// # Usage
///
/// ```rust
/// use kanban::backend::error::BackendError;
/// use kanban::shared::models::EntityKind;
///
/// let err = BackendError::not_found(EntityKind::Board);
/// assert_eq!(err.status_code().as_u16(), 404);
/// ```
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Malformed request: {message}")]
    Malformed {
        message: String,
        fields: Vec<FieldError>,
    },

    #[error("Unauthenticated: {message}")]
    Unauthenticated { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Unprocessable: {message}")]
    Unprocessable { message: String },

    /// `detail` is for logs and debug responses only
    #[error("Internal error: {detail}")]
    Internal { detail: String },
}

impl BackendError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
            fields: Vec::new(),
        }
    }

    pub fn unauthenticated(message: impl Into<String>) -> Self {
        Self::Unauthenticated {
            message: message.into(),
        }
    }

    /// The caller doesn't own a document of `kind`
    pub fn unauthorized(kind: EntityKind) -> Self {
        Self::Unauthorized {
            message: format!("not authorized to access this {}", kind),
        }
    }

    pub fn not_found(kind: EntityKind) -> Self {
        Self::NotFound {
            message: format!("{} not found", kind),
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }

    pub fn internal(detail: impl Into<String>) -> Self {
        Self::Internal {
            detail: detail.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Malformed { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Unauthenticated { .. } => StatusCode::UNAUTHORIZED,
            Self::Unauthorized { .. } => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unprocessable { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-safe error message
    pub fn message(&self) -> String {
        match self {
            Self::Malformed { message, .. }
            | Self::Unauthenticated { message }
            | Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Unprocessable { message } => message.clone(),
            Self::Internal { .. } => INTERNAL_MESSAGE.to_string(),
        }
    }

    /// Detail only exposed in debug responses
    pub fn dev_detail(&self) -> Option<String> {
        match self {
            Self::Internal { detail } => Some(detail.clone()),
            Self::Unprocessable { .. } | Self::Malformed { .. } => Some(self.to_string()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            BackendError::malformed("bad").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            BackendError::unauthenticated("no token").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            BackendError::unauthorized(EntityKind::Board).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            BackendError::not_found(EntityKind::Card).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            BackendError::unprocessable("stale").status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            BackendError::internal("db down").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_message_hides_detail() {
        let error = BackendError::internal("connection refused");
        assert_eq!(error.message(), INTERNAL_MESSAGE);
        assert_eq!(error.dev_detail().as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_messages_name_the_kind() {
        assert_eq!(BackendError::not_found(EntityKind::List).message(), "list not found");
        match BackendError::unauthorized(EntityKind::Checklist) {
            BackendError::Unauthorized { message } => assert!(message.contains("checklist")),
            _ => panic!("Expected Unauthorized"),
        }
    }
}
