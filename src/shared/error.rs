//! Shared Error Types
//!
//! Errors that can be raised without touching storage or HTTP. Today that is
//! request validation: one or more fields broke a length rule.
//!
//! # Usage
//!
//! ```rust
//! use kanban::shared::error::SharedError;
//!
//! let error = SharedError::validation("username", "must be 4 to 16 characters");
//! assert_eq!(error.fields().len(), 1);
//! ```
use serde::Serialize;
use thiserror::Error;

/// A single failing request field
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Name of the field as it appears in the JSON body
    pub field: String,
    /// Human-readable error message
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Shared error types
#[derive(Debug, Error, Clone)]
pub enum SharedError {
    /// Request validation error, carrying every failing field
    #[error("Validation failed for {}", field_names(.fields))]
    ValidationError {
        fields: Vec<FieldError>,
    },
}

fn field_names(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(|f| f.field.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

impl SharedError {
    /// Create a validation error for a single field
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            fields: vec![FieldError::new(field, message)],
        }
    }

    /// Failing fields
    pub fn fields(&self) -> &[FieldError] {
        match self {
            Self::ValidationError { fields } => fields,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error() {
        let error = SharedError::validation("name", "must be 1 to 256 characters");
        let SharedError::ValidationError { fields } = &error;
        assert_eq!(fields, &vec![FieldError::new("name", "must be 1 to 256 characters")]);
    }

    #[test]
    fn test_error_display_lists_fields() {
        let error = SharedError::ValidationError {
            fields: vec![
                FieldError::new("username", "too short"),
                FieldError::new("password", "too short"),
            ],
        };
        assert_eq!(error.to_string(), "Validation failed for username, password");
    }
}
