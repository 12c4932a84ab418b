//! Request field validation
//!
//! Length rules for every user-supplied text field. Lengths are counted in
//! characters, not bytes. A [`Validator`] collects every failing field so the
//! client sees them all at once.

use crate::shared::error::{FieldError, SharedError};

/// Inclusive length bounds per field
pub mod rule {
    use std::ops::RangeInclusive;

    pub const USERNAME: RangeInclusive<usize> = 4..=16;
    pub const PASSWORD: RangeInclusive<usize> = 8..=32;
    pub const NAME: RangeInclusive<usize> = 1..=256;
    pub const COLOR: RangeInclusive<usize> = 1..=256;
    pub const DESCRIPTION: RangeInclusive<usize> = 0..=2048;
    pub const OBJECTIVE: RangeInclusive<usize> = 1..=512;
}

/// Request bodies that check themselves before a handler runs
pub trait Validate {
    fn validate(&self) -> Result<(), SharedError>;
}

/// Collects field errors
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the character count of `value` against `range`
    pub fn length(
        mut self,
        field: &str,
        value: &str,
        range: std::ops::RangeInclusive<usize>,
    ) -> Self {
        let len = value.chars().count();
        if !range.contains(&len) {
            self.errors.push(FieldError::new(
                field,
                format!(
                    "must be between {} and {} characters",
                    range.start(),
                    range.end()
                ),
            ));
        }
        self
    }

    /// Same as [`Validator::length`], skipped when the field is absent
    pub fn optional_length(
        self,
        field: &str,
        value: Option<&str>,
        range: std::ops::RangeInclusive<usize>,
    ) -> Self {
        match value {
            Some(value) => self.length(field, value, range),
            None => self,
        }
    }

    /// Record a failure that isn't a length rule
    pub fn fail(mut self, field: &str, message: impl Into<String>) -> Self {
        self.errors.push(FieldError::new(field, message));
        self
    }

    pub fn finish(self) -> Result<(), SharedError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(SharedError::ValidationError {
                fields: self.errors,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_fields_pass() {
        let result = Validator::new()
            .length("username", "alice", rule::USERNAME)
            .length("password", "password1", rule::PASSWORD)
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn test_collects_every_failure() {
        let err = Validator::new()
            .length("username", "abc", rule::USERNAME)
            .length("password", "short", rule::PASSWORD)
            .length("name", "ok", rule::NAME)
            .finish()
            .unwrap_err();

        let fields: Vec<&str> = err.fields().iter().map(|f| f.field.as_str()).collect();
        assert_eq!(fields, vec!["username", "password"]);
    }

    #[test]
    fn test_counts_characters_not_bytes() {
        // 4 characters, 8 bytes
        let result = Validator::new()
            .length("username", "éééé", rule::USERNAME)
            .finish();
        assert!(result.is_ok());
    }

    #[test]
    fn test_optional_length_skips_absent() {
        assert!(Validator::new()
            .optional_length("name", None, rule::NAME)
            .finish()
            .is_ok());
        assert!(Validator::new()
            .optional_length("name", Some(""), rule::NAME)
            .finish()
            .is_err());
    }

    #[test]
    fn test_description_may_be_empty() {
        assert!(Validator::new()
            .length("description", "", rule::DESCRIPTION)
            .finish()
            .is_ok());
        let long = "x".repeat(2049);
        assert!(Validator::new()
            .length("description", &long, rule::DESCRIPTION)
            .finish()
            .is_err());
    }
}
