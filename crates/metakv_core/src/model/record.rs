//! Record domain model.
//!
//! # Responsibility
//! - Define the (key, value) pair persisted in the `metadata` table.
//! - Validate the invariants the core owns before a write.
//!
//! # Invariants
//! - `key` is non-empty and contains no whitespace.
//! - Length limits are owned by the backend schema, not by this type.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// One stored (key, value) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Unique identifier of the record.
    pub key: String,
    /// Opaque text payload.
    pub value: String,
}

/// Violation of a record invariant detected before persistence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordValidationError {
    EmptyKey,
    KeyContainsWhitespace(String),
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyKey => write!(f, "key cannot be empty"),
            Self::KeyContainsWhitespace(key) => {
                write!(f, "key `{key}` cannot contain whitespace")
            }
        }
    }
}

impl Error for RecordValidationError {}

impl Record {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Checks that `key` is usable as a record identifier.
pub fn validate_key(key: &str) -> Result<(), RecordValidationError> {
    if key.is_empty() {
        return Err(RecordValidationError::EmptyKey);
    }
    if key.chars().any(char::is_whitespace) {
        return Err(RecordValidationError::KeyContainsWhitespace(key.to_string()));
    }
    Ok(())
}
