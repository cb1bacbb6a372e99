//! Shared Error Types
//!
//! This module defines error types that are shared between the library
//! layers and the HTTP backend. They describe bad input rather than
//! infrastructure failures.
//!
//! # Error Categories
//!
//! - `ValidationError` - A request field failed validation
//! - `UnknownTag` - A role or permission name outside the closed set
//!
//! # Usage
//!
//! ```rust
//! use opsdesk::shared::error::SharedError;
//!
//! let error = SharedError::validation("email", "Invalid email format");
//! ```
use thiserror::Error;

/// Shared error types
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SharedError {
    /// Data validation error
    #[error("Validation error in field '{field}': {message}")]
    ValidationError {
        /// The field that failed validation
        field: String,
        /// Human-readable error message
        message: String,
    },

    /// Role or permission name that is not part of the closed set
    #[error("Unknown {kind}: '{value}'")]
    UnknownTag {
        /// `"role"` or `"permission"`
        kind: &'static str,
        /// The offending wire name
        value: String,
    },
}

impl SharedError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new unknown-tag error
    pub fn unknown_tag(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownTag {
            kind,
            value: value.into(),
        }
    }
}
