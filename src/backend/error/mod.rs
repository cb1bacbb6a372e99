//! Backend Error Module
//!
//! This module defines the error type returned by HTTP handlers and the
//! access guard, and its conversion into a JSON HTTP response.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its status code mapping
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use opsdesk::backend::error::BackendError;
//! use axum::response::Json;
//!
//! async fn handler() -> Result<Json<()>, BackendError> {
//!     Err(BackendError::InvalidCredentials)
//! }
//! ```

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::ErrorBody;
pub use types::BackendError;
