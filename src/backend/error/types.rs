/**
 * Backend Error Types
 *
 * This module defines the transport-level error returned by every HTTP
 * handler and by the access guard. It wraps the domain errors of the auth
 * core and maps each of them to an HTTP status code.
 *
 * # Status Code Mapping
 *
 * - `InvalidCredentials` - 401, one body for both unknown email and wrong password
 * - `Access` - 401 when unauthenticated, 403 for role or permission denials
 * - `Store` - 409 duplicate email, 404 unknown id, 500 otherwise
 * - `Shared` - 400 (request validation)
 * - `Password` / `Issue` - 500
 *
 * Infrastructure failures never surface as `InvalidCredentials`, and their
 * details are logged rather than returned to the caller.
 */

use axum::http::StatusCode;
use thiserror::Error;

use crate::backend::auth::access::AccessDenied;
use crate::backend::auth::password::PasswordError;
use crate::backend::auth::sessions::{IssueError, TokenError};
use crate::backend::auth::users::StoreError;
use crate::shared::SharedError;

const INTERNAL_MESSAGE: &str = "Internal server error";

/// Backend-specific error types
#[derive(Debug, Error)]
pub enum BackendError {
    /// Login failed; deliberately says nothing about which factor was wrong
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The access guard turned the request away
    #[error(transparent)]
    Access(#[from] AccessDenied),

    /// Credential store failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Request validation failure
    #[error(transparent)]
    Shared(#[from] SharedError),

    /// Hashing failure
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Token issuance failure
    #[error("Failed to issue token: {0}")]
    Issue(#[from] IssueError),

    /// Handler error with an explicit status
    #[error("Handler error: {message}")]
    HandlerError {
        /// HTTP status code for this error
        status: StatusCode,
        /// Human-readable error message
        message: String,
    },
}

impl From<TokenError> for BackendError {
    fn from(err: TokenError) -> Self {
        Self::Access(AccessDenied::Unauthenticated(err))
    }
}

impl BackendError {
    /// Create a new handler error with a status code
    pub fn handler(status: StatusCode, message: impl Into<String>) -> Self {
        Self::HandlerError {
            status,
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,
            Self::Access(denied) if denied.is_unauthenticated() => StatusCode::UNAUTHORIZED,
            Self::Access(_) => StatusCode::FORBIDDEN,
            Self::Store(err) => match err {
                StoreError::DuplicateEmail(_) => StatusCode::CONFLICT,
                StoreError::NotFound(_) => StatusCode::NOT_FOUND,
                StoreError::Database(_) | StoreError::Corrupt { .. } => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
            Self::Shared(_) => StatusCode::BAD_REQUEST,
            Self::Password(_) | Self::Issue(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::HandlerError { status, .. } => *status,
        }
    }

    /// Message sent to the caller
    ///
    /// Server-side failures get a generic message; the detail is only logged.
    pub fn message(&self) -> String {
        match self {
            Self::HandlerError { message, .. } => message.clone(),
            _ if self.status_code().is_server_error() => INTERNAL_MESSAGE.to_string(),
            _ => self.to_string(),
        }
    }
}
