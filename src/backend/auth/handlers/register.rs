/**
 * Registration Handler
 *
 * POST /auth/register
 *
 * # Registration Process
 *
 * 1. Validate the request (before any state change)
 * 2. Hash the password with bcrypt on the blocking pool
 * 3. Create the identity with the lowest-privilege defaults
 *    (`{User}` / `{VIEW_DASHBOARD}`)
 * 4. Return the created identity (201, no hash)
 *
 * # Validation
 *
 * - Display name must not be blank
 * - Email must contain '@' (basic validation); it is stored normalized
 * - Password must be at least 6 characters long
 * - A blank area becomes `"default"`
 * - Email must be unique (409 otherwise)
 */

use axum::{extract::State, http::StatusCode, response::Json};

use crate::backend::auth::handlers::types::RegisterRequest;
use crate::backend::auth::users::{normalize_email, NewIdentity, PublicIdentity};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{Permission, Role, SharedError};

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LEN: usize = 6;

/// Area assigned when the request leaves it blank
pub const DEFAULT_AREA: &str = "default";

/// A registration request that passed validation
#[derive(Debug, PartialEq, Eq)]
pub struct ValidRegistration {
    pub display_name: String,
    pub email: String,
    pub area: String,
}

/// Check a registration request and normalize its fields
pub fn validate_registration(request: &RegisterRequest) -> Result<ValidRegistration, SharedError> {
    let display_name = request.display_name.trim();
    if display_name.is_empty() {
        return Err(SharedError::validation("display_name", "Display name is required"));
    }

    let email = normalize_email(&request.email);
    if !email.contains('@') {
        return Err(SharedError::validation("email", "Invalid email format"));
    }

    if request.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(SharedError::validation(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }

    let area = match request.area.trim() {
        "" => DEFAULT_AREA,
        area => area,
    };

    Ok(ValidRegistration {
        display_name: display_name.to_string(),
        email,
        area: area.to_string(),
    })
}

/// Registration handler
///
/// # Errors
///
/// * `400 Bad Request` - validation failed
/// * `409 Conflict` - email already registered
/// * `500 Internal Server Error` - hashing or store failure
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<PublicIdentity>), BackendError> {
    let valid = validate_registration(&request).map_err(|e| {
        tracing::warn!("Registration rejected: {}", e);
        e
    })?;

    let secret_hash = state.hasher.hash_blocking(request.password).await?;
    let identity = state
        .store
        .create(valid.into_new_identity(secret_hash))
        .await
        .map_err(|e| {
            tracing::warn!("Registration failed: {}", e);
            e
        })?;

    tracing::info!("Registered identity {} ({})", identity.id, identity.email);

    Ok((StatusCode::CREATED, Json(identity.into())))
}

impl ValidRegistration {
    /// Lowest-privilege identity for this registration
    fn into_new_identity(self, secret_hash: String) -> NewIdentity {
        NewIdentity {
            email: self.email,
            display_name: self.display_name,
            secret_hash,
            roles: Role::defaults(),
            permissions: Permission::defaults(),
            area: self.area,
        }
    }
}
