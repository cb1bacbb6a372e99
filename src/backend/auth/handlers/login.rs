/**
 * Login Handler
 *
 * POST /auth/login
 *
 * # Authentication Process
 *
 * 1. Validate the credentials (store lookup + bcrypt verification)
 * 2. Issue a signed token for the identity
 * 3. Return `{ "access_token": ... }`
 *
 * # Security
 *
 * - Unknown email and wrong password give the same 401 body
 * - A store outage is a 500, never "invalid credentials"
 * - The password is never logged or returned
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::handlers::types::{LoginRequest, TokenResponse};
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Login handler
///
/// # Errors
///
/// * `401 Unauthorized` - unknown email or wrong password
/// * `500 Internal Server Error` - store or signing failure
///
/// # Example Response
///
/// ```json
/// { "access_token": "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9..." }
/// ```
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, BackendError> {
    let identity = state
        .validator
        .validate(&request.email, &request.password)
        .await?
        .ok_or(BackendError::InvalidCredentials)?;

    let access_token = state.codec.issue(&identity)?;

    tracing::info!("Identity {} logged in", identity.id);

    Ok(Json(TokenResponse { access_token }))
}
