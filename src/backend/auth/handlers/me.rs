/**
 * Current Identity and Profile Handlers
 *
 * - GET /auth/me - re-reads the caller's identity from the store
 * - GET /auth/profile - echoes the principal decoded from the token
 *
 * Both sit behind the access guard, which has already decoded and checked
 * the token; they only read the `Principal` it attached.
 */

use axum::{extract::State, response::Json};

use crate::backend::auth::access::AuthenticatedPrincipal;
use crate::backend::auth::users::{PublicIdentity, StoreError};
use crate::backend::error::BackendError;
use crate::backend::middleware::Principal;
use crate::backend::server::state::AppState;

/// Get current identity handler
///
/// # Errors
///
/// * `401 Unauthorized` - rejected by the guard
/// * `404 Not Found` - the identity was removed after the token was issued
pub async fn get_me(
    State(state): State<AppState>,
    Principal(principal): Principal,
) -> Result<Json<PublicIdentity>, BackendError> {
    let identity = state
        .store
        .find_by_id(principal.user_id)
        .await?
        .ok_or_else(|| {
            tracing::warn!("Identity not found: {}", principal.user_id);
            StoreError::NotFound(principal.user_id)
        })?;

    Ok(Json(identity.into()))
}

/// Profile handler: the claims carried by the caller's token
pub async fn get_profile(Principal(principal): Principal) -> Json<AuthenticatedPrincipal> {
    Json(principal)
}
