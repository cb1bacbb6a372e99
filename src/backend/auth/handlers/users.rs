/**
 * User Administration Handlers
 *
 * - GET /users
 * - PUT /users/{id}/roles
 * - PUT /users/{id}/permissions
 *
 * All three require `Admin` and `MANAGE_USERS`. Role and permission names
 * are parsed against the closed sets before the store is touched; an
 * identity must always keep at least one role.
 */

use axum::{
    extract::{Path, State},
    response::Json,
};

use crate::backend::auth::handlers::types::{UpdatePermissionsRequest, UpdateRolesRequest};
use crate::backend::auth::users::PublicIdentity;
use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::roles::parse_tags;
use crate::shared::{Permission, Role, SharedError};

/// List all identities, ordered by id
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Json<Vec<PublicIdentity>>, BackendError> {
    let identities = state.store.list().await?;
    Ok(Json(identities.into_iter().map(PublicIdentity::from).collect()))
}

/// Replace an identity's roles
///
/// # Errors
///
/// * `400 Bad Request` - empty set or unknown role name
/// * `404 Not Found` - unknown id
pub async fn update_roles(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateRolesRequest>,
) -> Result<Json<PublicIdentity>, BackendError> {
    let roles = parse_tags::<Role, _, _>(&request.roles)?;
    if roles.is_empty() {
        return Err(SharedError::validation("roles", "At least one role is required").into());
    }

    let identity = state.store.update_roles(id, &roles).await?;
    tracing::info!("Roles of identity {} set to {:?}", id, roles);
    Ok(Json(identity.into()))
}

/// Replace an identity's permissions
///
/// An empty set is allowed: the identity keeps its roles but loses every
/// permission.
pub async fn update_permissions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePermissionsRequest>,
) -> Result<Json<PublicIdentity>, BackendError> {
    let permissions = parse_tags::<Permission, _, _>(&request.permissions)?;

    let identity = state.store.update_permissions(id, &permissions).await?;
    tracing::info!("Permissions of identity {} set to {:?}", id, permissions);
    Ok(Json(identity.into()))
}
