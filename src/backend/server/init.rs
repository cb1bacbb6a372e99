/**
 * Server Initialization
 *
 * This module builds the Axum application from the loaded configuration.
 *
 * # Initialization Process
 *
 * 1. Open the credential store (PostgreSQL or in-memory)
 * 2. Build the shared state (token codec, hasher, credential validator)
 * 3. Seed the bootstrap administrator, if configured
 * 4. Create and configure the router
 *
 * # Bootstrap Administrator
 *
 * When `BOOTSTRAP_ADMIN_EMAIL` / `BOOTSTRAP_ADMIN_PASSWORD` are set and no
 * identity holds that email, one is created with `{Admin}` and every
 * permission. An existing identity is never modified, so restarting with a
 * different password does not reset it.
 */

use axum::Router;

use crate::backend::auth::users::{normalize_email, NewIdentity, PublicIdentity, StoreError};
use crate::backend::error::BackendError;
use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_store;
use crate::backend::server::state::AppState;
use crate::shared::{AppConfig, BootstrapAdmin, Permission, Role};

/// Area recorded for the bootstrap administrator
const ADMIN_AREA: &str = "administration";

/// Create and configure the Axum application
///
/// # Errors
///
/// Fails when the configured database cannot be opened or the bootstrap
/// administrator cannot be created.
pub async fn create_app(config: &AppConfig) -> Result<Router<()>, BackendError> {
    tracing::info!("Initializing opsdesk backend server");

    let store = load_store(config).await?;
    let app_state = AppState::new(store, config)?;

    if let Some(admin) = &config.bootstrap_admin {
        seed_bootstrap_admin(&app_state, admin).await?;
    }

    let app = create_router(app_state);
    tracing::info!("Router configured");

    Ok(app)
}

/// Create the bootstrap administrator unless its email is already taken
///
/// Returns the created identity, or `None` when it already existed.
pub async fn seed_bootstrap_admin(
    app_state: &AppState,
    admin: &BootstrapAdmin,
) -> Result<Option<PublicIdentity>, BackendError> {
    let email = normalize_email(&admin.email);
    if app_state.store.find_by_email(&email).await?.is_some() {
        tracing::info!("Bootstrap administrator {} already exists", email);
        return Ok(None);
    }

    let secret_hash = app_state.hasher.hash_blocking(admin.password.clone()).await?;
    let display_name = email.split('@').next().unwrap_or_default().to_string();

    let created = app_state
        .store
        .create(NewIdentity {
            email: email.clone(),
            display_name,
            secret_hash,
            roles: [Role::Admin].into(),
            permissions: Permission::all(),
            area: ADMIN_AREA.to_string(),
        })
        .await;

    match created {
        Ok(identity) => {
            tracing::info!("Created bootstrap administrator {} ({})", identity.id, email);
            Ok(Some(identity.into()))
        }
        // Another instance created it between the lookup and the insert.
        Err(StoreError::DuplicateEmail(_)) => Ok(None),
        Err(e) => Err(e.into()),
    }
}
