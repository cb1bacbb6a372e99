/**
 * Application State Management
 *
 * This module defines the application state shared by every handler.
 *
 * # Contents
 *
 * - the credential store handle (`Arc<dyn CredentialStore>`)
 * - the token codec, built once from the signing secret
 * - the password hasher and the credential validator
 *
 * Everything except the store is immutable after startup. The store is
 * internally synchronized (`PgPool`, or the memory store's `RwLock`).
 */

use std::sync::Arc;

use crate::backend::auth::credentials::CredentialValidator;
use crate::backend::auth::password::{PasswordError, PasswordHasher};
use crate::backend::auth::sessions::TokenCodec;
use crate::backend::auth::users::CredentialStore;
use crate::shared::AppConfig;

/// Application state
#[derive(Clone)]
pub struct AppState {
    /// Credential store adapter (PostgreSQL or in-memory)
    pub store: Arc<dyn CredentialStore>,

    /// Token codec holding the process-wide signing key
    pub codec: Arc<TokenCodec>,

    /// bcrypt hasher at the configured cost
    pub hasher: PasswordHasher,

    pub validator: Arc<CredentialValidator>,
}

impl AppState {
    /// Build the state around `store` from configuration
    pub fn new(store: Arc<dyn CredentialStore>, config: &AppConfig) -> Result<Self, PasswordError> {
        let hasher = PasswordHasher::new(config.bcrypt_cost);
        let validator = CredentialValidator::new(store.clone(), hasher)?;

        Ok(Self {
            store,
            codec: Arc::new(TokenCodec::from_config(config)),
            hasher,
            validator: Arc::new(validator),
        })
    }
}
