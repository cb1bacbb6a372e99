/**
 * Credential Validation
 *
 * Turns an (identifier, secret) pair into an authenticated identity.
 *
 * # Failure Semantics
 *
 * An unknown email and a wrong password produce the same `Ok(None)`, and
 * both paths run exactly one bcrypt verification (against a decoy hash
 * when there is no identity), so neither the result nor its cost tells
 * the caller which factor failed. Store failures surface as `Err`.
 */

use std::sync::Arc;

use crate::backend::auth::password::{PasswordError, PasswordHasher};
use crate::backend::auth::users::{normalize_email, CredentialStore, PublicIdentity, StoreError};

const DECOY_SECRET: &str = "decoy-secret-for-unknown-identities";

/// Validates login credentials against a credential store
pub struct CredentialValidator {
    store: Arc<dyn CredentialStore>,
    decoy_hash: String,
}

impl CredentialValidator {
    /// Create a validator; hashes the decoy secret once at `hasher`'s cost
    pub fn new(store: Arc<dyn CredentialStore>, hasher: PasswordHasher) -> Result<Self, PasswordError> {
        Ok(Self {
            store,
            decoy_hash: hasher.hash(DECOY_SECRET)?,
        })
    }

    /// Validate `secret` for the identity registered under `identifier`
    ///
    /// # Returns
    ///
    /// - `Ok(Some(identity))` without its secret hash on success
    /// - `Ok(None)` when the email is unknown or the secret does not match
    /// - `Err(StoreError)` when the store itself failed
    pub async fn validate(
        &self,
        identifier: &str,
        secret: &str,
    ) -> Result<Option<PublicIdentity>, StoreError> {
        let email = normalize_email(identifier);
        let identity = self.store.find_by_email(&email).await?;

        let stored_hash = identity
            .as_ref()
            .map_or_else(|| self.decoy_hash.clone(), |i| i.secret_hash.clone());
        let valid = PasswordHasher::verify_blocking(secret.to_string(), stored_hash).await;

        match identity {
            Some(identity) if valid => Ok(Some(identity.into())),
            Some(identity) => {
                tracing::warn!("Invalid password for identity {}", identity.id);
                Ok(None)
            }
            None => {
                tracing::warn!("Login attempt for unknown email");
                Ok(None)
            }
        }
    }
}
