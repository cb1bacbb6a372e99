/**
 * In-Memory Credential Store
 *
 * Used when no `DATABASE_URL` is configured and throughout the test-suite.
 * Ids are assigned sequentially from 1 and emails are unique, matching the
 * constraints of the `users` table.
 */

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::backend::auth::users::{CredentialStore, Identity, NewIdentity, StoreError};
use crate::shared::{Permission, Role};

#[derive(Default)]
struct Inner {
    next_id: i64,
    identities: BTreeMap<i64, Identity>,
}

/// Credential store held in process memory
#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Inner>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored identities
    pub async fn len(&self) -> usize {
        self.inner.read().await.identities.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    async fn update<F>(&self, id: i64, apply: F) -> Result<Identity, StoreError>
    where
        F: FnOnce(&mut Identity) + Send,
    {
        let mut inner = self.inner.write().await;
        let identity = inner.identities.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        apply(identity);
        identity.updated_at = Utc::now();
        Ok(identity.clone())
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.identities.values().find(|i| i.email == email).cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, StoreError> {
        Ok(self.inner.read().await.identities.get(&id).cloned())
    }

    async fn create(&self, new_identity: NewIdentity) -> Result<Identity, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.identities.values().any(|i| i.email == new_identity.email) {
            return Err(StoreError::DuplicateEmail(new_identity.email));
        }

        inner.next_id += 1;
        let now = Utc::now();
        let identity = Identity {
            id: inner.next_id,
            email: new_identity.email,
            display_name: new_identity.display_name,
            secret_hash: new_identity.secret_hash,
            roles: new_identity.roles,
            permissions: new_identity.permissions,
            area: new_identity.area,
            created_at: now,
            updated_at: now,
        };
        inner.identities.insert(identity.id, identity.clone());
        Ok(identity)
    }

    async fn update_roles(&self, id: i64, roles: &BTreeSet<Role>) -> Result<Identity, StoreError> {
        let roles = roles.clone();
        self.update(id, move |identity| identity.roles = roles).await
    }

    async fn update_permissions(
        &self,
        id: i64,
        permissions: &BTreeSet<Permission>,
    ) -> Result<Identity, StoreError> {
        let permissions = permissions.clone();
        self.update(id, move |identity| identity.permissions = permissions)
            .await
    }

    async fn list(&self) -> Result<Vec<Identity>, StoreError> {
        Ok(self.inner.read().await.identities.values().cloned().collect())
    }
}
