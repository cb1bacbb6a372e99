/**
 * Identity Model and Credential Store Contract
 *
 * This module defines the identity record owned by the credential store and
 * the async trait every store adapter implements. The auth core only reads
 * identities, except on registration and role/permission administration.
 *
 * # Secret Handling
 *
 * `Identity` carries the password hash and is deliberately not
 * serializable. Everything returned to a caller goes through
 * `PublicIdentity`, which has no hash field at all.
 */

use std::collections::BTreeSet;
use std::fmt;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::shared::{Permission, Role, SharedError};

/// Identity record as held by the credential store
#[derive(Clone, PartialEq, Eq)]
pub struct Identity {
    /// Store-assigned id (>= 1)
    pub id: i64,
    /// Unique, normalized email address
    pub email: String,
    /// Full name or alias
    pub display_name: String,
    /// bcrypt hash of the password
    pub secret_hash: String,
    pub roles: BTreeSet<Role>,
    pub permissions: BTreeSet<Permission>,
    /// Organisational area the identity belongs to
    pub area: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("id", &self.id)
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("secret_hash", &"<redacted>")
            .field("roles", &self.roles)
            .field("permissions", &self.permissions)
            .field("area", &self.area)
            .finish()
    }
}

/// Identity without its secret hash, safe to hand to callers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicIdentity {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub roles: BTreeSet<Role>,
    pub permissions: BTreeSet<Permission>,
    pub area: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Identity> for PublicIdentity {
    fn from(identity: Identity) -> Self {
        Self {
            id: identity.id,
            email: identity.email,
            display_name: identity.display_name,
            roles: identity.roles,
            permissions: identity.permissions,
            area: identity.area,
            created_at: identity.created_at,
            updated_at: identity.updated_at,
        }
    }
}

/// Fields needed to create an identity
#[derive(Clone)]
pub struct NewIdentity {
    pub email: String,
    pub display_name: String,
    pub secret_hash: String,
    pub roles: BTreeSet<Role>,
    pub permissions: BTreeSet<Permission>,
    pub area: String,
}

impl fmt::Debug for NewIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewIdentity")
            .field("email", &self.email)
            .field("display_name", &self.display_name)
            .field("roles", &self.roles)
            .field("permissions", &self.permissions)
            .field("area", &self.area)
            .finish_non_exhaustive()
    }
}

/// Credential store failures
///
/// These are infrastructure or integrity failures. They must never be
/// reported to a login caller as "invalid credentials".
#[derive(Debug, Error)]
pub enum StoreError {
    /// The underlying database failed
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// An identity with this email already exists
    #[error("email already registered: {0}")]
    DuplicateEmail(String),

    /// No identity with this id
    #[error("identity {0} not found")]
    NotFound(i64),

    /// A stored row holds a role or permission outside the closed sets
    #[error("identity {id} has corrupt authorization data: {source}")]
    Corrupt {
        id: i64,
        #[source]
        source: SharedError,
    },
}

/// Credential store contract consumed by the auth core
///
/// `find_*` return `Ok(None)` for a missing identity; `Err` is reserved for
/// store failures.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up an identity by (normalized) email
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError>;

    /// Look up an identity by id
    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, StoreError>;

    /// Create an identity; fails with `DuplicateEmail` when the email is taken
    async fn create(&self, new_identity: NewIdentity) -> Result<Identity, StoreError>;

    /// Replace the role set of an identity
    async fn update_roles(&self, id: i64, roles: &BTreeSet<Role>) -> Result<Identity, StoreError>;

    /// Replace the permission set of an identity
    async fn update_permissions(
        &self,
        id: i64,
        permissions: &BTreeSet<Permission>,
    ) -> Result<Identity, StoreError>;

    /// All identities ordered by id
    async fn list(&self) -> Result<Vec<Identity>, StoreError>;
}

/// Canonical form of an email used for storage and lookup
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
