/**
 * Password Hashing and Verification
 *
 * One-way, salted bcrypt hashes. The work factor comes from configuration
 * (default 10). bcrypt is CPU bound, so the async entry points move the
 * work onto tokio's blocking pool.
 */

use thiserror::Error;

/// Hashing failures. Verification never fails, it answers `false`.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("password hashing failed: {0}")]
    Hash(#[from] bcrypt::BcryptError),

    #[error("password hashing task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// bcrypt hasher with a fixed work factor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    /// Hash `secret` with a fresh salt
    pub fn hash(&self, secret: &str) -> Result<String, PasswordError> {
        Ok(bcrypt::hash(secret, self.cost)?)
    }

    /// Compare `secret` against a stored hash
    ///
    /// A stored hash bcrypt cannot parse counts as a mismatch.
    pub fn verify(secret: &str, secret_hash: &str) -> bool {
        match bcrypt::verify(secret, secret_hash) {
            Ok(valid) => valid,
            Err(e) => {
                tracing::warn!("Stored password hash could not be parsed: {}", e);
                false
            }
        }
    }

    /// [`hash`](Self::hash) on the blocking pool
    pub async fn hash_blocking(&self, secret: String) -> Result<String, PasswordError> {
        let hasher = *self;
        tokio::task::spawn_blocking(move || hasher.hash(&secret)).await?
    }

    /// [`verify`](Self::verify) on the blocking pool
    pub async fn verify_blocking(secret: String, secret_hash: String) -> bool {
        match tokio::task::spawn_blocking(move || Self::verify(&secret, &secret_hash)).await {
            Ok(valid) => valid,
            Err(e) => {
                tracing::error!("Password verification task failed: {:?}", e);
                false
            }
        }
    }
}
