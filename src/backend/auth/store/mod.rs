//! Credential Store Adapters
//!
//! Implementations of [`CredentialStore`](crate::backend::auth::users::CredentialStore):
//!
//! - **`postgres`** - `PgCredentialStore`, the production adapter (sqlx)
//! - **`memory`** - `MemoryCredentialStore`, used without a database and in tests

/// PostgreSQL store
pub mod postgres;

/// In-process store
pub mod memory;

pub use memory::MemoryCredentialStore;
pub use postgres::PgCredentialStore;
