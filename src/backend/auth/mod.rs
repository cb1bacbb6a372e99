//! Authentication Module
//!
//! The authentication and authorization core: credential verification,
//! token issuance and decoding, and the access decision pipeline, plus the
//! HTTP handlers built on top of it.
//!
//! # Architecture
//!
//! Leaf to root:
//!
//! - **`users`** - identity model and the `CredentialStore` contract
//! - **`store`** - PostgreSQL and in-memory store adapters
//! - **`password`** - bcrypt hashing and verification
//! - **`credentials`** - `(email, password)` → identity or rejection
//! - **`sessions`** - token codec (issue / decode)
//! - **`access`** - public / role / permission decision pipeline
//! - **`handlers`** - HTTP handlers for the auth endpoints
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs          - Module exports and documentation
//! ├── users.rs        - Identity model and store contract
//! ├── store/          - Store adapters
//! ├── password.rs     - Password hashing
//! ├── credentials.rs  - Credential validation
//! ├── sessions.rs     - Token codec
//! ├── access.rs       - Access decision engine
//! └── handlers/       - HTTP handlers
//! ```
//!
//! # Request Flow
//!
//! ```text
//! login:   credentials → CredentialValidator → TokenCodec::issue → {access_token}
//! request: [public?] → TokenCodec::decode → role check → permission check → handler
//! ```
//!
//! # Security
//!
//! - Passwords are hashed using bcrypt before storage
//! - Tokens are stateless HS256 JWTs; logout is client-side
//! - Invalid credentials return 401 (no information leakage)
//! - The password hash never leaves the store/validator boundary

/// Identity model and store contract
pub mod users;

/// Credential store adapters
pub mod store;

/// Password hashing and verification
pub mod password;

/// Credential validation
pub mod credentials;

/// Token generation and validation
pub mod sessions;

/// Access decision engine
pub mod access;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use access::{
    evaluate, AccessDenied, Admission, AuthenticatedPrincipal, PermissionMatch, RouteAccess,
};
pub use credentials::CredentialValidator;
pub use password::{PasswordError, PasswordHasher};
pub use sessions::{Claims, IssueError, TokenCodec, TokenError, TokenRejection};
pub use store::{MemoryCredentialStore, PgCredentialStore};
pub use users::{CredentialStore, Identity, NewIdentity, PublicIdentity, StoreError};
