//! Authentication Handlers Module
//!
//! HTTP handlers for the auth and user-administration endpoints.
//!
//! # Module Structure
//!
//! ```text
//! handlers/
//! ├── mod.rs      - Module exports and documentation
//! ├── types.rs    - Request and response types
//! ├── login.rs    - POST /auth/login
//! ├── logout.rs   - POST /auth/logout
//! ├── register.rs - POST /auth/register
//! ├── me.rs       - GET /auth/me, GET /auth/profile
//! └── users.rs    - GET /users, PUT /users/{id}/roles, PUT /users/{id}/permissions
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: display name, email and password → identity created with
//!    `{User}` / `{VIEW_DASHBOARD}`
//! 2. **Login**: email and password → credentials verified → `{access_token}`
//! 3. **Guarded routes**: bearer token → access guard → handler receives the
//!    `Principal`
//!
//! Handlers never check tokens themselves; the per-route guard in
//! `backend::middleware` has already admitted the request.

/// Request and response types
pub mod types;

/// Login handler
pub mod login;

/// Logout handler
pub mod logout;

/// Registration handler
pub mod register;

/// Current identity and profile handlers
pub mod me;

/// User administration handlers
pub mod users;

pub use types::{
    LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UpdatePermissionsRequest,
    UpdateRolesRequest,
};

pub use login::login;
pub use logout::logout;
pub use me::{get_me, get_profile};
pub use register::register;
pub use users::{list_users, update_permissions, update_roles};
