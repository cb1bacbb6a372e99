//! Backend Module
//!
//! Server-side code: the authentication and authorization core and the
//! axum HTTP server that hosts it. Only compiled with the `ssr` feature.
//!
//! # Architecture
//!
//! - **`auth`** - credential validation, token codec, access decisions, handlers
//! - **`middleware`** - the per-route access guard and `Principal` extractor
//! - **`routes`** - route table with each route's `RouteAccess`
//! - **`server`** - application state, store selection, app creation
//! - **`error`** - `BackendError` and its HTTP response conversion
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── main.rs         - Server binary entry point
//! ├── auth/           - Authentication and authorization core
//! ├── middleware/     - Request middleware
//! ├── routes/         - Route configuration
//! ├── server/         - Server initialization and state
//! └── error/          - Error types
//! ```
//!
//! # Request Lifecycle
//!
//! ```text
//! request → TraceLayer → access_guard (public? / decode / roles / permissions)
//!         → handler (Principal extractor) → JSON response or BackendError
//! ```
//!
//! # Thread Safety
//!
//! Requests share no mutable state besides the credential store: the token
//! codec and hasher are immutable, `PgPool` is internally synchronized and
//! the memory store sits behind a `tokio::sync::RwLock`.

/// Server setup and state
pub mod server;

/// Route configuration
pub mod routes;

/// Backend error types
pub mod error;

/// Authentication and authorization
pub mod auth;

/// Middleware for request processing
pub mod middleware;

pub use error::BackendError;
pub use server::create_app;
