//! opsdesk - Authentication & Authorization Core
//!
//! The auth core of a role-based operations dashboard (fleet, maintenance,
//! tickets, services): credential verification, token issuance and
//! validation, and access control combining roles, permissions and a
//! public-route override.
//!
//! # Module Structure
//!
//! - **`shared`** - types with no server dependencies
//!   - `Role` / `Permission` closed sets
//!   - `AppConfig` configuration loading
//!   - `SharedError` validation errors
//!
//! - **`backend`** - server-side code (only compiled with `ssr` feature)
//!   - credential store adapters (PostgreSQL, in-memory)
//!   - bcrypt password verification and credential validation
//!   - JWT token codec
//!   - access decision engine and its axum guard
//!   - HTTP handlers for login, registration and user administration
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - enables the `backend` module and the
//!   `opsdesk-server` binary
//!
//! # Usage
//!
//! ```rust,no_run
//! use opsdesk::backend::server::create_app;
//! use opsdesk::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(&config).await?;
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Error Handling
//!
//! - `Result<T, E>` with `thiserror` enums throughout
//! - `shared::SharedError` and `shared::ConfigError` for input and configuration
//! - `backend::error::BackendError` at the HTTP boundary

/// Shared types and configuration
pub mod shared;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
