//! Server Module
//!
//! Server initialization: application state, store selection and app
//! creation.
//!
//! # Module Structure
//!
//! ```text
//! server/
//! ├── mod.rs          - Module exports and documentation
//! ├── state.rs        - Shared application state
//! ├── config.rs       - Credential store selection
//! └── init.rs         - App creation and bootstrap administrator
//! ```
//!
//! # Initialization Flow
//!
//! 1. **Configuration**: `AppConfig::load()` (file + environment), done by the binary
//! 2. **Store**: PostgreSQL when `DATABASE_URL` is set, in-memory otherwise
//! 3. **State**: token codec, hasher and credential validator
//! 4. **Seeding**: bootstrap administrator, if configured
//! 5. **Router**: all routes with their access guards
//!
//! # Example
//!
//! ```rust,no_run
//! use opsdesk::backend::server::create_app;
//! use opsdesk::shared::AppConfig;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load()?;
//! let app = create_app(&config).await?;
//! # Ok(())
//! # }
//! ```

/// Application state management
pub mod state;

/// Credential store selection
pub mod config;

/// Server initialization
pub mod init;

pub use init::{create_app, seed_bootstrap_admin};
pub use state::AppState;
