//! Shared Module
//!
//! Types that carry no server dependencies: the role and permission
//! vocabulary, shared error types and application configuration. They are
//! available with or without the `ssr` feature.

/// Roles and permissions
pub mod roles;

/// Shared error types
pub mod error;

/// Application configuration
pub mod config;

/// Re-export commonly used types for convenience
pub use roles::{Permission, Role};
pub use error::SharedError;
pub use config::{AppConfig, AppConfigBuilder, BootstrapAdmin, ConfigError};
