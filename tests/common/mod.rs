//! Common test utilities and helpers
//!
//! This module provides shared utilities for all tests including:
//! - Application fixtures over the in-memory credential store
//! - PostgreSQL store fixtures (opt-in via `TEST_DATABASE_URL`)
//! - Request helpers driving the router with `oneshot`
//! - Custom assertion macros

pub mod assertions;
pub mod auth_helpers;
pub mod database;

pub use auth_helpers::*;
