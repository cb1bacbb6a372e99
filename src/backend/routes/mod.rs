//! Route Configuration Module
//!
//! This module configures all HTTP routes for the backend server.
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── api_routes.rs   - Auth and user-administration routes with their access rules
//! ```
//!
//! # Route Types
//!
//! ## Public
//!
//! - `GET /health`
//! - `POST /auth/login`, `POST /auth/logout`, `POST /auth/register`
//!
//! ## Guarded
//!
//! - `GET /auth/me` - any authenticated identity
//! - `GET /auth/profile` - `Admin` or `Driver`, with `VIEW_ROUTES`
//! - `GET /users`, `PUT /users/{id}/roles`, `PUT /users/{id}/permissions` -
//!   `Admin` with `MANAGE_USERS`
//!
//! Anything else falls through to a JSON 404.

/// Main router creation
pub mod router;

/// API route table
pub mod api_routes;

pub use router::create_router;
