//! Middleware Module
//!
//! HTTP middleware for the backend server.
//!
//! - **`auth`** - the per-route access guard and the `Principal` extractor
//!
//! # Example
//!
//! ```rust,ignore
//! use axum::middleware::from_fn_with_state;
//! use opsdesk::backend::middleware::{access_guard, RouteGuard};
//!
//! let route = get(handler)
//!     .route_layer(from_fn_with_state(RouteGuard::new(codec, &ACCESS), access_guard));
//! ```

pub mod auth;

pub use auth::{access_guard, Principal, RouteGuard};
