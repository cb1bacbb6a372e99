//! Property-based tests
//!
//! - `token_proptest` covers token issue/decode
//! - `guard_proptest` checks the access pipeline against a reference predicate

mod guard_proptest;
mod token_proptest;
