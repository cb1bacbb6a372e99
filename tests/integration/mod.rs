//! Integration tests
//!
//! - `api` drives the full router (memory store) through `oneshot`
//! - `database` exercises the PostgreSQL store against `TEST_DATABASE_URL`
//! - `config_test` covers configuration loading from files and the environment

pub mod database;
