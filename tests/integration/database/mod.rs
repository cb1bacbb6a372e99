//! PostgreSQL integration tests

mod store_test;
