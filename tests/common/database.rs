//! Database test fixtures
//!
//! PostgreSQL tests run only when `TEST_DATABASE_URL` points at a scratch
//! database; otherwise the fixture returns `None` and the test is skipped.
//! Every fixture truncates the `users` table, so callers must be `#[serial]`.

use sqlx::PgPool;

use opsdesk::backend::auth::PgCredentialStore;

/// Environment variable naming the scratch database
pub const TEST_DATABASE_VAR: &str = "TEST_DATABASE_URL";

/// Migrated, empty store, or `None` when no scratch database is configured
pub async fn test_store() -> Option<PgCredentialStore> {
    let Ok(database_url) = std::env::var(TEST_DATABASE_VAR) else {
        eprintln!("{} not set, skipping PostgreSQL test", TEST_DATABASE_VAR);
        return None;
    };

    let store = PgCredentialStore::connect(&database_url)
        .await
        .expect("Failed to connect and migrate test database");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to create test database pool");
    cleanup_test_data(&pool)
        .await
        .expect("Failed to clean up test data");
    Some(store)
}

/// Remove all identities and restart id assignment at 1
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("TRUNCATE TABLE users RESTART IDENTITY")
        .execute(pool)
        .await?;
    Ok(())
}
