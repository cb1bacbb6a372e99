/**
 * Server Configuration
 *
 * Picks the credential store adapter from the loaded `AppConfig`.
 *
 * - `DATABASE_URL` set: PostgreSQL pool, migrations applied on connect
 * - otherwise: the in-memory store (identities are lost on restart)
 *
 * A configured database that cannot be reached is a startup error; there
 * is no fallback to the memory store.
 */

use std::sync::Arc;

use crate::backend::auth::store::{MemoryCredentialStore, PgCredentialStore};
use crate::backend::auth::users::{CredentialStore, StoreError};
use crate::shared::AppConfig;

/// Open the credential store described by `config`
pub async fn load_store(config: &AppConfig) -> Result<Arc<dyn CredentialStore>, StoreError> {
    match &config.database_url {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let store = PgCredentialStore::connect(url).await.map_err(|e| {
                tracing::error!("Failed to open credential store: {}", e);
                e
            })?;
            tracing::info!("Database connection pool created successfully");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Using the in-memory credential store.");
            Ok(Arc::new(MemoryCredentialStore::new()))
        }
    }
}
