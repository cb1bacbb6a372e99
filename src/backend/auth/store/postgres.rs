/**
 * PostgreSQL Credential Store
 *
 * The production store adapter. Roles and permissions live in `TEXT[]`
 * columns holding their wire names; rows are converted into `Identity`
 * on the way out and rejected as corrupt if they hold an unknown tag.
 */

use std::collections::BTreeSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::backend::auth::users::{CredentialStore, Identity, NewIdentity, StoreError};
use crate::shared::roles::{parse_tags, tag_names};
use crate::shared::{Permission, Role};

const USER_COLUMNS: &str =
    "id, email, display_name, password_hash, roles, permissions, area, created_at, updated_at";

/// Raw `users` row
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: i64,
    email: String,
    display_name: String,
    password_hash: String,
    roles: Vec<String>,
    permissions: Vec<String>,
    area: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for Identity {
    type Error = StoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let id = row.id;
        let corrupt = |source| StoreError::Corrupt { id, source };
        Ok(Identity {
            id: row.id,
            email: row.email,
            display_name: row.display_name,
            secret_hash: row.password_hash,
            roles: parse_tags(&row.roles).map_err(corrupt)?,
            permissions: parse_tags(&row.permissions).map_err(corrupt)?,
            area: row.area,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// Credential store backed by a PostgreSQL pool
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    /// Wrap an existing pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect and run the bundled migrations
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        tracing::info!("Connecting to database...");
        let pool = PgPool::connect(database_url).await?;
        tracing::info!("Running database migrations...");
        sqlx::migrate!()
            .run(&pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        tracing::info!("Database migrations completed successfully");
        Ok(Self::new(pool))
    }

    async fn fetch_one_updated(
        &self,
        sql: &str,
        id: i64,
        values: Vec<String>,
    ) -> Result<Identity, StoreError> {
        let row = sqlx::query_as::<_, UserRow>(sql)
            .bind(values)
            .bind(Utc::now())
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound(id))?;
        row.try_into()
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Identity>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE email = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?
            .map(Identity::try_from)
            .transpose()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Identity>, StoreError> {
        let sql = format!("SELECT {} FROM users WHERE id = $1", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Identity::try_from)
            .transpose()
    }

    async fn create(&self, new_identity: NewIdentity) -> Result<Identity, StoreError> {
        let now = Utc::now();
        let sql = format!(
            r#"
            INSERT INTO users (email, display_name, password_hash, roles, permissions, area, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING {}
            "#,
            USER_COLUMNS
        );
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(&new_identity.email)
            .bind(&new_identity.display_name)
            .bind(&new_identity.secret_hash)
            .bind(tag_names(&new_identity.roles))
            .bind(tag_names(&new_identity.permissions))
            .bind(&new_identity.area)
            .bind(now)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                    StoreError::DuplicateEmail(new_identity.email.clone())
                }
                other => StoreError::Database(other),
            })?;
        row.try_into()
    }

    async fn update_roles(&self, id: i64, roles: &BTreeSet<Role>) -> Result<Identity, StoreError> {
        let sql = format!(
            "UPDATE users SET roles = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
            USER_COLUMNS
        );
        self.fetch_one_updated(&sql, id, tag_names(roles)).await
    }

    async fn update_permissions(
        &self,
        id: i64,
        permissions: &BTreeSet<Permission>,
    ) -> Result<Identity, StoreError> {
        let sql = format!(
            "UPDATE users SET permissions = $1, updated_at = $2 WHERE id = $3 RETURNING {}",
            USER_COLUMNS
        );
        self.fetch_one_updated(&sql, id, tag_names(permissions)).await
    }

    async fn list(&self) -> Result<Vec<Identity>, StoreError> {
        let sql = format!("SELECT {} FROM users ORDER BY id", USER_COLUMNS);
        sqlx::query_as::<_, UserRow>(&sql)
            .fetch_all(&self.pool)
            .await?
            .into_iter()
            .map(Identity::try_from)
            .collect()
    }
}
