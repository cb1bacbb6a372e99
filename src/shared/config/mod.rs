//! Application configuration module
//!
//! Configuration is read once at startup. Sources, lowest precedence first:
//!
//! 1. built-in defaults
//! 2. an optional TOML file named by `OPSDESK_CONFIG`
//! 3. environment variables (`JWT_SECRET`, `TOKEN_TTL_SECS`, `BCRYPT_COST`,
//!    `SERVER_PORT`, `DATABASE_URL`, `BOOTSTRAP_ADMIN_EMAIL`,
//!    `BOOTSTRAP_ADMIN_PASSWORD`)
//!
//! The signing secret is process-wide; changing it invalidates every token
//! issued under the previous one.

use std::fmt;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Default access token lifetime (one hour)
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Longest accepted access token lifetime (one year)
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Default HTTP port
pub const DEFAULT_SERVER_PORT: u16 = 3000;

/// Environment variable naming the optional TOML config file
pub const CONFIG_PATH_VAR: &str = "OPSDESK_CONFIG";

/// Lowest bcrypt work factor accepted by `validate`
pub const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;
const RECOMMENDED_SECRET_LEN: usize = 32;

/// Credentials of the administrator created on first start
#[derive(Clone, Deserialize, PartialEq, Eq)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for BootstrapAdmin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BootstrapAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Application configuration
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// HMAC secret used to sign access tokens
    pub jwt_secret: String,
    /// Access token lifetime in seconds
    pub token_ttl_secs: i64,
    /// bcrypt work factor for new password hashes
    pub bcrypt_cost: u32,
    /// HTTP listen port
    pub server_port: u16,
    /// PostgreSQL URL; the in-memory store is used when absent
    pub database_url: Option<String>,
    /// Administrator seeded at startup when missing
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            bcrypt_cost: DEFAULT_BCRYPT_COST,
            server_port: DEFAULT_SERVER_PORT,
            database_url: None,
            bootstrap_admin: None,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("jwt_secret", &"<redacted>")
            .field("token_ttl_secs", &self.token_ttl_secs)
            .field("bcrypt_cost", &self.bcrypt_cost)
            .field("server_port", &self.server_port)
            .field("database_url", &self.database_url.as_ref().map(|_| "<set>"))
            .field("bootstrap_admin", &self.bootstrap_admin)
            .finish()
    }
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the optional TOML file and the process environment
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(path)?,
            Err(_) => Self::default(),
        };
        let config = base.with_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Read a TOML configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse a TOML configuration document
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply environment-style overrides from `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(secret) = lookup("JWT_SECRET") {
            self.jwt_secret = secret;
        }
        if let Some(ttl) = lookup("TOKEN_TTL_SECS") {
            self.token_ttl_secs = parse_value("TOKEN_TTL_SECS", &ttl)?;
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            self.bcrypt_cost = parse_value("BCRYPT_COST", &cost)?;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server_port = parse_value("SERVER_PORT", &port)?;
        }
        if let Some(url) = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()) {
            self.database_url = Some(url);
        }
        match (lookup("BOOTSTRAP_ADMIN_EMAIL"), lookup("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => {
                self.bootstrap_admin = Some(BootstrapAdmin { email, password });
            }
            (None, None) => {}
            (Some(_), None) => return Err(ConfigError::MissingValue("BOOTSTRAP_ADMIN_PASSWORD")),
            (None, Some(_)) => return Err(ConfigError::MissingValue("BOOTSTRAP_ADMIN_EMAIL")),
        }
        Ok(self)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jwt_secret.is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.jwt_secret.len() < RECOMMENDED_SECRET_LEN {
            tracing::warn!(
                "JWT secret is shorter than recommended ({} bytes)",
                RECOMMENDED_SECRET_LEN
            );
        }
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&self.token_ttl_secs) {
            return Err(ConfigError::InvalidValue {
                key: "TOKEN_TTL_SECS",
                message: format!("must be between 1 and {} seconds", MAX_TOKEN_TTL_SECS),
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                message: format!("must be between {} and {}", MIN_BCRYPT_COST, MAX_BCRYPT_COST),
            });
        }
        if let Some(admin) = &self.bootstrap_admin {
            if !admin.email.contains('@') {
                return Err(ConfigError::InvalidValue {
                    key: "BOOTSTRAP_ADMIN_EMAIL",
                    message: "must be an email address".to_string(),
                });
            }
        }
        Ok(())
    }
}

fn parse_value<T: std::str::FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        message: format!("cannot parse '{}'", raw),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.config.jwt_secret = secret.into();
        self
    }

    /// Set the access token lifetime
    pub fn token_ttl_secs(mut self, secs: i64) -> Self {
        self.config.token_ttl_secs = secs;
        self
    }

    /// Set the bcrypt work factor
    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.config.bcrypt_cost = cost;
        self
    }

    /// Set the HTTP port
    pub fn server_port(mut self, port: u16) -> Self {
        self.config.server_port = port;
        self
    }

    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.config.database_url = Some(url.into());
        self
    }

    /// Seed an administrator on startup
    pub fn bootstrap_admin(mut self, email: impl Into<String>, password: impl Into<String>) -> Self {
        self.config.bootstrap_admin = Some(BootstrapAdmin {
            email: email.into(),
            password: password.into(),
        });
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
    #[error("cannot read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(String),
}
