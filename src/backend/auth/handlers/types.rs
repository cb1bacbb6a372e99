/**
 * Authentication Handler Types
 *
 * Request and response bodies of the auth and user-administration
 * endpoints. Identities are returned as `PublicIdentity` and principals as
 * `AuthenticatedPrincipal`, so neither type is repeated here.
 */

use serde::{Deserialize, Serialize};

/// Login request
#[derive(Deserialize, Serialize, Debug)]
pub struct LoginRequest {
    pub email: String,
    /// Plain password, verified against the stored hash and then dropped
    pub password: String,
}

/// Login response carrying the signed bearer token
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct TokenResponse {
    pub access_token: String,
}

/// Registration request
#[derive(Deserialize, Serialize, Debug)]
pub struct RegisterRequest {
    /// Full name or alias
    pub display_name: String,
    pub email: String,
    /// At least 6 characters
    pub password: String,
    /// Organisational area; blank means `"default"`
    #[serde(default)]
    pub area: String,
}

/// Replacement role set, as wire names
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdateRolesRequest {
    pub roles: Vec<String>,
}

/// Replacement permission set, as wire names
#[derive(Deserialize, Serialize, Debug)]
pub struct UpdatePermissionsRequest {
    pub permissions: Vec<String>,
}

/// Plain confirmation message
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
