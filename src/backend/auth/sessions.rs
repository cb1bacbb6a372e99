/**
 * Session Tokens
 *
 * This module issues and decodes the signed bearer tokens (HS256 JWTs)
 * that carry an identity's authorization claims.
 *
 * # Decoding Pipeline
 *
 * `decode` runs three explicit steps so each can be tested on its own:
 *
 * 1. `verify_signature` - signature only, yields the raw JSON payload
 * 2. `claims_from_payload` - structural checks (object, `sub`, `email`,
 *    optional roles/permissions, `iat`/`exp`)
 * 3. `ensure_not_expired` - `now < exp`
 *
 * The signing library is not asked to validate any claim itself.
 */

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::backend::auth::users::PublicIdentity;
use crate::shared::{AppConfig, Permission, Role};

const ALGORITHM: Algorithm = Algorithm::HS256;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Identity id
    pub sub: i64,
    /// Identity email
    pub email: String,
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    #[serde(default)]
    pub permissions: BTreeSet<Permission>,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    /// Claims for `identity`, issued at `now` and valid for `ttl_secs`
    ///
    /// `None` when the expiry does not fit in a timestamp.
    pub fn for_identity(identity: &PublicIdentity, now: i64, ttl_secs: i64) -> Option<Self> {
        Some(Self {
            sub: identity.id,
            email: identity.email.clone(),
            roles: identity.roles.clone(),
            permissions: identity.permissions.clone(),
            iat: now,
            exp: now.checked_add(ttl_secs)?,
        })
    }

    /// Whether the claims are past their expiry at `now`
    pub fn is_expired_at(&self, now: i64) -> bool {
        now >= self.exp
    }
}

/// Why a token was rejected as invalid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenRejection {
    /// No bearer token was presented
    Missing,
    /// Not a well-formed JWT
    Malformed,
    /// Signature or algorithm check failed
    BadSignature,
    /// Signature is valid but the token is past `exp`
    Expired,
    /// Payload is not a claims object
    BadPayload,
}

impl fmt::Display for TokenRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            TokenRejection::Missing => "missing bearer token",
            TokenRejection::Malformed => "malformed token",
            TokenRejection::BadSignature => "bad signature",
            TokenRejection::Expired => "token has expired",
            TokenRejection::BadPayload => "unexpected payload",
        };
        f.write_str(reason)
    }
}

/// Token decoding failures
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Invalid token: {0}")]
    InvalidToken(TokenRejection),

    #[error("Invalid token: missing subject")]
    MissingSubject,

    #[error("Invalid token: missing email")]
    MissingEmail,
}

/// Token issuance failures
#[derive(Debug, Error)]
pub enum IssueError {
    #[error("token lifetime overflows the expiry timestamp")]
    ExpiryOverflow,

    #[error("token signing failed: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),
}

impl TokenError {
    fn invalid(reason: TokenRejection) -> Self {
        Self::InvalidToken(reason)
    }
}

/// Issues and decodes access tokens with the process-wide signing key
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_secs: i64,
}

impl TokenCodec {
    /// Create a codec for an HMAC `secret` and a token lifetime
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        // Claims are checked by `claims_from_payload` / `ensure_not_expired`.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_nbf = false;
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            ttl_secs,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(&config.jwt_secret, config.token_ttl_secs)
    }

    /// Issue a token for `identity`, valid from now
    pub fn issue(&self, identity: &PublicIdentity) -> Result<String, IssueError> {
        self.issue_at(identity, Utc::now().timestamp())
    }

    /// Issue a token for `identity` as if the current time were `now`
    pub fn issue_at(
        &self,
        identity: &PublicIdentity,
        now: i64,
    ) -> Result<String, IssueError> {
        let claims = Claims::for_identity(identity, now, self.ttl_secs)
            .ok_or(IssueError::ExpiryOverflow)?;
        Ok(self.sign(&claims)?)
    }

    /// Sign an arbitrary payload with the codec's key
    pub fn sign<T: Serialize>(&self, payload: &T) -> Result<String, jsonwebtoken::errors::Error> {
        encode(&Header::new(ALGORITHM), payload, &self.encoding_key)
    }

    /// Verify and decode a token
    pub fn decode(&self, token: &str) -> Result<Claims, TokenError> {
        self.decode_at(token, Utc::now().timestamp())
    }

    /// Verify and decode a token as if the current time were `now`
    pub fn decode_at(&self, token: &str, now: i64) -> Result<Claims, TokenError> {
        let payload = self.verify_signature(token)?;
        let claims = claims_from_payload(payload)?;
        ensure_not_expired(&claims, now)?;
        Ok(claims)
    }

    /// Check the signature and return the raw payload
    pub fn verify_signature(&self, token: &str) -> Result<Value, TokenError> {
        if token.is_empty() {
            return Err(TokenError::invalid(TokenRejection::Missing));
        }
        decode::<Value>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                let reason = match e.kind() {
                    ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                        TokenRejection::BadSignature
                    }
                    ErrorKind::Json(_) => TokenRejection::BadPayload,
                    _ => TokenRejection::Malformed,
                };
                tracing::debug!("Token rejected ({}): {}", reason, e);
                TokenError::invalid(reason)
            })
    }
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &ALGORITHM)
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}

/// Turn a verified payload into claims
///
/// Check order: payload shape, then `sub`, then `email`, then the rest.
pub fn claims_from_payload(payload: Value) -> Result<Claims, TokenError> {
    let Value::Object(fields) = payload else {
        return Err(TokenError::invalid(TokenRejection::BadPayload));
    };

    let sub = fields
        .get("sub")
        .and_then(subject_id)
        .ok_or(TokenError::MissingSubject)?;

    let email = fields
        .get("email")
        .and_then(Value::as_str)
        .filter(|email| !email.trim().is_empty())
        .ok_or(TokenError::MissingEmail)?
        .to_string();

    let roles = tag_set(fields.get("roles"))?;
    let permissions = tag_set(fields.get("permissions"))?;

    let timestamp = |name: &str| {
        fields
            .get(name)
            .and_then(Value::as_i64)
            .ok_or(TokenError::invalid(TokenRejection::BadPayload))
    };

    Ok(Claims {
        sub,
        email,
        roles,
        permissions,
        iat: timestamp("iat")?,
        exp: timestamp("exp")?,
    })
}

/// Reject claims whose expiry is not after `now`
pub fn ensure_not_expired(claims: &Claims, now: i64) -> Result<(), TokenError> {
    if claims.is_expired_at(now) {
        return Err(TokenError::invalid(TokenRejection::Expired));
    }
    Ok(())
}

/// Positive integer id, also accepted in its string form
fn subject_id(value: &Value) -> Option<i64> {
    let id = match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    id.filter(|id| *id >= 1)
}

/// Absent or null means no tags; anything but an array of known names is invalid
fn tag_set<T: FromStr + Ord>(value: Option<&Value>) -> Result<BTreeSet<T>, TokenError> {
    match value {
        None | Some(Value::Null) => Ok(BTreeSet::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .and_then(|name| name.parse().ok())
                    .ok_or(TokenError::invalid(TokenRejection::BadPayload))
            })
            .collect(),
        Some(_) => Err(TokenError::invalid(TokenRejection::BadPayload)),
    }
}
