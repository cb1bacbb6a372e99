/**
 * Access Decision Engine
 *
 * Decides whether a request may reach a route, given the route's declared
 * `RouteAccess` and the request's `Authorization` header.
 *
 * # Pipeline
 *
 * ```text
 * public route?  -> admit, nothing else runs
 * bearer token   -> decode, failure is 401
 * role check     -> principal.roles ∩ route.roles ≠ ∅, failure is 403
 * permission     -> Any (∩ ≠ ∅) or All (⊆), failure is 403
 * ```
 *
 * An empty role or permission list places no restriction on that axis.
 * Every step is a plain function so the pipeline can be tested without
 * an HTTP stack; the axum middleware only hosts it.
 */

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

use crate::backend::auth::sessions::{Claims, TokenCodec, TokenError, TokenRejection};
use crate::shared::{Permission, Role};

/// How a route's permission list is matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionMatch {
    /// At least one listed permission
    Any,
    /// Every listed permission
    All,
}

/// Access requirements declared next to a route
///
/// There is deliberately no `Default`: a route is either explicitly
/// `public()` or starts from `authenticated()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteAccess {
    pub public: bool,
    pub roles: &'static [Role],
    pub permissions: &'static [Permission],
    pub permission_match: PermissionMatch,
}

impl RouteAccess {
    /// Open to everyone, no token needed
    pub const fn public() -> Self {
        Self {
            public: true,
            roles: &[],
            permissions: &[],
            permission_match: PermissionMatch::Any,
        }
    }

    /// Any holder of a valid token
    pub const fn authenticated() -> Self {
        Self {
            public: false,
            roles: &[],
            permissions: &[],
            permission_match: PermissionMatch::Any,
        }
    }

    pub const fn with_roles(self, roles: &'static [Role]) -> Self {
        Self { roles, ..self }
    }

    pub const fn with_permissions(self, permissions: &'static [Permission]) -> Self {
        Self { permissions, ..self }
    }

    /// Require every listed permission instead of any one of them
    pub const fn require_all_permissions(self) -> Self {
        Self {
            permission_match: PermissionMatch::All,
            ..self
        }
    }
}

/// The validated identity behind a request, built from token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: i64,
    pub email: String,
    pub roles: BTreeSet<Role>,
    pub permissions: BTreeSet<Permission>,
    pub issued_at: i64,
    pub expires_at: i64,
}

impl From<Claims> for AuthenticatedPrincipal {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
            roles: claims.roles,
            permissions: claims.permissions,
            issued_at: claims.iat,
            expires_at: claims.exp,
        }
    }
}

/// Outcome of a successful evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Admission {
    /// Public route, no principal was resolved
    Public,
    Admitted(AuthenticatedPrincipal),
}

impl Admission {
    pub fn principal(&self) -> Option<&AuthenticatedPrincipal> {
        match self {
            Admission::Public => None,
            Admission::Admitted(principal) => Some(principal),
        }
    }
}

/// Why a request was turned away
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AccessDenied {
    /// No usable token (401)
    #[error(transparent)]
    Unauthenticated(#[from] TokenError),

    /// None of the route's roles (403)
    #[error("Forbidden: requires one of roles [{}]", join(.required))]
    Role { required: Vec<Role> },

    /// Permission predicate failed (403)
    #[error("Forbidden: requires {} of permissions [{}]", mode_word(.mode), join(.required))]
    Permission {
        required: Vec<Permission>,
        mode: PermissionMatch,
    },
}

impl AccessDenied {
    /// Whether this is an authentication (rather than authorization) failure
    pub fn is_unauthenticated(&self) -> bool {
        matches!(self, AccessDenied::Unauthenticated(_))
    }
}

fn join<'a, T: ToString + 'a>(items: impl IntoIterator<Item = &'a T>) -> String {
    items
        .into_iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn mode_word(mode: &PermissionMatch) -> &'static str {
    match mode {
        PermissionMatch::Any => "one",
        PermissionMatch::All => "all",
    }
}

/// Token from an `Authorization: Bearer <token>` header value
///
/// The scheme is matched case-insensitively. A missing header, another
/// scheme or an empty token are all `InvalidToken(Missing)`.
pub fn extract_bearer(authorization: Option<&str>) -> Result<&str, TokenError> {
    let missing = TokenError::InvalidToken(TokenRejection::Missing);
    let (scheme, token) = authorization
        .map(str::trim)
        .and_then(|value| value.split_once(' '))
        .ok_or(missing)?;

    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(missing);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(missing);
    }
    Ok(token)
}

/// Role predicate: empty requirement, or a non-empty intersection
pub fn check_roles(
    access: &RouteAccess,
    principal: &AuthenticatedPrincipal,
) -> Result<(), AccessDenied> {
    if access.roles.is_empty() || access.roles.iter().any(|r| principal.roles.contains(r)) {
        return Ok(());
    }
    Err(AccessDenied::Role {
        required: access.roles.to_vec(),
    })
}

/// Permission predicate according to the route's `PermissionMatch`
pub fn check_permissions(
    access: &RouteAccess,
    principal: &AuthenticatedPrincipal,
) -> Result<(), AccessDenied> {
    let held = |p: &Permission| principal.permissions.contains(p);
    let satisfied = access.permissions.is_empty()
        || match access.permission_match {
            PermissionMatch::Any => access.permissions.iter().any(held),
            PermissionMatch::All => access.permissions.iter().all(held),
        };

    if satisfied {
        return Ok(());
    }
    Err(AccessDenied::Permission {
        required: access.permissions.to_vec(),
        mode: access.permission_match,
    })
}

/// Run the whole pipeline for one request at time `now`
pub fn evaluate(
    access: &RouteAccess,
    authorization: Option<&str>,
    codec: &TokenCodec,
    now: i64,
) -> Result<Admission, AccessDenied> {
    if access.public {
        return Ok(Admission::Public);
    }

    let token = extract_bearer(authorization)?;
    let principal = AuthenticatedPrincipal::from(codec.decode_at(token, now)?);

    check_roles(access, &principal)?;
    check_permissions(access, &principal)?;

    Ok(Admission::Admitted(principal))
}
