/**
 * Access Guard Middleware
 *
 * Hosts the access decision pipeline inside axum. Each protected route gets
 * its own guard through `route_layer`, carrying that route's static
 * `RouteAccess`:
 *
 * ```rust,ignore
 * .route("/auth/profile", guarded(get(get_profile), &app_state, &PROFILE))
 * ```
 *
 * On admission the principal is attached to the request extensions, where
 * the `Principal` extractor picks it up. Rejections are answered directly
 * as a `BackendError` (401 or 403).
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use crate::backend::auth::access::{evaluate, Admission, AuthenticatedPrincipal, RouteAccess};
use crate::backend::auth::sessions::{TokenCodec, TokenError, TokenRejection};
use crate::backend::error::BackendError;

/// Per-route guard state: the shared codec plus the route's requirements
#[derive(Clone)]
pub struct RouteGuard {
    pub codec: Arc<TokenCodec>,
    pub access: &'static RouteAccess,
}

impl RouteGuard {
    pub fn new(codec: Arc<TokenCodec>, access: &'static RouteAccess) -> Self {
        Self { codec, access }
    }
}

/// Access guard middleware
///
/// 1. Reads the `Authorization` header (if any)
/// 2. Runs the access pipeline for the route's `RouteAccess`
/// 3. Attaches the principal to request extensions for use in handlers
pub async fn access_guard(
    State(guard): State<RouteGuard>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let authorization = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());

    let admission = evaluate(
        guard.access,
        authorization,
        &guard.codec,
        Utc::now().timestamp(),
    )
    .map_err(|denied| {
        tracing::warn!(
            "Access denied for {} {}: {}",
            request.method(),
            request.uri().path(),
            denied
        );
        denied
    })?;

    if let Admission::Admitted(principal) = admission {
        tracing::debug!("Admitted identity {} to {}", principal.user_id, request.uri().path());
        request.extensions_mut().insert(principal);
    }

    Ok(next.run(request).await)
}

/// Axum extractor for the principal admitted by `access_guard`
///
/// Using it on a route without a guard yields 401, never a panic.
#[derive(Clone, Debug)]
pub struct Principal(pub AuthenticatedPrincipal);

impl<S> FromRequestParts<S> for Principal
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedPrincipal>()
            .cloned()
            .map(Principal)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedPrincipal not found in request extensions");
                TokenError::InvalidToken(TokenRejection::Missing).into()
            })
    }
}
