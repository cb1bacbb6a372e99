/**
 * API Routes
 *
 * Every route declares its access requirements as a `static RouteAccess`
 * right here, and gets its own access guard through `route_layer`.
 *
 * # Routes
 *
 * | Method | Path                      | Access                               |
 * |--------|---------------------------|--------------------------------------|
 * | GET    | `/health`                 | public                               |
 * | POST   | `/auth/login`             | public                               |
 * | POST   | `/auth/logout`            | public                               |
 * | POST   | `/auth/register`          | public                               |
 * | GET    | `/auth/me`                | authenticated                        |
 * | GET    | `/auth/profile`           | {Admin, Driver} + {VIEW_ROUTES}      |
 * | GET    | `/users`                  | {Admin} + {MANAGE_USERS}             |
 * | PUT    | `/users/{id}/roles`       | {Admin} + {MANAGE_USERS}             |
 * | PUT    | `/users/{id}/permissions` | {Admin} + {MANAGE_USERS}             |
 */

use axum::{
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post, put, MethodRouter},
    Router,
};
use serde_json::{json, Value};

use crate::backend::auth::access::RouteAccess;
use crate::backend::auth::handlers::{
    get_me, get_profile, list_users, login, logout, register, update_permissions, update_roles,
};
use crate::backend::middleware::{access_guard, RouteGuard};
use crate::backend::server::state::AppState;
use crate::shared::{Permission, Role};

pub static HEALTH: RouteAccess = RouteAccess::public();
pub static LOGIN: RouteAccess = RouteAccess::public();
pub static LOGOUT: RouteAccess = RouteAccess::public();
pub static REGISTER: RouteAccess = RouteAccess::public();

pub static ME: RouteAccess = RouteAccess::authenticated();

pub static PROFILE: RouteAccess = RouteAccess::authenticated()
    .with_roles(&[Role::Admin, Role::Driver])
    .with_permissions(&[Permission::ViewRoutes]);

/// Shared by all user-administration routes
pub static USER_ADMIN: RouteAccess = RouteAccess::authenticated()
    .with_roles(&[Role::Admin])
    .with_permissions(&[Permission::ManageUsers]);

/// Attach the access guard for `access` to a method router
pub fn guarded(
    route: MethodRouter<AppState>,
    app_state: &AppState,
    access: &'static RouteAccess,
) -> MethodRouter<AppState> {
    route.route_layer(from_fn_with_state(
        RouteGuard::new(app_state.codec.clone(), access),
        access_guard,
    ))
}

/// Liveness probe
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Configure API routes
pub fn configure_api_routes(router: Router<AppState>, app_state: &AppState) -> Router<AppState> {
    router
        .route("/health", guarded(get(health), app_state, &HEALTH))
        // Authentication endpoints
        .route("/auth/login", guarded(post(login), app_state, &LOGIN))
        .route("/auth/logout", guarded(post(logout), app_state, &LOGOUT))
        .route("/auth/register", guarded(post(register), app_state, &REGISTER))
        .route("/auth/me", guarded(get(get_me), app_state, &ME))
        .route("/auth/profile", guarded(get(get_profile), app_state, &PROFILE))
        // User administration endpoints
        .route("/users", guarded(get(list_users), app_state, &USER_ADMIN))
        .route(
            "/users/{id}/roles",
            guarded(put(update_roles), app_state, &USER_ADMIN),
        )
        .route(
            "/users/{id}/permissions",
            guarded(put(update_permissions), app_state, &USER_ADMIN),
        )
}
