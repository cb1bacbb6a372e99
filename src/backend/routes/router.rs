/**
 * Router Configuration
 *
 * Combines the API routes into the application router.
 *
 * # Layers
 *
 * - per-route access guards (added in `api_routes`)
 * - `TraceLayer` logging every request
 * - a JSON 404 fallback for unknown paths
 */

use axum::{http::StatusCode, Router};
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = configure_api_routes(Router::new(), &app_state);

    router
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> BackendError {
    BackendError::handler(StatusCode::NOT_FOUND, "Not found")
}
