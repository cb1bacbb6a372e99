/**
 * Logout Handler
 *
 * POST /auth/logout
 *
 * Tokens are stateless and nothing is stored server-side, so logging out
 * only confirms; the client discards its token.
 */

use axum::response::Json;

use crate::backend::auth::handlers::types::MessageResponse;

pub async fn logout() -> Json<MessageResponse> {
    Json(MessageResponse::new("Logged out successfully"))
}
