//! Route definitions for the `/auth` resource.

use axum::routing::{delete, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST   /login           -> login
/// POST   /refresh_tokens  -> refresh
/// DELETE /logout          -> logout (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/refresh_tokens", post(auth::refresh))
        .route("/logout", delete(auth::logout))
}
