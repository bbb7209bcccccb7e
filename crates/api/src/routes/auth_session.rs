//! Route definitions for the `/auth_sessions` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::auth_session;
use crate::state::AppState;

/// Routes mounted at `/auth_sessions`. All require authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(auth_session::list_sessions))
        .route(
            "/{id}",
            get(auth_session::get_session).delete(auth_session::delete_session),
        )
}
