//! Route definitions for the `/users` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Routes mounted at `/users`. Registration is public; `/me` requires
/// authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(user::create_user))
        .route(
            "/me",
            get(user::get_me).patch(user::patch_me).delete(user::delete_me),
        )
}
