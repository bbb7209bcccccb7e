//! Route definitions for the `/folders` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::folder;
use crate::state::AppState;

/// Routes mounted at `/folders`. All require authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(folder::create_folder).get(folder::list_folders))
        .route(
            "/{id}",
            get(folder::get_folder)
                .patch(folder::patch_folder)
                .delete(folder::delete_folder),
        )
}
