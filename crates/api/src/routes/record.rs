//! Route definitions for the `/records` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::record;
use crate::state::AppState;

/// Routes mounted at `/records`. All require authentication.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(record::create_record).get(record::list_records))
        .route(
            "/{id}",
            get(record::get_record)
                .patch(record::patch_record)
                .delete(record::delete_record),
        )
}
