//! Route definitions for the `/settings` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`. All require authentication.
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(settings::get_settings).patch(settings::patch_settings),
    )
}
