//! Handlers for the `/settings` resource.

use axum::extract::State;
use axum::Json;

use lockstash_core::error::CoreError;
use lockstash_core::validation;
use lockstash_db::models::settings::{Settings, UpdateSettings};
use lockstash_db::repositories::SettingsRepo;

use crate::error::AppResult;
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

/// GET /api/v1/settings
pub async fn get_settings(
    session: CurrentSession,
    State(state): State<AppState>,
) -> AppResult<Json<Settings>> {
    let settings = SettingsRepo::get(&state.pool, session.user_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    Ok(Json(settings))
}

/// PATCH /api/v1/settings
///
/// Update the session expiration window. Sessions created afterwards use
/// the new value; running sessions keep the window they started with.
pub async fn patch_settings(
    session: CurrentSession,
    State(state): State<AppState>,
    Json(input): Json<UpdateSettings>,
) -> AppResult<Json<Settings>> {
    let Some(expiration) = input.auth_session_expiration else {
        // Nothing to change; report the current state.
        return get_settings(session, State(state)).await;
    };
    validation::validate_session_expiration(expiration).map_err(CoreError::Validation)?;

    let settings = SettingsRepo::update(&state.pool, session.user_id, expiration)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    Ok(Json(settings))
}
