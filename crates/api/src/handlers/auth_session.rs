//! Handlers for the `/auth_sessions` resource: inspection and targeted
//! revocation of the authenticated user's own sessions.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use lockstash_core::error::CoreError;
use lockstash_db::models::auth_session::{AuthSessionResponse, SessionStatus};
use lockstash_db::repositories::AuthSessionRepo;

use crate::auth::service;
use crate::error::AppResult;
use crate::middleware::auth::CurrentSession;
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

/// GET /api/v1/auth_sessions
///
/// Paginated listing of the caller's active sessions, oldest first.
/// Terminated sessions stay in the table for audit but are not exposed.
pub async fn list_sessions(
    session: CurrentSession,
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<Page<AuthSessionResponse>>> {
    let (sessions, total_items) = AuthSessionRepo::list_active_for_user(
        &state.pool,
        session.user_id,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(Page {
        items: sessions.into_iter().map(Into::into).collect(),
        total_items,
        total_pages: pagination.total_pages(total_items),
    }))
}

/// GET /api/v1/auth_sessions/{id}
pub async fn get_session(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<Json<AuthSessionResponse>> {
    let target = AuthSessionRepo::find_by_id(&state.pool, session_id)
        .await?
        .filter(|s| s.user_id == session.user_id)
        .ok_or(CoreError::AuthSessionNotFound)?;
    if target.status == SessionStatus::Deleted {
        return Err(CoreError::AuthSessionDeleted.into());
    }

    Ok(Json(target.into()))
}

/// DELETE /api/v1/auth_sessions/{id}
///
/// Revoke one of the caller's sessions (e.g. a forgotten device). Returns
/// 204 No Content; revoking an already-terminated session is a 409.
pub async fn delete_session(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> AppResult<StatusCode> {
    service::delete_session(&state, session_id, session.user_id, None).await?;
    Ok(StatusCode::NO_CONTENT)
}
