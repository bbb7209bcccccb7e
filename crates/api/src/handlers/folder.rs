//! Handlers for the `/folders` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use lockstash_core::error::CoreError;
use lockstash_core::types::DbId;
use lockstash_core::validation;
use lockstash_db::models::folder::{CreateFolder, Folder, UpdateFolder};
use lockstash_db::repositories::FolderRepo;

use crate::error::AppResult;
use crate::middleware::auth::CurrentSession;
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

/// POST /api/v1/folders
pub async fn create_folder(
    session: CurrentSession,
    State(state): State<AppState>,
    Json(input): Json<CreateFolder>,
) -> AppResult<(StatusCode, Json<Folder>)> {
    validation::validate_label("Folder name", &input.name).map_err(CoreError::Validation)?;
    if let Some(parent_id) = input.parent_folder_id {
        ensure_folder_exists(&state, parent_id, session.user_id).await?;
    }

    let folder = FolderRepo::create(&state.pool, session.user_id, &input).await?;
    Ok((StatusCode::CREATED, Json(folder)))
}

/// GET /api/v1/folders
pub async fn list_folders(
    session: CurrentSession,
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
) -> AppResult<Json<Page<Folder>>> {
    let (folders, total_items) = FolderRepo::list_for_owner(
        &state.pool,
        session.user_id,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(Page {
        items: folders,
        total_items,
        total_pages: pagination.total_pages(total_items),
    }))
}

/// GET /api/v1/folders/{id}
pub async fn get_folder(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(folder_id): Path<DbId>,
) -> AppResult<Json<Folder>> {
    let folder = FolderRepo::find_for_owner(&state.pool, folder_id, session.user_id)
        .await?
        .ok_or(CoreError::FolderNotFound { folder_id })?;
    Ok(Json(folder))
}

/// PATCH /api/v1/folders/{id}
pub async fn patch_folder(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(folder_id): Path<DbId>,
    Json(input): Json<UpdateFolder>,
) -> AppResult<Json<Folder>> {
    if let Some(name) = &input.name {
        validation::validate_label("Folder name", name).map_err(CoreError::Validation)?;
    }
    if let Some(parent_id) = input.parent_folder_id {
        if parent_id == folder_id {
            return Err(
                CoreError::Validation("A folder cannot be its own parent".to_string()).into(),
            );
        }
        ensure_folder_exists(&state, parent_id, session.user_id).await?;
    }

    let folder = FolderRepo::update(&state.pool, folder_id, session.user_id, &input)
        .await?
        .ok_or(CoreError::FolderNotFound { folder_id })?;
    Ok(Json(folder))
}

/// DELETE /api/v1/folders/{id}
///
/// Deletes the folder, its subtree, and every contained record. Returns
/// 204 No Content.
pub async fn delete_folder(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(folder_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = FolderRepo::delete(&state.pool, folder_id, session.user_id).await?;
    if !deleted {
        return Err(CoreError::FolderNotFound { folder_id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}

/// Fail with `FolderNotFound` unless the folder exists and belongs to the
/// user. Shared with the record handlers.
pub(crate) async fn ensure_folder_exists(
    state: &AppState,
    folder_id: DbId,
    user_id: DbId,
) -> AppResult<()> {
    FolderRepo::find_for_owner(&state.pool, folder_id, user_id)
        .await?
        .ok_or(CoreError::FolderNotFound { folder_id })?;
    Ok(())
}
