//! Handlers for the `/records` resource.
//!
//! Record content is encrypted with the per-session key carried by
//! [`CurrentSession`]: plaintext exists only inside a request. Listings
//! skip decryption entirely and return `content: null` per item.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use lockstash_core::error::CoreError;
use lockstash_core::types::DbId;
use lockstash_core::validation;
use lockstash_db::models::record::{CreateRecord, RecordFilter, RecordResponse, UpdateRecord};
use lockstash_db::repositories::RecordRepo;

use crate::error::AppResult;
use crate::handlers::folder::ensure_folder_exists;
use crate::middleware::auth::CurrentSession;
use crate::query::PaginationParams;
use crate::response::Page;
use crate::state::AppState;

/// POST /api/v1/records
pub async fn create_record(
    session: CurrentSession,
    State(state): State<AppState>,
    Json(input): Json<CreateRecord>,
) -> AppResult<(StatusCode, Json<RecordResponse>)> {
    validation::validate_label("Record title", &input.title).map_err(CoreError::Validation)?;
    if let Some(folder_id) = input.folder_id {
        ensure_folder_exists(&state, folder_id, session.user_id).await?;
    }

    let ciphertext = state
        .encryptor
        .encrypt_text(&input.content, &session.encryption_key)?;
    let record = RecordRepo::create(&state.pool, session.user_id, &input, &ciphertext).await?;

    Ok((
        StatusCode::CREATED,
        Json(RecordResponse::from_row(record, Some(input.content))),
    ))
}

/// GET /api/v1/records
pub async fn list_records(
    session: CurrentSession,
    State(state): State<AppState>,
    Query(pagination): Query<PaginationParams>,
    Query(filter): Query<RecordFilter>,
) -> AppResult<Json<Page<RecordResponse>>> {
    let (records, total_items) = RecordRepo::list_for_owner(
        &state.pool,
        session.user_id,
        &filter,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;

    Ok(Json(Page {
        items: records
            .into_iter()
            .map(|record| RecordResponse::from_row(record, None))
            .collect(),
        total_items,
        total_pages: pagination.total_pages(total_items),
    }))
}

/// GET /api/v1/records/{id}
///
/// Returns the record with its content decrypted under the caller's
/// session key.
pub async fn get_record(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(record_id): Path<DbId>,
) -> AppResult<Json<RecordResponse>> {
    let record = RecordRepo::find_for_owner(&state.pool, record_id, session.user_id)
        .await?
        .ok_or(CoreError::RecordNotFound { record_id })?;

    let content = state
        .encryptor
        .decrypt_text(&record.content, &session.encryption_key)?;
    Ok(Json(RecordResponse::from_row(record, Some(content))))
}

/// PATCH /api/v1/records/{id}
pub async fn patch_record(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(record_id): Path<DbId>,
    Json(input): Json<UpdateRecord>,
) -> AppResult<Json<RecordResponse>> {
    if let Some(title) = &input.title {
        validation::validate_label("Record title", title).map_err(CoreError::Validation)?;
    }
    if let Some(folder_id) = input.folder_id {
        ensure_folder_exists(&state, folder_id, session.user_id).await?;
    }

    let ciphertext = input
        .content
        .as_deref()
        .map(|content| state.encryptor.encrypt_text(content, &session.encryption_key))
        .transpose()?;

    let record = RecordRepo::update(
        &state.pool,
        record_id,
        session.user_id,
        &input,
        ciphertext.as_deref(),
    )
    .await?
    .ok_or(CoreError::RecordNotFound { record_id })?;

    let content = state
        .encryptor
        .decrypt_text(&record.content, &session.encryption_key)?;
    Ok(Json(RecordResponse::from_row(record, Some(content))))
}

/// DELETE /api/v1/records/{id}
pub async fn delete_record(
    session: CurrentSession,
    State(state): State<AppState>,
    Path(record_id): Path<DbId>,
) -> AppResult<StatusCode> {
    let deleted = RecordRepo::delete(&state.pool, record_id, session.user_id).await?;
    if !deleted {
        return Err(CoreError::RecordNotFound { record_id }.into());
    }
    Ok(StatusCode::NO_CONTENT)
}
