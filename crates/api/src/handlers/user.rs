//! Handlers for the `/users` resource: registration and self-service
//! account management.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use lockstash_core::error::CoreError;
use lockstash_core::{hashing, validation};
use lockstash_db::models::user::{CreateUser, UpdateUser, User, UserResponse, UserStatus};
use lockstash_db::repositories::{FolderRepo, SettingsRepo, UserRepo};

use crate::auth::service;
use crate::error::AppResult;
use crate::middleware::auth::CurrentSession;
use crate::state::AppState;

/// Request body for `POST /users`.
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

/// POST /api/v1/users
///
/// Register a new account with its default settings. Public endpoint.
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    validation::validate_email(&input.email).map_err(CoreError::Validation)?;
    validation::validate_password(&input.password).map_err(CoreError::Validation)?;
    validation::validate_label("Name", &input.name).map_err(CoreError::Validation)?;

    let mut tx = state.pool.begin().await?;

    if UserRepo::email_exists(&mut *tx, &input.email).await? {
        return Err(CoreError::UserEmailAlreadyExists { email: input.email }.into());
    }

    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            email: input.email,
            password_hash: hashing::hash_password(&input.password),
            name: input.name,
        },
    )
    .await?;
    SettingsRepo::create_default(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((StatusCode::CREATED, Json(user.into())))
}

/// GET /api/v1/users/me
pub async fn get_me(
    session: CurrentSession,
    State(state): State<AppState>,
) -> AppResult<Json<UserResponse>> {
    let user = load_active_user(&state, session.user_id).await?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/users/me
///
/// Update profile fields. An email change is re-checked for uniqueness
/// among non-deleted users.
pub async fn patch_me(
    session: CurrentSession,
    State(state): State<AppState>,
    Json(input): Json<UpdateUser>,
) -> AppResult<Json<UserResponse>> {
    if let Some(email) = &input.email {
        validation::validate_email(email).map_err(CoreError::Validation)?;
    }
    if let Some(name) = &input.name {
        validation::validate_label("Name", name).map_err(CoreError::Validation)?;
    }

    let mut tx = state.pool.begin().await?;

    let user = UserRepo::find_by_id(&mut *tx, session.user_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    if user.status == UserStatus::Deleted {
        return Err(CoreError::UserDeleted.into());
    }

    if let Some(email) = &input.email {
        if !email.eq_ignore_ascii_case(&user.email)
            && UserRepo::email_exists(&mut *tx, email).await?
        {
            return Err(CoreError::UserEmailAlreadyExists {
                email: email.clone(),
            }
            .into());
        }
    }

    let updated = UserRepo::update(&mut *tx, user.id, &input)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    tx.commit().await?;

    Ok(Json(updated.into()))
}

/// DELETE /api/v1/users/me
///
/// Soft-delete the account: settings removed, every session bulk-revoked,
/// folders (and their records) dropped -- all in one serializable
/// transaction so either every session ends up terminated or none do.
/// Returns 204 No Content.
pub async fn delete_me(
    session: CurrentSession,
    State(state): State<AppState>,
) -> AppResult<StatusCode> {
    let mut tx = lockstash_db::begin_serializable(&state.pool).await?;

    let user = UserRepo::find_by_id(&mut *tx, session.user_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    if user.status == UserStatus::Deleted {
        return Err(CoreError::UserDeleted.into());
    }

    UserRepo::soft_delete(&mut *tx, user.id).await?;
    SettingsRepo::delete(&mut *tx, user.id).await?;
    service::delete_user_sessions(&mut tx, state.cache.as_ref(), user.id).await?;
    FolderRepo::delete_all_for_owner(&mut *tx, user.id).await?;
    tx.commit().await?;

    tracing::info!(user_id = user.id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Load a user that must exist and not be soft-deleted.
async fn load_active_user(state: &AppState, user_id: i64) -> AppResult<User> {
    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    if user.status == UserStatus::Deleted {
        return Err(CoreError::UserDeleted.into());
    }
    Ok(user)
}
