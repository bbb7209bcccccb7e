//! Handlers for the `/auth` resource (login, refresh, logout).

use axum::extract::State;
use axum::http::header::{HeaderValue, SET_COOKIE};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use lockstash_core::error::CoreError;
use lockstash_core::validation;

use crate::auth::service::{self, TokenPairResponse};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{CurrentSession, RefreshToken, REFRESH_TOKEN_COOKIE};
use crate::middleware::client::ClientInfo;
use crate::state::AppState;

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
    pub fingerprint: String,
}

/// Request body for `POST /auth/refresh_tokens`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub fingerprint: String,
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password + device fingerprint. Returns the
/// signed token pair and mirrors the refresh token into a cookie.
pub async fn login(
    State(state): State<AppState>,
    client: ClientInfo,
    Json(input): Json<LoginRequest>,
) -> AppResult<Response> {
    validation::validate_email(&input.email).map_err(CoreError::Validation)?;
    validation::validate_fingerprint(&input.fingerprint).map_err(CoreError::Validation)?;

    let pair = service::login(
        &state,
        &client,
        &input.email,
        &input.password,
        &input.fingerprint,
    )
    .await?;

    token_response(pair)
}

/// POST /api/v1/auth/refresh_tokens
///
/// Exchange the cookie-borne refresh token for a fresh pair. The cookie is
/// reset to the rotated refresh token.
pub async fn refresh(
    State(state): State<AppState>,
    client: ClientInfo,
    RefreshToken(refresh_token_id): RefreshToken,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Response> {
    validation::validate_fingerprint(&input.fingerprint).map_err(CoreError::Validation)?;

    let pair = service::refresh(&state, &client, refresh_token_id, &input.fingerprint).await?;

    token_response(pair)
}

/// DELETE /api/v1/auth/logout
///
/// Terminate the calling session and clear the refresh-token cookie.
/// Returns 204 No Content.
pub async fn logout(
    State(state): State<AppState>,
    session: CurrentSession,
    client: ClientInfo,
) -> AppResult<Response> {
    service::delete_session(&state, session.session_id, session.user_id, Some(&client)).await?;

    let mut response = StatusCode::NO_CONTENT.into_response();
    response.headers_mut().insert(
        SET_COOKIE,
        HeaderValue::from_static("refresh_token=; Max-Age=0; Path=/; HttpOnly"),
    );
    Ok(response)
}

/// Build the token-pair response with the refresh cookie set.
fn token_response(pair: TokenPairResponse) -> AppResult<Response> {
    let cookie = format!(
        "{REFRESH_TOKEN_COOKIE}={}; Max-Age={}; Path=/; HttpOnly",
        pair.refresh_token,
        pair.refresh_token_expires_in * 60
    );
    let value = HeaderValue::from_str(&cookie)
        .map_err(|e| AppError::InternalError(format!("Invalid cookie value: {e}")))?;

    let mut response = Json(pair).into_response();
    response.headers_mut().insert(SET_COOKIE, value);
    Ok(response)
}
