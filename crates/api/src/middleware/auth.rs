//! Bearer-token resolution for protected handlers.

use axum::extract::FromRequestParts;
use axum::http::header::COOKIE;
use axum::http::request::Parts;
use uuid::Uuid;

use lockstash_core::error::CoreError;
use lockstash_core::types::DbId;

use crate::auth::jwt::decode_token;
use crate::error::AppError;
use crate::state::AppState;

/// Cookie carrying the signed refresh token between refreshes.
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// The resolved session of an authenticated request.
///
/// Resolution is cache-only by design: the codec verifies
/// signature/expiry, the subject is looked up in the access cache, and a
/// miss (natural TTL expiry or explicit revocation) is `Unauthorized`.
/// The relational store is never consulted on this path, keeping every
/// protected request O(1) without a database round trip.
///
/// ```ignore
/// async fn my_handler(session: CurrentSession) -> AppResult<Json<()>> {
///     tracing::info!(user_id = session.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub session_id: Uuid,
    pub user_id: DbId,
    /// Record-content key for this session's lifetime.
    pub encryption_key: String,
}

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let access_token_id = decode_subject(token, state)?;

        let descriptor = state
            .cache
            .get(access_token_id)
            .await?
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;

        Ok(CurrentSession {
            session_id: descriptor.session_id,
            user_id: descriptor.user_id,
            encryption_key: descriptor.encryption_key,
        })
    }
}

/// The refresh-token subject extracted from the `refresh_token` cookie.
///
/// Only token-format verification happens here; whether the session behind
/// the subject is alive is decided inside the refresh operation itself.
#[derive(Debug, Clone)]
pub struct RefreshToken(pub Uuid);

impl FromRequestParts<AppState> for RefreshToken {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(COOKIE)
            .and_then(|v| v.to_str().ok())
            .and_then(cookie_value)
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized("Missing refresh token".into()))
            })?;

        Ok(RefreshToken(decode_subject(token, state)?))
    }
}

/// Decode a signed token and parse its subject as a UUID.
fn decode_subject(token: &str, state: &AppState) -> Result<Uuid, AppError> {
    let claims = decode_token(token, &state.config.jwt)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;
    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Core(CoreError::Unauthorized("Invalid token".into())))
}

/// Pull the refresh-token value out of a `Cookie` header.
fn cookie_value(header: &str) -> Option<&str> {
    header.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == REFRESH_TOKEN_COOKIE).then_some(value)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_value_finds_the_token() {
        assert_eq!(cookie_value("refresh_token=abc"), Some("abc"));
        assert_eq!(
            cookie_value("theme=dark; refresh_token=abc; lang=en"),
            Some("abc")
        );
    }

    #[test]
    fn cookie_value_ignores_other_cookies() {
        assert_eq!(cookie_value("theme=dark"), None);
        assert_eq!(cookie_value(""), None);
        // Name must match exactly.
        assert_eq!(cookie_value("xrefresh_token=abc"), None);
    }
}
