//! The session protocol: login, refresh, logout, targeted and bulk
//! revocation.
//!
//! Every operation here runs inside one SERIALIZABLE transaction against
//! the relational store (the source of truth for sessions and refresh
//! tokens) and coordinates the access cache (the sole authority for access
//! token validity). Correctness under concurrent requests for the same
//! session relies on the isolation level plus the one-directional
//! active -> terminated lifecycle; no in-process locks are used.
//!
//! Cache ordering rules:
//! - deletes of old access tokens happen before the relational commit
//!   (an already-invalidated cache entry for a not-yet-persisted state is
//!   harmless, the reverse is not);
//! - writes of new descriptors happen after the commit, so a cache entry
//!   can never outlive a failed insert. Keys are never reused (token ids
//!   are fresh UUIDs), so there is no ordering hazard between a delete and
//!   the following put.

use serde::Serialize;
use sqlx::PgConnection;
use uuid::Uuid;

use lockstash_cache::{AccessTokenCache, SessionDescriptor};
use lockstash_core::error::CoreError;
use lockstash_core::hashing;
use lockstash_core::types::DbId;
use lockstash_db::begin_serializable;
use lockstash_db::models::auth_session::{AuthSession, CreateAuthSession, SessionStatus};
use lockstash_db::models::user::User;
use lockstash_db::repositories::{AuthSessionRepo, SettingsRepo, UserRepo};

use crate::auth::jwt::{self, JwtConfig};
use crate::error::{AppError, AppResult};
use crate::middleware::client::ClientInfo;
use crate::state::AppState;

/// Signed token pair returned by login and refresh. Expirations are in
/// minutes, mirroring the embedded token lifetimes.
#[derive(Debug, Serialize)]
pub struct TokenPairResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub access_token_expires_in: i64,
    pub refresh_token_expires_in: i64,
}

/// Authenticate credentials and open a new session.
///
/// An unknown (or soft-deleted) email and a wrong password fail with the
/// same `BadAuthData`, so the endpoint cannot be used to enumerate
/// registered addresses.
pub async fn login(
    state: &AppState,
    client: &ClientInfo,
    email: &str,
    password: &str,
    fingerprint: &str,
) -> AppResult<TokenPairResponse> {
    let mut tx = begin_serializable(&state.pool).await?;

    let user = UserRepo::find_active_by_email(&mut *tx, email)
        .await?
        .ok_or(CoreError::BadAuthData)?;

    if hashing::hash_password(password) != user.password_hash {
        return Err(CoreError::BadAuthData.into());
    }

    let settings = SettingsRepo::get(&mut *tx, user.id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("user {} has no settings row", user.id)))?;

    let session = AuthSessionRepo::create(
        &mut *tx,
        &CreateAuthSession {
            user_id: user.id,
            user_ip: client.ip.clone(),
            user_agent: client.user_agent.clone(),
            fingerprint: hashing::hash_fingerprint(fingerprint),
            expires_in: settings.auth_session_expiration,
        },
    )
    .await?;
    tx.commit().await?;

    let (access_id, refresh_id) = token_ids(&session)?;
    cache_access_token(state, access_id, session.id, &user).await?;

    tracing::info!(user_id = user.id, session_id = %session.id, "New login");

    sign_pair(
        access_id,
        refresh_id,
        settings.auth_session_expiration,
        &state.config.jwt,
    )
}

/// Exchange a refresh token for a new token pair, rotating both
/// identifiers.
///
/// The old access token is revoked unconditionally before anything else --
/// there is no grace overlap. A fingerprint mismatch is treated as token
/// theft: the session is terminated on the spot and the legitimate owner
/// must log in again.
pub async fn refresh(
    state: &AppState,
    client: &ClientInfo,
    refresh_token_id: Uuid,
    fingerprint: &str,
) -> AppResult<TokenPairResponse> {
    let mut tx = begin_serializable(&state.pool).await?;

    let session = AuthSessionRepo::find_by_refresh_token(&mut *tx, refresh_token_id)
        .await?
        .ok_or(CoreError::AuthSessionNotFound)?;
    if session.status == SessionStatus::Deleted {
        return Err(CoreError::AuthSessionDeleted.into());
    }

    if let Some(old_access) = session.access_token {
        state.cache.delete(old_access).await?;
    }

    if hashing::hash_fingerprint(fingerprint) != session.fingerprint {
        AuthSessionRepo::terminate_on_mismatch(
            &mut *tx,
            session.id,
            &client.ip,
            client.user_agent.as_deref(),
        )
        .await?;
        tx.commit().await?;

        tracing::warn!(
            session_id = %session.id,
            user_id = session.user_id,
            "Fingerprint mismatch on refresh, session terminated"
        );
        return Err(CoreError::BadFingerprint.into());
    }

    let user = UserRepo::find_by_id(&mut *tx, session.user_id)
        .await?
        .ok_or(CoreError::UserNotFound)?;
    let settings = SettingsRepo::get(&mut *tx, user.id)
        .await?
        .ok_or_else(|| AppError::InternalError(format!("user {} has no settings row", user.id)))?;

    let new_access = Uuid::new_v4();
    let new_refresh = Uuid::new_v4();
    AuthSessionRepo::rotate_tokens(
        &mut *tx,
        session.id,
        new_access,
        new_refresh,
        &client.ip,
        client.user_agent.as_deref(),
    )
    .await?
    .ok_or(CoreError::AuthSessionDeleted)?;
    tx.commit().await?;

    cache_access_token(state, new_access, session.id, &user).await?;

    sign_pair(
        new_access,
        new_refresh,
        settings.auth_session_expiration,
        &state.config.jwt,
    )
}

/// Terminate one session: self-logout or targeted revocation of another
/// session belonging to the same user.
///
/// Repeat termination is an error (409), not a no-op. `client` is present
/// on the self-logout path only; targeted revocation carries no meaningful
/// connection metadata for the session being killed.
pub async fn delete_session(
    state: &AppState,
    session_id: Uuid,
    acting_user_id: DbId,
    client: Option<&ClientInfo>,
) -> AppResult<()> {
    let mut tx = begin_serializable(&state.pool).await?;

    let session = AuthSessionRepo::find_by_id(&mut *tx, session_id)
        .await?
        .filter(|s| s.user_id == acting_user_id)
        .ok_or(CoreError::AuthSessionNotFound)?;
    if session.status == SessionStatus::Deleted {
        return Err(CoreError::AuthSessionDeleted.into());
    }

    if let Some(access_token) = session.access_token {
        state.cache.delete(access_token).await?;
    }

    AuthSessionRepo::terminate(
        &mut *tx,
        session.id,
        client.map(|c| c.ip.as_str()),
        client.and_then(|c| c.user_agent.as_deref()),
    )
    .await?;
    tx.commit().await?;

    tracing::info!(session_id = %session.id, user_id = session.user_id, "Session terminated");
    Ok(())
}

/// Terminate every active session of a user inside the caller's
/// transaction (account deletion).
///
/// Cache invalidation is pipelined and issued before the relational commit;
/// if the commit subsequently fails, the already-deleted cache entries are
/// harmless (TTL would have reclaimed them anyway), whereas the reverse
/// order could leave live access tokens for terminated sessions.
pub async fn delete_user_sessions(
    db: &mut PgConnection,
    cache: &dyn AccessTokenCache,
    user_id: DbId,
) -> AppResult<u64> {
    let sessions = AuthSessionRepo::find_active_for_user(&mut *db, user_id).await?;

    let access_tokens: Vec<Uuid> = sessions.iter().filter_map(|s| s.access_token).collect();
    cache.delete_many(&access_tokens).await?;

    let terminated = AuthSessionRepo::terminate_all_for_user(&mut *db, user_id).await?;
    tracing::info!(user_id, terminated, "Bulk session revocation");
    Ok(terminated)
}

/// Write the descriptor for a fresh access token into the cache.
///
/// The encryption key is derived from the user's current password hash, so
/// a password change silently invalidates the keys of previously cached
/// sessions and forces re-login.
async fn cache_access_token(
    state: &AppState,
    access_token_id: Uuid,
    session_id: Uuid,
    user: &User,
) -> AppResult<()> {
    let descriptor = SessionDescriptor {
        session_id,
        user_id: user.id,
        encryption_key: hashing::derive_encryption_key(&user.password_hash),
    };
    state
        .cache
        .put(
            access_token_id,
            &descriptor,
            state.config.jwt.access_token_expiry_mins,
        )
        .await?;
    Ok(())
}

/// Both token identifiers of a freshly created/rotated session row.
fn token_ids(session: &AuthSession) -> Result<(Uuid, Uuid), AppError> {
    match (session.access_token, session.refresh_token) {
        (Some(access), Some(refresh)) => Ok((access, refresh)),
        _ => Err(AppError::InternalError(format!(
            "session {} is missing token identifiers",
            session.id
        ))),
    }
}

/// Sign the access/refresh pair for the wire.
fn sign_pair(
    access_token_id: Uuid,
    refresh_token_id: Uuid,
    refresh_expires_in_mins: i32,
    config: &JwtConfig,
) -> AppResult<TokenPairResponse> {
    let access_token = jwt::encode_token(access_token_id, config.access_token_expiry_mins, config)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let refresh_token = jwt::encode_token(refresh_token_id, i64::from(refresh_expires_in_mins), config)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(TokenPairResponse {
        access_token,
        refresh_token,
        access_token_expires_in: config.access_token_expiry_mins,
        refresh_token_expires_in: i64::from(refresh_expires_in_mins),
    })
}
