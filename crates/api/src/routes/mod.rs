//! Route definitions.
//!
//! Route hierarchy under `/api/v1`:
//!
//! ```text
//! /auth/login                POST   login (public)
//! /auth/refresh_tokens       POST   refresh (refresh cookie)
//! /auth/logout               DELETE logout (bearer)
//!
//! /auth_sessions             GET    list own active sessions
//! /auth_sessions/{id}        GET, DELETE
//!
//! /users                     POST   register (public)
//! /users/me                  GET, PATCH, DELETE
//!
//! /settings                  GET, PATCH
//!
//! /folders                   POST, GET
//! /folders/{id}              GET, PATCH, DELETE
//!
//! /records                   POST, GET
//! /records/{id}              GET, PATCH, DELETE
//! ```
//!
//! `/health` lives outside the versioned tree (see [`health`]).

pub mod auth;
pub mod auth_session;
pub mod folder;
pub mod health;
pub mod record;
pub mod settings;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/auth_sessions", auth_session::router())
        .nest("/users", user::router())
        .nest("/settings", settings::router())
        .nest("/folders", folder::router())
        .nest("/records", record::router())
}
