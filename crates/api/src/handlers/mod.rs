//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate input, delegate to the auth service or the
//! corresponding repository in `lockstash_db`, and map errors via
//! [`crate::error::AppError`].

pub mod auth;
pub mod auth_session;
pub mod folder;
pub mod record;
pub mod settings;
pub mod user;
