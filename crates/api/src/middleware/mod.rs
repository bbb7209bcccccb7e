//! Request extractors for authentication and client metadata.
//!
//! - [`auth::CurrentSession`] -- resolves a bearer access token to its
//!   cached session descriptor.
//! - [`auth::RefreshToken`] -- extracts the refresh-token subject from the
//!   request cookie.
//! - [`client::ClientInfo`] -- best-effort client IP and user agent.

pub mod auth;
pub mod client;
