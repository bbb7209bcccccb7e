//! Authentication subsystem.
//!
//! - [`jwt`] -- signed bearer-token codec (format/signature/expiry only).
//! - [`service`] -- the session protocol: login, refresh, logout, targeted
//!   and bulk revocation, coordinating the session store, the access cache,
//!   the token codec, and the credential hasher.

pub mod jwt;
pub mod service;
