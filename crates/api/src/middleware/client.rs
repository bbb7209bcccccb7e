//! Client connection metadata extractor.

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

/// Placeholder when no client address header is present (e.g. direct
/// in-process test requests).
const UNKNOWN_IP: &str = "unknown";

/// Best-effort client IP and user agent, recorded on session rows.
///
/// The IP is taken from `x-forwarded-for` (first hop) or `x-real-ip`; the
/// service is expected to run behind a reverse proxy that sets one of them.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    pub ip: String,
    pub user_agent: Option<String>,
}

impl<S: Send + Sync> FromRequestParts<S> for ClientInfo {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };

        let ip = header("x-forwarded-for")
            .and_then(|v| v.split(',').next().map(|h| h.trim().to_string()))
            .or_else(|| header("x-real-ip"))
            .unwrap_or_else(|| UNKNOWN_IP.to_string());

        let user_agent = header("user-agent");

        Ok(ClientInfo { ip, user_agent })
    }
}
