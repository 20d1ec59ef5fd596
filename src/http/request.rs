//! Request identification.
//!
//! # Responsibilities
//! - Give every inbound request a correlation ID for logging
//! - Honor an X-Request-ID supplied by the caller
//!
//! # Design Decisions
//! - The ID stays on our side of the relay. Only the authorization and
//!   content-type headers are ever forwarded, so the ID is not propagated
//!   to the backend.

use axum::http::HeaderMap;
use uuid::Uuid;

/// Header checked for a caller-supplied request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Correlation ID for one relayed request.
#[derive(Debug, Clone)]
pub struct RequestId(String);

impl RequestId {
    /// Use the caller-provided X-Request-ID when present and non-empty,
    /// otherwise mint a fresh UUID.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let id = headers
            .get(X_REQUEST_ID)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        Self(id)
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
