//! Relay error taxonomy.
//!
//! Every failure a forwarding pass can produce is one of four explicit
//! outcomes, each with a fixed HTTP rendering:
//!
//! - [`RelayError::Configuration`]: the relay itself is misconfigured
//!   (missing backend origin). Always 500, never reaches the network.
//! - [`RelayError::Validation`]: the inbound request is missing something
//!   a route requires. Always 400, never reaches the network.
//! - [`RelayError::Upstream`]: the backend answered with a non-success
//!   status. Status and body pass through untouched.
//! - [`RelayError::Transport`]: the outbound call itself failed (DNS,
//!   refused connection, timeout). Always 500 with diagnostic details.
//!
//! The mapping to status code and body lives here as pure functions so it
//! can be tested without a server or a socket.

use axum::http::StatusCode;
use serde_json::json;
use thiserror::Error;

use crate::relay::types::RelayBody;

/// A failed forwarding pass.
#[derive(Debug, Error)]
pub enum RelayError {
    /// The relay cannot determine where to send the request.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The inbound request is missing a required routing input.
    #[error("validation error: {0}")]
    Validation(String),

    /// The backend answered with a non-success status; relayed verbatim.
    #[error("backend returned status {status}")]
    Upstream {
        status: StatusCode,
        body: RelayBody,
    },

    /// The outbound HTTP call failed before a response arrived.
    #[error("transport error: {0}")]
    Transport(String),
}

impl RelayError {
    /// HTTP status this error renders as.
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            RelayError::Validation(_) => StatusCode::BAD_REQUEST,
            RelayError::Upstream { status, .. } => *status,
            RelayError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Response body this error renders as.
    pub fn body(&self) -> RelayBody {
        match self {
            RelayError::Configuration(message) | RelayError::Validation(message) => {
                RelayBody::Json(json!({ "error": message }))
            }
            RelayError::Upstream { body, .. } => body.clone(),
            RelayError::Transport(details) => RelayBody::Json(json!({
                "error": "failed to relay request to backend",
                "details": details,
            })),
        }
    }
}

impl From<reqwest::Error> for RelayError {
    fn from(err: reqwest::Error) -> Self {
        RelayError::Transport(error_chain(&err))
    }
}

/// Flatten an error and its sources into one diagnostic line. The top-level
/// reqwest message alone ("error sending request") rarely names the real
/// cause, which sits further down the chain.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
