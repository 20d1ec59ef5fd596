//! The forwarding pass.
//!
//! # Responsibilities
//! - Short-circuit OPTIONS preflights before anything else
//! - Resolve the backend origin according to the configured mode
//! - Build and execute exactly one outbound call per inbound request
//! - Tolerantly parse the backend body (JSON or opaque text)
//! - Classify the outcome: success body, or a [`RelayError`]
//!
//! # Design Decisions
//! - One attempt per request. No retries, no queueing; every failure is
//!   reported synchronously to the original caller.
//! - A missing origin in `required` mode fails each request individually
//!   instead of refusing to start, keeping preflight and the error message
//!   reachable while a deployment is still incomplete.
//! - Success drops the backend's exact 2xx status; the handler renders
//!   every success as 200. Non-2xx statuses pass through verbatim.

use std::time::Duration;

use axum::http::{header, HeaderMap, Method};
use serde_json::json;
use tracing::debug;

use crate::config::{BackendConfig, OriginMode, RouteConfig, TimeoutConfig};
use crate::relay::error::RelayError;
use crate::relay::outbound::{outbound_body, outbound_headers};
use crate::relay::target::backend_url;
use crate::relay::types::{InboundRequest, RelayBody};

/// Stateless relay core. Cheap to clone; the inner client shares its
/// connection pool across clones.
#[derive(Debug, Clone)]
pub struct Forwarder {
    client: reqwest::Client,
    backend: BackendConfig,
}

impl Forwarder {
    /// Build a forwarder with the configured outbound timeouts. Timeouts
    /// left unset fall back to the client's own defaults.
    pub fn new(backend: BackendConfig, timeouts: &TimeoutConfig) -> Result<Self, reqwest::Error> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = timeouts.connect_secs {
            builder = builder.connect_timeout(Duration::from_secs(secs));
        }
        if let Some(secs) = timeouts.request_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            backend,
        })
    }

    /// Forward one inbound request along `route`.
    ///
    /// `Ok` is the body to relay with status 200. Every other outcome is a
    /// [`RelayError`] carrying its own status/body rendering.
    pub async fn forward(
        &self,
        route: &RouteConfig,
        inbound: &InboundRequest,
    ) -> Result<RelayBody, RelayError> {
        // Preflights are answered locally, even when the backend origin is
        // missing or the route would otherwise reject the request.
        if inbound.method == Method::OPTIONS {
            return Ok(RelayBody::Empty);
        }

        let origin = self.resolved_origin()?;
        let url = backend_url(origin, route, inbound)?;

        debug!(
            route = %route.name,
            method = %inbound.method,
            path = %inbound.path,
            url = %url,
            "forwarding request"
        );

        let mut request = self
            .client
            .request(inbound.method.clone(), url)
            .headers(outbound_headers(&inbound.headers));
        if let Some(body) = outbound_body(&inbound.method, &inbound.body) {
            request = request.body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let json_body = is_json_content_type(response.headers());
        // Read failures are absorbed the same way parse failures are: the
        // caller gets an empty body rather than a transport error.
        let bytes = response.bytes().await.unwrap_or_default();
        let body = parse_backend_body(json_body, &bytes);

        debug!(route = %route.name, status = status.as_u16(), "backend responded");

        if status.is_success() {
            Ok(body)
        } else {
            Err(RelayError::Upstream { status, body })
        }
    }

    fn resolved_origin(&self) -> Result<&str, RelayError> {
        match self.backend.origin.as_deref().filter(|o| !o.is_empty()) {
            Some(origin) => Ok(origin),
            None => match self.backend.origin_mode {
                OriginMode::Fallback => Ok(&self.backend.fallback_origin),
                OriginMode::Required => Err(RelayError::Configuration(format!(
                    "{} environment variable is not set",
                    self.backend.env_var
                ))),
            },
        }
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| {
            let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
            essence == "application/json" || essence.ends_with("+json")
        })
        .unwrap_or(false)
}

/// Tolerant body interpretation: JSON bodies that fail to parse become an
/// empty object, everything else is relayed as text.
fn parse_backend_body(json: bool, bytes: &[u8]) -> RelayBody {
    if json {
        RelayBody::Json(serde_json::from_slice(bytes).unwrap_or_else(|_| json!({})))
    } else {
        RelayBody::Text(String::from_utf8_lossy(bytes).into_owned())
    }
}
