//! Per-request value types.
//!
//! Every entity here is transient: it is built from one inbound request,
//! consumed by one forwarding pass, and dropped with the response. Nothing
//! outlives a request/response cycle.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method, Uri};
use url::form_urlencoded;

/// The subset of inbound headers the relay looks at. Everything else is
/// deliberately dropped before forwarding.
#[derive(Debug, Clone, Default)]
pub struct InboundHeaders {
    /// Authorization header, copied to the backend verbatim when present.
    pub authorization: Option<HeaderValue>,
    /// Content-Type header, overriding the `application/json` default.
    pub content_type: Option<HeaderValue>,
}

impl InboundHeaders {
    /// Extract the forwarded subset from a full header map.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            authorization: headers.get(header::AUTHORIZATION).cloned(),
            content_type: headers.get(header::CONTENT_TYPE).cloned(),
        }
    }
}

/// An inbound request reduced to the parts the relay forwards.
#[derive(Debug, Clone)]
pub struct InboundRequest {
    /// Request method, forwarded unchanged.
    pub method: Method,
    /// Raw request path.
    pub path: String,
    /// Decoded query pairs in arrival order.
    pub query: Vec<(String, String)>,
    /// Forwarded header subset.
    pub headers: InboundHeaders,
    /// Raw body bytes (possibly empty).
    pub body: Bytes,
}

impl InboundRequest {
    /// Build an inbound request from the pieces axum hands us.
    pub fn from_parts(method: Method, uri: &Uri, headers: &HeaderMap, body: Bytes) -> Self {
        let query = uri
            .query()
            .map(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .into_owned()
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        Self {
            method,
            path: uri.path().to_string(),
            query,
            headers: InboundHeaders::from_headers(headers),
            body,
        }
    }

    /// First non-empty value of a query parameter. An empty value counts
    /// as absent, matching how the handlers treat blank routing inputs.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, v)| k == name && !v.is_empty())
            .map(|(_, v)| v.as_str())
    }
}

/// A relayed response body: what came back from the backend after the
/// tolerant parse, or nothing at all for the OPTIONS short-circuit.
#[derive(Debug, Clone, PartialEq)]
pub enum RelayBody {
    /// Backend body parsed as JSON (empty object when parsing failed).
    Json(serde_json::Value),
    /// Backend body relayed as opaque text.
    Text(String),
    /// No body (OPTIONS preflight answer).
    Empty,
}
