//! Outbound header and body construction.
//!
//! The relay forwards a deliberately small surface: two headers and the
//! raw body. Everything else on the inbound request (cookies, tracing
//! headers, host) stops here.

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method};

use crate::relay::types::InboundHeaders;

const DEFAULT_CONTENT_TYPE: HeaderValue = HeaderValue::from_static("application/json");

/// Headers for the backend request: content-type (defaulting to JSON,
/// overridden by the inbound value) and the authorization header when the
/// caller sent one. No other inbound header is forwarded.
pub fn outbound_headers(headers: &InboundHeaders) -> HeaderMap {
    let mut out = HeaderMap::new();
    out.insert(
        header::CONTENT_TYPE,
        headers.content_type.clone().unwrap_or(DEFAULT_CONTENT_TYPE),
    );
    if let Some(authorization) = &headers.authorization {
        out.insert(header::AUTHORIZATION, authorization.clone());
    }
    out
}

/// Body for the backend request.
///
/// GET, HEAD and OPTIONS never carry one. A POST without an inbound body
/// gets the literal two-byte `{}`, for backends that reject bodyless POSTs.
/// Everything else forwards the inbound bytes as-is, or nothing when the
/// inbound body was empty.
pub fn outbound_body(method: &Method, body: &Bytes) -> Option<Bytes> {
    if method == Method::GET || method == Method::HEAD || method == Method::OPTIONS {
        return None;
    }
    if body.is_empty() {
        if method == Method::POST {
            return Some(Bytes::from_static(b"{}"));
        }
        return None;
    }
    Some(body.clone())
}
