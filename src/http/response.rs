//! Response rendering.
//!
//! # Responsibilities
//! - Render a relay outcome (body or error) as an HTTP response
//! - Attach the three CORS headers to every response the server emits
//! - Render rejections produced before a route was selected
//!
//! # Design Decisions
//! - Success is always 200: the backend's exact 2xx status is not
//!   preserved. Non-2xx statuses arrive here inside the error and pass
//!   through verbatim.
//! - CORS is unconditional. Error paths and rejections advertise the full
//!   method list; matched routes advertise their configured list.

use axum::http::{header, HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::config::RouteConfig;
use crate::relay::{RelayBody, RelayError};

/// Method list advertised when no route took part in the response.
const DEFAULT_ALLOW_METHODS: &str = "GET, POST, OPTIONS, PUT, DELETE";

/// Render the outcome of a forwarding pass for `route`.
pub fn relay_response(route: &RouteConfig, outcome: Result<RelayBody, RelayError>) -> Response {
    let (status, body) = match outcome {
        Ok(body) => (StatusCode::OK, body),
        Err(err) => (err.status(), err.body()),
    };
    render(status, body, &route.allow_methods_header())
}

/// Render a rejection raised before any route was selected (unmatched
/// path, unreadable body).
pub fn rejection_response(status: StatusCode, message: &str) -> Response {
    render(
        status,
        RelayBody::Json(json!({ "error": message })),
        DEFAULT_ALLOW_METHODS,
    )
}

fn render(status: StatusCode, body: RelayBody, allow_methods: &str) -> Response {
    let mut response = match body {
        RelayBody::Json(value) => (status, axum::Json(value)).into_response(),
        RelayBody::Text(text) => (status, text).into_response(),
        RelayBody::Empty => status.into_response(),
    };
    response.headers_mut().extend(cors_headers(allow_methods));
    response
}

fn cors_headers(allow_methods: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    if let Ok(value) = HeaderValue::from_str(allow_methods) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_METHODS, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Authorization, Content-Type"),
    );
    headers
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_routes;

    async fn body_bytes(response: Response) -> Vec<u8> {
        axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap()
            .to_vec()
    }

    fn assert_cors(response: &Response, methods: &str) {
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            methods
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_HEADERS).unwrap(),
            "Authorization, Content-Type"
        );
    }

    #[tokio::test]
    async fn test_success_renders_200_json_with_cors() {
        let route = default_routes().remove(0);
        let response = relay_response(&route, Ok(RelayBody::Json(json!({"ok": true}))));

        assert_eq!(response.status(), StatusCode::OK);
        assert_cors(&response, "GET, POST, OPTIONS, PUT, DELETE");
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        assert_eq!(body_bytes(response).await, br#"{"ok":true}"#);
    }

    #[tokio::test]
    async fn test_empty_body_renders_without_content() {
        let route = default_routes().remove(0);
        let response = relay_response(&route, Ok(RelayBody::Empty));

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_bytes(response).await.is_empty());
    }

    #[tokio::test]
    async fn test_upstream_error_passes_status_and_body_through() {
        let route = default_routes().remove(1);
        let response = relay_response(
            &route,
            Err(RelayError::Upstream {
                status: StatusCode::NOT_FOUND,
                body: RelayBody::Json(json!({"error": "not found"})),
            }),
        );

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response, "GET, OPTIONS");
        assert_eq!(body_bytes(response).await, br#"{"error":"not found"}"#);
    }

    #[tokio::test]
    async fn test_text_body_renders_as_plain_text() {
        let route = default_routes().remove(0);
        let response = relay_response(&route, Ok(RelayBody::Text("pong".to_string())));

        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap()
            .to_string();
        assert!(content_type.starts_with("text/plain"));
        assert_eq!(body_bytes(response).await, b"pong");
    }

    #[tokio::test]
    async fn test_rejection_carries_default_cors() {
        let response =
            rejection_response(StatusCode::NOT_FOUND, "no route matches the request path");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_cors(&response, "GET, POST, OPTIONS, PUT, DELETE");
        assert_eq!(
            body_bytes(response).await,
            br#"{"error":"no route matches the request path"}"#
        );
    }
}
