//! Outbound URL construction.
//!
//! # Data Flow
//! ```text
//! InboundRequest + RouteConfig
//!     → resolved backend path
//!         prefix routes: routing parameter, or mount-stripped request
//!         path, normalized to one leading slash, behind backend_prefix
//!         fixed routes: literal target with the required parameter
//!         interpolated
//!     → re-serialized query (routing-only parameters removed)
//!     → origin + path + query, parsed into a Url
//! ```
//!
//! # Design Decisions
//! - The backend prefix is appended unconditionally for prefix routes. With
//!   the catch-all mount this doubles an `/api` segment already present in
//!   the request path (`/api/reviews/...` → `origin/api/api/reviews/...`).
//!   That is the contract existing deployments rewrite against, so it is
//!   kept as-is rather than deduplicated.
//! - Routing-only parameters never reach the backend query string.
//! - An unparseable composed URL surfaces as a transport error, the same
//!   outcome a client would produce when handed the bad URL.

use url::{form_urlencoded, Url};

use crate::config::{RouteConfig, RouteKind};
use crate::relay::error::RelayError;
use crate::relay::routes::strip_mount;
use crate::relay::types::InboundRequest;

/// Compose the full backend URL for one inbound request.
pub fn backend_url(
    origin: &str,
    route: &RouteConfig,
    inbound: &InboundRequest,
) -> Result<Url, RelayError> {
    let path = resolved_path(route, inbound)?;
    let mut raw = format!("{}{}", origin.trim_end_matches('/'), path);
    if let Some(query) = outbound_query(route, inbound) {
        raw.push('?');
        raw.push_str(&query);
    }
    Url::parse(&raw).map_err(|err| RelayError::Transport(format!("invalid backend url {raw:?}: {err}")))
}

/// Resolve the backend path portion for `route`.
fn resolved_path(route: &RouteConfig, inbound: &InboundRequest) -> Result<String, RelayError> {
    match route.kind {
        RouteKind::Prefix => {
            let sub = route
                .routing_param
                .as_deref()
                .and_then(|name| inbound.param(name))
                .unwrap_or_else(|| strip_mount(&route.mount, &inbound.path));
            Ok(format!(
                "{}/{}",
                route.backend_prefix,
                sub.trim_start_matches('/')
            ))
        }
        RouteKind::Fixed => {
            let template = route.target.as_deref().ok_or_else(|| {
                RelayError::Configuration(format!("route {} has no target path", route.name))
            })?;
            match route.required_param.as_deref() {
                Some(name) => {
                    let value = inbound
                        .param(name)
                        .ok_or_else(|| RelayError::Validation(format!("{name} is required")))?;
                    Ok(template.replace(&format!("{{{name}}}"), value))
                }
                None => Ok(template.to_string()),
            }
        }
    }
}

/// Re-serialize the inbound query, dropping routing-only parameters.
/// Returns `None` when nothing remains, so the caller can omit the `?`.
fn outbound_query(route: &RouteConfig, inbound: &InboundRequest) -> Option<String> {
    let excluded = [route.routing_param.as_deref(), route.required_param.as_deref()];
    let forwarded: Vec<_> = inbound
        .query
        .iter()
        .filter(|(key, _)| !excluded.iter().flatten().any(|name| *name == key.as_str()))
        .collect();
    if forwarded.is_empty() {
        return None;
    }

    let mut serializer = form_urlencoded::Serializer::new(String::new());
    for (key, value) in forwarded {
        serializer.append_pair(key, value);
    }
    Some(serializer.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_routes;
    use axum::body::Bytes;
    use axum::http::{HeaderMap, Method, Uri};

    fn api_route() -> RouteConfig {
        default_routes().remove(0)
    }

    fn reviews_route() -> RouteConfig {
        default_routes().remove(1)
    }

    fn inbound(uri: &str) -> InboundRequest {
        let uri: Uri = uri.parse().unwrap();
        InboundRequest::from_parts(Method::GET, &uri, &HeaderMap::new(), Bytes::new())
    }

    #[test]
    fn test_catch_all_doubles_api_segment() {
        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/api/reviews/landlord/42"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/api/reviews/landlord/42"
        );
    }

    #[test]
    fn test_routing_param_wins_over_request_path() {
        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/ignored?path=/users/7&page=2"),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/users/7?page=2");
    }

    #[test]
    fn test_empty_routing_param_falls_back_to_path() {
        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/users/7?path="),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/users/7");
    }

    #[test]
    fn test_leading_slashes_collapse_to_one() {
        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/x?path=users/7"),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/users/7");

        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/x?path=//users/7"),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/users/7");
    }

    #[test]
    fn test_origin_trailing_slash_is_trimmed() {
        let url = backend_url(
            "https://api.example.com/",
            &api_route(),
            &inbound("/x?path=/users"),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/users");
    }

    #[test]
    fn test_query_without_leftover_params_omits_question_mark() {
        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/x?path=/users"),
        )
        .unwrap();
        assert!(!url.as_str().contains('?'));
    }

    #[test]
    fn test_fixed_route_interpolates_required_param() {
        let url = backend_url(
            "https://api.example.com",
            &reviews_route(),
            &inbound("/reviews?id=42&sort=recent"),
        )
        .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.example.com/api/reviews/landlord/42?sort=recent"
        );
    }

    #[test]
    fn test_fixed_route_missing_param_is_validation_error() {
        let err = backend_url(
            "https://api.example.com",
            &reviews_route(),
            &inbound("/reviews"),
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::Validation(ref m) if m == "id is required"));
    }

    #[test]
    fn test_query_values_are_percent_encoded() {
        let url = backend_url(
            "https://api.example.com",
            &api_route(),
            &inbound("/x?path=/search&q=a%20b"),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/search?q=a+b");
    }

    #[test]
    fn test_mounted_prefix_route_strips_mount() {
        let mut route = api_route();
        route.mount = "/relay".to_string();
        route.routing_param = None;
        let url = backend_url(
            "https://api.example.com",
            &route,
            &inbound("/relay/users/7"),
        )
        .unwrap();
        assert_eq!(url.as_str(), "https://api.example.com/api/users/7");
    }
}
