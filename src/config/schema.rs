//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the relay.
//! All types derive Serde traits for deserialization from config files.
//! The built-in defaults reproduce the standard deployment: a catch-all
//! prefix relay plus the read-only landlord-reviews endpoint.

use serde::{Deserialize, Serialize};

/// Root configuration for the relay.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Backend origin the relay forwards to.
    pub backend: BackendConfig,

    /// Handler variants mounted on the server.
    pub routes: Vec<RouteConfig>,

    /// Outbound call timeouts. Unset means no explicit timeout.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            listener: ListenerConfig::default(),
            backend: BackendConfig::default(),
            routes: default_routes(),
            timeouts: TimeoutConfig::default(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Backend origin configuration.
///
/// The origin is normally injected through the environment variable named by
/// `env_var`. `origin_mode` decides what an unset origin means: `required`
/// makes every request fail with a configuration error, `fallback` silently
/// substitutes `fallback_origin`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend origin (scheme + host + optional port). Usually populated
    /// from the environment rather than from the config file.
    pub origin: Option<String>,

    /// What to do when no origin is configured.
    pub origin_mode: OriginMode,

    /// Origin used in `fallback` mode when none is configured.
    pub fallback_origin: String,

    /// Name of the environment variable carrying the origin.
    pub env_var: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            origin: None,
            origin_mode: OriginMode::Required,
            fallback_origin: "http://127.0.0.1:8080".to_string(),
            env_var: "BACKEND_URL".to_string(),
        }
    }
}

/// Behavior when the backend origin is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OriginMode {
    /// Every request fails with a configuration error until an origin is set.
    #[default]
    Required,
    /// Requests silently target `fallback_origin`.
    Fallback,
}

/// A single handler variant mounted at a fixed path prefix.
///
/// `kind` selects the target resolution strategy; the kind-specific fields
/// are validated in `config::validation` rather than encoded in the type.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier for logging/metrics.
    pub name: String,

    /// Mount prefix ("/" for a catch-all).
    pub mount: String,

    /// Target resolution strategy.
    #[serde(default)]
    pub kind: RouteKind,

    /// Prefix variant: query parameter carrying the backend sub-path.
    #[serde(default)]
    pub routing_param: Option<String>,

    /// Prefix variant: literal path segment always inserted between the
    /// origin and the resolved sub-path.
    #[serde(default = "default_backend_prefix")]
    pub backend_prefix: String,

    /// Fixed variant: query parameter that must be present.
    #[serde(default)]
    pub required_param: Option<String>,

    /// Fixed variant: literal backend path, with an optional `{param}`
    /// placeholder for the required parameter.
    #[serde(default)]
    pub target: Option<String>,

    /// Methods advertised in the Access-Control-Allow-Methods header.
    #[serde(default = "default_methods")]
    pub methods: Vec<String>,
}

impl RouteConfig {
    /// Render the method list for the Access-Control-Allow-Methods header.
    pub fn allow_methods_header(&self) -> String {
        self.methods.join(", ")
    }
}

/// Target resolution strategy for a route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RouteKind {
    /// Relay under a path prefix: sub-path from the routing parameter or the
    /// mount-stripped request path, prepended with `backend_prefix`.
    #[default]
    Prefix,
    /// Relay to one fixed backend path, interpolating a required parameter.
    Fixed,
}

fn default_backend_prefix() -> String {
    "/api".to_string()
}

fn default_methods() -> Vec<String> {
    ["GET", "POST", "OPTIONS", "PUT", "DELETE"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// The standard deployment: a catch-all prefix relay plus the read-only
/// landlord-reviews endpoint.
pub fn default_routes() -> Vec<RouteConfig> {
    vec![
        RouteConfig {
            name: "api".to_string(),
            mount: "/".to_string(),
            kind: RouteKind::Prefix,
            routing_param: Some("path".to_string()),
            backend_prefix: default_backend_prefix(),
            required_param: None,
            target: None,
            methods: default_methods(),
        },
        RouteConfig {
            name: "landlord-reviews".to_string(),
            mount: "/reviews".to_string(),
            kind: RouteKind::Fixed,
            routing_param: None,
            backend_prefix: default_backend_prefix(),
            required_param: Some("id".to_string()),
            target: Some("/api/reviews/landlord/{id}".to_string()),
            methods: vec!["GET".to_string(), "OPTIONS".to_string()],
        },
    ]
}

/// Outbound call timeouts.
///
/// Both default to unset, reproducing the original behavior of relying on
/// whatever limit the platform imposes. Setting a value makes the limit
/// explicit per deployment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: Option<u64>,

    /// Total request timeout in seconds.
    pub request_secs: Option<u64>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}
