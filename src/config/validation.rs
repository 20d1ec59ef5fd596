//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check kind-specific route fields are coherent
//! - Validate addresses, origins, and method lists
//! - Detect conflicting mounts
//!
//! # Design Decisions
//! - Returns all validation errors, not just the first
//! - Validation is a pure function: RelayConfig → Result<(), Vec<ValidationError>>
//! - Runs before the config is accepted into the system
//! - A missing origin in `required` mode is NOT a startup error: it must
//!   surface as the per-request configuration failure instead

use std::collections::HashSet;
use std::net::SocketAddr;

use thiserror::Error;
use url::Url;

use crate::config::schema::{RelayConfig, RouteConfig, RouteKind};

/// A single semantic problem in the configuration.
#[derive(Debug, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    /// Human-readable description of the problem.
    pub message: String,
}

fn problem(errors: &mut Vec<ValidationError>, field: &str, message: impl Into<String>) {
    errors.push(ValidationError {
        field: field.to_string(),
        message: message.into(),
    });
}

const KNOWN_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "OPTIONS", "HEAD", "PATCH"];

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &RelayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        problem(
            &mut errors,
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        );
    }

    if config.observability.metrics_enabled
        && config
            .observability
            .metrics_address
            .parse::<SocketAddr>()
            .is_err()
    {
        problem(
            &mut errors,
            "observability.metrics_address",
            format!(
                "'{}' is not a socket address",
                config.observability.metrics_address
            ),
        );
    }

    validate_backend(config, &mut errors);
    validate_routes(&config.routes, &mut errors);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_backend(config: &RelayConfig, errors: &mut Vec<ValidationError>) {
    if let Some(origin) = &config.backend.origin {
        check_origin(errors, "backend.origin", origin);
    }
    check_origin(
        errors,
        "backend.fallback_origin",
        &config.backend.fallback_origin,
    );
    if config.backend.env_var.is_empty() {
        problem(errors, "backend.env_var", "must not be empty");
    }
}

fn check_origin(errors: &mut Vec<ValidationError>, field: &str, origin: &str) {
    match Url::parse(origin) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {}
        Ok(url) => problem(
            errors,
            field,
            format!("unsupported scheme '{}', expected http or https", url.scheme()),
        ),
        Err(e) => problem(errors, field, format!("'{origin}' is not a URL: {e}")),
    }
}

fn validate_routes(routes: &[RouteConfig], errors: &mut Vec<ValidationError>) {
    if routes.is_empty() {
        problem(errors, "routes", "at least one route must be configured");
    }

    let mut mounts = HashSet::new();
    for (i, route) in routes.iter().enumerate() {
        let field = format!("routes[{i}]");

        if route.name.is_empty() {
            problem(errors, &field, "route name must not be empty");
        }
        if !route.mount.starts_with('/') {
            problem(
                errors,
                &field,
                format!("mount '{}' must start with '/'", route.mount),
            );
        }
        // Matching is segment-aligned: a trailing-slash mount would match
        // only its literal path and dead-end the rest of its subtree.
        if route.mount != "/" && route.mount.ends_with('/') {
            problem(
                errors,
                &field,
                format!("mount '{}' must not end with '/'", route.mount),
            );
        }
        if !mounts.insert(route.mount.clone()) {
            problem(
                errors,
                &field,
                format!("mount '{}' is already in use", route.mount),
            );
        }

        if route.methods.is_empty() {
            problem(errors, &field, "method list must not be empty");
        }
        for method in &route.methods {
            if !KNOWN_METHODS.contains(&method.as_str()) {
                problem(errors, &field, format!("unknown method '{method}'"));
            }
        }

        match route.kind {
            RouteKind::Prefix => validate_prefix_route(route, &field, errors),
            RouteKind::Fixed => validate_fixed_route(route, &field, errors),
        }
    }
}

fn validate_prefix_route(route: &RouteConfig, field: &str, errors: &mut Vec<ValidationError>) {
    if !route.backend_prefix.is_empty() && !route.backend_prefix.starts_with('/') {
        problem(
            errors,
            field,
            format!(
                "backend_prefix '{}' must be empty or start with '/'",
                route.backend_prefix
            ),
        );
    }
    if let Some(param) = &route.routing_param {
        if param.is_empty() {
            problem(errors, field, "routing_param must not be empty");
        }
    }
    if route.target.is_some() {
        problem(errors, field, "target only applies to fixed routes");
    }
    if route.required_param.is_some() {
        problem(errors, field, "required_param only applies to fixed routes");
    }
}

fn validate_fixed_route(route: &RouteConfig, field: &str, errors: &mut Vec<ValidationError>) {
    match &route.target {
        None => problem(errors, field, "fixed routes require a target path"),
        Some(target) => {
            if !target.starts_with('/') {
                problem(
                    errors,
                    field,
                    format!("target '{target}' must start with '/'"),
                );
            }
            if let Some(placeholder) = extract_placeholder(target) {
                if route.required_param.as_deref() != Some(placeholder) {
                    problem(
                        errors,
                        field,
                        format!(
                            "target placeholder '{{{placeholder}}}' has no matching required_param"
                        ),
                    );
                }
            }
        }
    }
    if let Some(param) = &route.required_param {
        if param.is_empty() {
            problem(errors, field, "required_param must not be empty");
        }
    }
    if route.routing_param.is_some() {
        problem(errors, field, "routing_param only applies to prefix routes");
    }
}

fn extract_placeholder(target: &str) -> Option<&str> {
    let start = target.find('{')?;
    let end = target[start..].find('}')? + start;
    Some(&target[start + 1..end])
}
