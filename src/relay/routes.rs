//! Route selection.
//!
//! Each relay route is mounted at a path prefix. An inbound request is
//! matched against the configured mounts, longest mount first, so a
//! specific mount like `/reviews` wins over the catch-all `/`.
//!
//! Mount semantics:
//! - `/` matches everything and strips nothing (the full inbound path is
//!   the sub-path handed to target resolution).
//! - Any other mount matches the exact path or the path followed by a
//!   `/` boundary, and stripping removes the mount itself.

use crate::config::RouteConfig;

/// Configured routes ordered for matching.
#[derive(Debug, Clone)]
pub struct RouteSet {
    routes: Vec<RouteConfig>,
}

impl RouteSet {
    /// Build a match-ordered set from configuration order.
    pub fn new(mut routes: Vec<RouteConfig>) -> Self {
        routes.sort_by(|a, b| b.mount.len().cmp(&a.mount.len()));
        Self { routes }
    }

    /// Find the route handling `path`, if any.
    pub fn matching(&self, path: &str) -> Option<&RouteConfig> {
        self.routes
            .iter()
            .find(|route| mount_matches(&route.mount, path))
    }
}

fn mount_matches(mount: &str, path: &str) -> bool {
    if mount == "/" {
        return true;
    }
    match path.strip_prefix(mount) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Remove the mount prefix from `path`. The catch-all mount leaves the
/// path untouched. Callers normalize the leading separator themselves.
pub(crate) fn strip_mount<'a>(mount: &str, path: &'a str) -> &'a str {
    if mount == "/" {
        return path;
    }
    path.strip_prefix(mount).unwrap_or(path)
}
