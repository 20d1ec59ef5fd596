//! HTTP request relay library.
//!
//! Receives inbound HTTP requests, rewrites their path and query against a
//! configured backend origin, forwards them with a restricted header set,
//! and relays the backend's status and body back to the caller with
//! permissive CORS headers.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod relay;

pub use config::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use relay::{Forwarder, RelayBody, RelayError};
