//! Relay core: everything between "request arrived" and "backend answered".
//!
//! # Data Flow
//! ```text
//! InboundRequest
//!     → routes.rs   (which configured route handles this path)
//!     → forwarder.rs (OPTIONS short-circuit, origin resolution)
//!     → target.rs   (backend URL: path resolution + query rewrite)
//!     → outbound.rs (forwarded header subset, body policy)
//!     → one HTTP call
//!     → RelayBody, or RelayError with its own status/body rendering
//! ```
//!
//! The pass is a single linear flow with one branch (the OPTIONS
//! short-circuit) and one fallible boundary (the network call). Nothing in
//! this module holds per-request state beyond the call stack.

pub mod error;
pub mod forwarder;
pub mod outbound;
pub mod routes;
pub mod target;
pub mod types;

pub use error::RelayError;
pub use forwarder::Forwarder;
pub use routes::RouteSet;
pub use types::{InboundHeaders, InboundRequest, RelayBody};
