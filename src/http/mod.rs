//! HTTP serving subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, body buffering, route selection)
//!     → request.rs (correlation ID)
//!     → [relay core forwards to the backend]
//!     → response.rs (outcome rendering, CORS attachment)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, X_REQUEST_ID};
pub use server::HttpServer;
