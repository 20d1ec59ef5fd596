//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize, or start from defaults)
//!     → loader.rs (environment override: BACKEND_URL → backend.origin)
//!     → validation.rs (semantic checks)
//!     → RelayConfig (validated, immutable)
//!     → shared with the server at construction time
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; there is no hot reload
//! - All fields have defaults; the defaults ARE the standard deployment
//! - Validation separates syntactic (serde) from semantic checks
//! - The backend origin comes from one environment variable with an explicit
//!   required-vs-fallback mode, instead of divergent per-handler defaults

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{default_config, load_config, ConfigError};
pub use schema::{
    default_routes, BackendConfig, ListenerConfig, ObservabilityConfig, OriginMode, RelayConfig,
    RouteConfig, RouteKind, TimeoutConfig,
};
pub use validation::{validate_config, ValidationError};
