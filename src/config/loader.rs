//! Configuration loading from disk and the environment.
//!
//! The config file is optional: the defaults describe the standard
//! deployment, and the backend origin normally arrives through the
//! environment variable named by `backend.env_var`. Environment overrides
//! are applied after the file is parsed and before validation runs, so a
//! malformed origin is rejected at startup no matter where it came from.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::RelayConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse the config file as TOML.
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    /// Semantic validation rejected the configuration.
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load a configuration from a TOML file, apply environment overrides,
/// and validate it.
pub fn load_config(path: &Path) -> Result<RelayConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: RelayConfig = toml::from_str(&content)?;
    finish(config)
}

/// Build the default configuration, apply environment overrides, and
/// validate it. Used when no config file is given.
pub fn default_config() -> Result<RelayConfig, ConfigError> {
    finish(RelayConfig::default())
}

fn finish(mut config: RelayConfig) -> Result<RelayConfig, ConfigError> {
    apply_env_overrides_with(&mut config, |name| std::env::var(name).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Apply environment overrides using the given lookup function.
///
/// The variable named by `backend.env_var` populates `backend.origin`; an
/// empty value counts as unset and leaves the config untouched.
pub(crate) fn apply_env_overrides_with<F>(config: &mut RelayConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(origin) = lookup(&config.backend.env_var) {
        if !origin.is_empty() {
            config.backend.origin = Some(origin);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{OriginMode, RelayConfig};

    #[test]
    fn test_env_override_sets_origin() {
        let mut config = RelayConfig::default();
        apply_env_overrides_with(&mut config, |name| {
            assert_eq!(name, "BACKEND_URL");
            Some("https://api.example.com".to_string())
        });
        assert_eq!(
            config.backend.origin.as_deref(),
            Some("https://api.example.com")
        );
    }

    #[test]
    fn test_empty_env_value_counts_as_unset() {
        let mut config = RelayConfig::default();
        apply_env_overrides_with(&mut config, |_| Some(String::new()));
        assert_eq!(config.backend.origin, None);
    }

    #[test]
    fn test_env_var_name_is_configurable() {
        let mut config = RelayConfig::default();
        config.backend.env_var = "UPSTREAM_ORIGIN".to_string();
        apply_env_overrides_with(&mut config, |name| {
            (name == "UPSTREAM_ORIGIN").then(|| "http://10.0.0.1:9000".to_string())
        });
        assert_eq!(
            config.backend.origin.as_deref(),
            Some("http://10.0.0.1:9000")
        );
    }

    #[test]
    fn test_file_contents_parse_and_validate() {
        let toml = r#"
            [listener]
            bind_address = "127.0.0.1:4000"

            [backend]
            origin = "https://api.example.com"
            origin_mode = "fallback"

            [[routes]]
            name = "api"
            mount = "/"
            kind = "prefix"
            routing_param = "path"

            [[routes]]
            name = "reviews"
            mount = "/reviews"
            kind = "fixed"
            required_param = "id"
            target = "/api/reviews/landlord/{id}"
            methods = ["GET", "OPTIONS"]
        "#;
        let config: RelayConfig = toml::from_str(toml).expect("config should parse");
        assert_eq!(config.listener.bind_address, "127.0.0.1:4000");
        assert_eq!(config.backend.origin_mode, OriginMode::Fallback);
        assert_eq!(config.routes.len(), 2);
        validate_config(&config).expect("config should validate");
    }
}
