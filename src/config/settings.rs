//! Configuration structures for deserialisation.
//!
//! These structures map directly to the JSON configuration file format.
//! Every field has a default, so an empty object is a valid configuration.

use serde::Deserialize;

use crate::error::ConfigError;

/// Default documentation site.
pub const DEFAULT_DOCS_BASE_URL: &str = "https://ui.shadcn.com";

/// Default registry location for the default style.
pub const DEFAULT_REGISTRY_BASE_URL: &str = "https://ui.shadcn.com/registry/styles/default";

/// Root configuration structure.
///
/// This is the top-level structure that matches the JSON config file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Optional JSON schema reference (ignored during parsing).
    #[serde(rename = "$schema", default)]
    _schema: Option<String>,

    /// Optional comment field (ignored during parsing).
    #[serde(rename = "_comment", default)]
    _comment: Option<String>,

    /// Upstream endpoints.
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any validation checks fail.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, url) in [
            ("upstream.docs_base_url", &self.upstream.docs_base_url),
            ("upstream.registry_base_url", &self.upstream.registry_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::ValidationError {
                    message: format!("Invalid {field} '{url}'. Must start with http:// or https://"),
                });
            }
        }

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError {
                message: format!(
                    "Invalid log level '{}'. Must be one of: {}",
                    self.logging.level,
                    valid_levels.join(", ")
                ),
            });
        }

        Ok(())
    }
}

/// Upstream site configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Base URL of the documentation site.
    /// Default: `https://ui.shadcn.com`
    #[serde(default = "default_docs_base_url")]
    pub docs_base_url: String,

    /// Base URL under which `{slug}.json` registry entries live.
    #[serde(default = "default_registry_base_url")]
    pub registry_base_url: String,

    /// User-Agent header sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            docs_base_url: default_docs_base_url(),
            registry_base_url: default_registry_base_url(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_docs_base_url() -> String {
    DEFAULT_DOCS_BASE_URL.to_string()
}

fn default_registry_base_url() -> String {
    DEFAULT_REGISTRY_BASE_URL.to_string()
}

fn default_user_agent() -> String {
    concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_minimal_config() {
        let json = r"{}";
        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.upstream.docs_base_url, DEFAULT_DOCS_BASE_URL);
    }

    #[test]
    fn parse_full_config() {
        let json = r#"{
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "_comment": "Test config",
            "upstream": {
                "docs_base_url": "http://localhost:3000",
                "registry_base_url": "http://localhost:3000/registry/styles/new-york",
                "user_agent": "custom-agent/1.0"
            },
            "logging": {
                "level": "debug"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.upstream.docs_base_url, "http://localhost:3000");
        assert_eq!(
            config.upstream.registry_base_url,
            "http://localhost:3000/registry/styles/new-york"
        );
        assert_eq!(config.upstream.user_agent, "custom-agent/1.0");
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn upstream_config_defaults() {
        let config = UpstreamConfig::default();
        assert_eq!(config.docs_base_url, "https://ui.shadcn.com");
        assert_eq!(
            config.registry_base_url,
            "https://ui.shadcn.com/registry/styles/default"
        );
        assert!(config.user_agent.starts_with("shadcn-ui-mcp/"));
    }

    #[test]
    fn logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "warn");
    }

    #[test]
    fn reject_non_http_url() {
        let json = r#"{
            "upstream": {
                "docs_base_url": "ftp://ui.shadcn.com"
            }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("docs_base_url"));
    }

    #[test]
    fn reject_invalid_log_level() {
        let json = r#"{ "logging": { "level": "loud" } }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_unknown_fields() {
        let json = r#"{
            "unknown_field": "value"
        }"#;

        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
