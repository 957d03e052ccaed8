//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `virtapi.toml` in the working directory unless a path is given
//! on the command line. Every field has a sensible default so the file is
//! optional. Environment variables take precedence over file values.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use virtapi_app::checker::DEFAULT_API_PREFIX;
use virtapi_domain::name::Name;

const DEFAULT_FILE: &str = "virtapi.toml";

/// CI variables holding the tag being built, checked in order.
const CI_TAG_VARS: [&str; 2] = ["TRAVIS_TAG", "CI_COMMIT_TAG"];

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Where service definitions live.
    pub model: ModelConfig,
    /// Documentation rendering settings.
    pub docs: DocsConfig,
    /// Documentation publishing settings.
    pub publish: PublishConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Model source configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory holding one definition file per service.
    pub dir: PathBuf,
    /// Name of the root service of the resource tree.
    pub root: String,
}

/// Documentation configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DocsConfig {
    /// Output directory of `virtapi render`.
    pub out_dir: PathBuf,
    /// Title of the rendered site.
    pub title: String,
    /// Prefix of example request paths in the documentation.
    pub api_prefix: String,
}

/// Publishing configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    /// Checkout of the documentation site; releases land in sub-directories.
    pub site_dir: PathBuf,
    /// Release tag used by `virtapi publish tagged`.
    pub tag: Option<String>,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `path` (or `virtapi.toml` if present) then
    /// apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, if an explicitly given
    /// file cannot be read, or if the result fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_FILE), false)?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    /// Apply overrides read through `var` (the process environment outside
    /// of tests).
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("VIRTAPI_MODEL_DIR") {
            self.model.dir = PathBuf::from(val);
        }
        if let Some(val) = var("VIRTAPI_ROOT") {
            self.model.root = val;
        }
        if let Some(val) = var("VIRTAPI_DOCS_DIR") {
            self.docs.out_dir = PathBuf::from(val);
        }
        if let Some(val) = var("VIRTAPI_API_PREFIX") {
            self.docs.api_prefix = val;
        }
        if let Some(val) = var("VIRTAPI_SITE_DIR") {
            self.publish.site_dir = PathBuf::from(val);
        }
        if let Some(val) = CI_TAG_VARS
            .iter()
            .find_map(|key| var(key).filter(|val| !val.trim().is_empty()))
        {
            self.publish.tag = Some(val);
        }
        if let Some(val) = var("VIRTAPI_TAG") {
            self.publish.tag = Some(val);
        }
        if let Some(val) = var("VIRTAPI_HOST") {
            self.server.host = val;
        }
        if let Some(val) = var("VIRTAPI_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Some(val) = var("VIRTAPI_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Some(val) = var("VIRTAPI_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if let Err(err) = self.model.root.parse::<Name>() {
            return Err(ConfigError::Validation(format!(
                "root service `{}` is not a valid name: {err}",
                self.model.root
            )));
        }
        if !self.docs.api_prefix.is_empty() && !self.docs.api_prefix.starts_with('/') {
            return Err(ConfigError::Validation(
                "api prefix must start with `/`".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Return the root service name.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] when the name is malformed, which
    /// [`Config::load`] already rules out.
    pub fn root(&self) -> Result<Name, ConfigError> {
        self.model
            .root
            .parse()
            .map_err(|err| ConfigError::Validation(format!("invalid root service: {err}")))
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("model/services"),
            root: "system".to_string(),
        }
    }
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("target/docs"),
            title: "oVirt Engine API".to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            site_dir: PathBuf::from("target/site"),
            tag: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "virtapi=info,virtapi_app=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use virtapi_app::services::publish_service::PublishTarget;

    fn overrides(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.model.dir, PathBuf::from("model/services"));
        assert_eq!(config.model.root, "system");
        assert_eq!(config.docs.api_prefix, "/ovirt-engine/api");
        assert_eq!(config.server.port, 3000);
        assert!(config.publish.tag.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_parse_minimal_toml() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [model]
            dir = 'defs'
            root = 'api'

            [docs]
            out_dir = 'out'
            title = 'Test API'
            api_prefix = '/api'

            [publish]
            site_dir = 'gh-pages'
            tag = '4.2.0'

            [server]
            host = '127.0.0.1'
            port = 9090

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.model.dir, PathBuf::from("defs"));
        assert_eq!(config.model.root, "api");
        assert_eq!(config.docs.out_dir, PathBuf::from("out"));
        assert_eq!(config.docs.title, "Test API");
        assert_eq!(config.docs.api_prefix, "/api");
        assert_eq!(config.publish.site_dir, PathBuf::from("gh-pages"));
        assert_eq!(config.publish.tag.as_deref(), Some("4.2.0"));
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [server]
            port = 8080
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.model.root, "system");
    }

    #[test]
    fn should_return_default_when_default_file_not_found() {
        let config = Config::from_file(Path::new("nonexistent.toml"), false).unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_fail_when_explicit_file_not_found() {
        let result = Config::from_file(Path::new("nonexistent.toml"), true);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn should_read_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.toml");
        std::fs::write(&path, "[model]\nroot = 'api'\n").unwrap();
        let config = Config::from_file(&path, true).unwrap();
        assert_eq!(config.model.root, "api");
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("virtapi.toml");
        std::fs::write(&path, "invalid {{{").unwrap();
        let result = Config::from_file(&path, false);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn should_apply_environment_overrides() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[
            ("VIRTAPI_MODEL_DIR", "/defs"),
            ("VIRTAPI_ROOT", "api"),
            ("VIRTAPI_API_PREFIX", "/api"),
            ("VIRTAPI_BIND", "127.0.0.1:8080"),
            ("VIRTAPI_LOG", "warn"),
        ]));
        assert_eq!(config.model.dir, PathBuf::from("/defs"));
        assert_eq!(config.model.root, "api");
        assert_eq!(config.docs.api_prefix, "/api");
        assert_eq!(config.bind_addr(), "127.0.0.1:8080");
        assert_eq!(config.logging.filter, "warn");
    }

    #[test]
    fn should_prefer_rust_log_over_virtapi_log() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("VIRTAPI_LOG", "warn"), ("RUST_LOG", "trace")]));
        assert_eq!(config.logging.filter, "trace");
    }

    #[test]
    fn should_take_tag_from_ci_environment() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("TRAVIS_TAG", "4.2.1")]));
        assert_eq!(config.publish.tag.as_deref(), Some("4.2.1"));

        let mut config = Config::default();
        config.apply_overrides(overrides(&[("TRAVIS_TAG", ""), ("CI_COMMIT_TAG", "4.3.0")]));
        assert_eq!(config.publish.tag.as_deref(), Some("4.3.0"));

        let mut config = Config::default();
        config.apply_overrides(overrides(&[("TRAVIS_TAG", " ")]));
        assert!(config.publish.tag.is_none());
    }

    #[test]
    fn should_prefer_explicit_tag_over_ci_tag() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("CI_COMMIT_TAG", "4.3.0"), ("VIRTAPI_TAG", "4.3.1")]));
        assert_eq!(config.publish.tag.as_deref(), Some("4.3.1"));
    }

    #[test]
    fn should_ignore_unparsable_port_override() {
        let mut config = Config::default();
        config.apply_overrides(overrides(&[("VIRTAPI_PORT", "http")]));
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_invalid_root_name() {
        let mut config = Config::default();
        config.model.root = "system-root".to_string();
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn should_reject_relative_api_prefix() {
        let mut config = Config::default();
        config.docs.api_prefix = "ovirt-engine/api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_defer_tag_check_to_tagged_publish() {
        let mut config = Config::default();
        config.publish.tag = Some("../4.2".to_string());
        assert!(config.validate().is_ok());
        assert!(PublishTarget::parse("master", config.publish.tag.as_deref()).is_ok());
        assert!(PublishTarget::parse("tagged", config.publish.tag.as_deref()).is_err());
    }

    #[test]
    fn should_return_parsed_root() {
        let config = Config::default();
        assert_eq!(config.root().unwrap().to_string(), "system");
    }
}
