//! Configuration file
//!
//! JSON, every field optional:
//!
//! ```json
//! {
//!   "host": "0.0.0.0",
//!   "port": 54321,
//!   "cors_origins": ["https://reviews.example.edu"],
//!   "max_comment_length": 1000
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::{CliError, CliResult};
use crate::http_server::HttpServerConfig;
use crate::validation::{ReviewLimits, DEFAULT_MAX_COMMENT_LENGTH};

/// Configuration file structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(flatten)]
    pub server: HttpServerConfig,

    /// Longest accepted review comment, in characters
    #[serde(default = "default_max_comment_length")]
    pub max_comment_length: usize,
}

fn default_max_comment_length() -> usize {
    DEFAULT_MAX_COMMENT_LENGTH
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: HttpServerConfig::default(),
            max_comment_length: default_max_comment_length(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            CliError::config_error(format!("Failed to read config {}: {}", path.display(), e))
        })?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("port must be > 0"));
        }
        if self.server.host.trim().is_empty() {
            return Err(CliError::config_error("host must not be empty"));
        }
        if self.max_comment_length == 0 {
            return Err(CliError::config_error("max_comment_length must be > 0"));
        }
        Ok(())
    }

    pub fn review_limits(&self) -> ReviewLimits {
        ReviewLimits {
            max_comment_length: self.max_comment_length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let file = write_config("{}");
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.review_limits(), ReviewLimits::default());
    }

    #[test]
    fn test_flattened_server_fields() {
        let file = write_config(
            r#"{"port": 8080, "cors_origins": ["https://reviews.example.edu"], "max_comment_length": 200}"#,
        );
        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.cors_origins, vec!["https://reviews.example.edu"]);
        assert_eq!(config.review_limits().max_comment_length, 200);
    }

    #[test]
    fn test_rejects_zero_port() {
        let file = write_config(r#"{"port": 0}"#);
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.message().contains("port"));
    }

    #[test]
    fn test_rejects_zero_comment_length() {
        let file = write_config(r#"{"max_comment_length": 0}"#);
        assert!(Config::load(file.path()).is_err());
    }

    #[test]
    fn test_rejects_invalid_json() {
        let file = write_config("{not json");
        let err = Config::load(file.path()).unwrap_err();
        assert!(err.message().contains("Invalid config JSON"));
    }

    #[test]
    fn test_missing_file() {
        let err = Config::load(Path::new("/nonexistent/profrate.json")).unwrap_err();
        assert!(err.message().contains("Failed to read config"));
    }
}
