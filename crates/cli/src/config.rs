//! Configuration management for the CLI

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::PathBuf;

/// Server URL used when neither flag, env var nor config file set one
pub const DEFAULT_API_URL: &str = "http://localhost:8080";

/// CLI configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// API endpoint URL
    pub api_url: Option<String>,
    /// Default output format
    pub default_format: Option<OutputFormat>,
}

impl Config {
    /// Load configuration from the user's config file, if present
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    fn load_from(path: &PathBuf) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// Get the configuration file path
    fn config_path() -> Option<PathBuf> {
        dirs_next::home_dir().map(|home| home.join(".config").join("outbreak").join("config.json"))
    }

    /// Resolve the API URL: explicit flag/env first, then config file, then default
    pub fn resolve_api_url(&self, flag: Option<String>) -> String {
        flag.or_else(|| self.api_url.clone())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
    }

    pub fn resolve_format(&self, flag: Option<OutputFormat>) -> OutputFormat {
        flag.or(self.default_format).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let missing = PathBuf::from("/nonexistent/outbreak/config.json");
        let config = Config::load_from(&missing).unwrap();
        assert!(config.api_url.is_none());
        assert_eq!(config.resolve_api_url(None), DEFAULT_API_URL);
        assert_eq!(config.resolve_format(None), OutputFormat::Table);
    }

    #[test]
    fn test_flag_overrides_config() {
        let config: Config =
            serde_json::from_str(r#"{"api_url":"http://predictor:9000","default_format":"json"}"#)
                .unwrap();

        assert_eq!(config.resolve_api_url(None), "http://predictor:9000");
        assert_eq!(
            config.resolve_api_url(Some("http://other:1".to_string())),
            "http://other:1"
        );
        assert_eq!(config.resolve_format(None), OutputFormat::Json);
        assert_eq!(config.resolve_format(Some(OutputFormat::Table)), OutputFormat::Table);
    }
}
