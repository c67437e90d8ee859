//! Server configuration

use anyhow::{Context, Result};
use predictor_lib::{OnnxProvider, Task};
use serde::Deserialize;
use std::path::PathBuf;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP listener binds to
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// API server port
    #[serde(default = "default_api_port")]
    pub api_port: u16,

    /// Directory holding the SVM/ and RF/ model artifacts
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,

    #[serde(default)]
    pub log_format: LogFormat,

    /// Expected SHA256 of each artifact; unchecked when unset
    #[serde(default)]
    pub diabetes_sha256: Option<String>,

    #[serde(default)]
    pub heart_disease_sha256: Option<String>,

    #[serde(default)]
    pub parkinsons_sha256: Option<String>,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_api_port() -> u16 {
    8080
}

fn default_model_dir() -> PathBuf {
    PathBuf::from("models")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            api_port: default_api_port(),
            model_dir: default_model_dir(),
            log_format: LogFormat::default(),
            diabetes_sha256: None,
            heart_disease_sha256: None,
            parkinsons_sha256: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from an optional `predictor.toml` and `PREDICTOR_*` env vars
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("predictor").required(false))
            .add_source(config::Environment::with_prefix("PREDICTOR").try_parsing(true))
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid predictor configuration")
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.api_port)
    }

    pub fn checksum(&self, task: Task) -> Option<&str> {
        match task {
            Task::Diabetes => self.diabetes_sha256.as_deref(),
            Task::HeartDisease => self.heart_disease_sha256.as_deref(),
            Task::Parkinsons => self.parkinsons_sha256.as_deref(),
        }
    }

    /// Build the classifier provider described by this configuration
    pub fn provider(&self) -> OnnxProvider {
        Task::ALL
            .into_iter()
            .fold(OnnxProvider::new(self.model_dir.clone()), |provider, task| {
                match self.checksum(task) {
                    Some(sum) => provider.with_checksum(task, sum),
                    None => provider,
                }
            })
    }
}
