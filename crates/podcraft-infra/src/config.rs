//! On-disk application configuration.
//!
//! Settings live in `config.toml` under the data directory
//! (`PODCRAFT_DATA_DIR`, defaulting to `~/.podcraft`). A missing file means
//! defaults; a malformed file is an error rather than a silent fallback.
//! The DeepSeek API key is never stored in the file -- it comes from the
//! `DEEPSEEK_API_KEY` environment variable.

use std::path::{Path, PathBuf};

use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use podcraft_types::host::DEFAULT_HOST_ID;
use podcraft_types::llm::ModelParams;

/// Environment variable holding the DeepSeek API key.
pub const API_KEY_ENV: &str = "DEEPSEEK_API_KEY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("missing API key: set the {API_KEY_ENV} environment variable")]
    MissingApiKey,
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Host persona used for new podcasts when none is given.
    pub default_host: String,
    pub model: ModelConfig,
}

/// `[model]` section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub name: String,
    pub max_tokens: u32,
    pub temperature: f64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_host: DEFAULT_HOST_ID.to_string(),
            model: ModelConfig::default(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        let params = ModelParams::default();
        Self {
            name: params.model,
            max_tokens: params.max_tokens,
            temperature: params.temperature.unwrap_or(0.7),
        }
    }
}

impl AppConfig {
    /// Load configuration from `config.toml` in the data directory.
    ///
    /// A missing file yields the default configuration.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join("config.toml");
        match std::fs::read_to_string(&path) {
            Ok(contents) => toml::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: path.clone(),
                source,
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file; using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }

    /// Model parameters for completion requests.
    pub fn model_params(&self) -> ModelParams {
        ModelParams {
            model: self.model.name.clone(),
            max_tokens: self.model.max_tokens,
            temperature: Some(self.model.temperature),
        }
    }
}

/// Resolve the data directory from `PODCRAFT_DATA_DIR`, falling back to
/// `~/.podcraft`.
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PODCRAFT_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".podcraft")
}

/// Read the DeepSeek API key from the environment.
pub fn api_key() -> Result<SecretString, ConfigError> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(SecretString::from(key)),
        _ => Err(ConfigError::MissingApiKey),
    }
}
