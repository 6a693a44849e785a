//! Application configuration with layered resolution.
//!
//! Resolution order (highest priority first):
//! 1. Environment variables (`AUDIOGRAM_*`)
//! 2. Config file (`audiogram.toml` in the working directory, or the file
//!    named by `AUDIOGRAM_CONFIG`)
//! 3. Compiled defaults

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;

pub const CONFIG_FILE: &str = "audiogram.toml";
pub const ENV_CONFIG: &str = "AUDIOGRAM_CONFIG";
pub const ENV_INPUT_FILE: &str = "AUDIOGRAM_INPUT_FILE";
pub const ENV_MODEL_LEFT: &str = "AUDIOGRAM_MODEL_LEFT";
pub const ENV_MODEL_RIGHT: &str = "AUDIOGRAM_MODEL_RIGHT";

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub input: InputConfig,
    pub models: ModelConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// File holding the twelve pre-filled readings.
    pub path: PathBuf,
}

impl Default for InputConfig {
    fn default() -> Self {
        let path = if cfg!(windows) { r"C:\test.txt" } else { "test.txt" };
        Self {
            path: PathBuf::from(path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    pub left: PathBuf,
    pub right: PathBuf,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            left: PathBuf::from("model_decidera_left.json"),
            right: PathBuf::from("model_decidera_right.json"),
        }
    }
}

impl AppConfig {
    /// Resolves the configuration from the process environment and the
    /// working directory.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Path::new("."), |key| std::env::var(key).ok())
    }

    /// Resolves the configuration relative to `root`, reading variables
    /// through `env`.
    pub fn load_with<E>(root: &Path, env: E) -> Result<Self, ConfigError>
    where
        E: Fn(&str) -> Option<String>,
    {
        let mut config = match env(ENV_CONFIG) {
            Some(path) => Self::from_file(Path::new(&path))?,
            None => {
                let path = root.join(CONFIG_FILE);
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_env_overrides(env);
        config.validate()?;
        debug!(?config, "resolved configuration");
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Parses a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::Parse {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    fn apply_env_overrides<E>(&mut self, env: E)
    where
        E: Fn(&str) -> Option<String>,
    {
        if let Some(path) = env(ENV_INPUT_FILE) {
            self.input.path = PathBuf::from(path);
        }
        if let Some(path) = env(ENV_MODEL_LEFT) {
            self.models.left = PathBuf::from(path);
        }
        if let Some(path) = env(ENV_MODEL_RIGHT) {
            self.models.right = PathBuf::from(path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("input.path", &self.input.path),
            ("models.left", &self.models.left),
            ("models.right", &self.models.right),
        ];
        for (field, path) in fields {
            if path.as_os_str().is_empty() {
                return Err(ConfigError::Validation {
                    field: field.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        Ok(())
    }
}
