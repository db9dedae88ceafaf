use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use crate::validation::RangePolicy;

/// File name of the model artifact inside the models directory
pub const DEFAULT_MODEL_FILENAME: &str = "parkinsons_model.json";

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub schema_version: u32,
    pub bind_address: SocketAddr,

    // Asset paths; `None` falls back to the default directories
    pub model_path: Option<PathBuf>,
    pub background_path: Option<PathBuf>,

    pub range_policy: RangePolicy,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            schema_version: 1,
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8501)),
            model_path: None,
            background_path: None,
            range_policy: RangePolicy::Permissive,
        }
    }
}

impl Config {
    /// Load config from file, or create default
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {:?}", path))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file {:?}", path))
        } else {
            Ok(Self::default())
        }
    }

    /// Get the default config directory
    pub fn default_config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .context("Failed to get home directory")?;
        Ok(home.join(".parkinsons-assistant"))
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("config.json"))
    }

    /// Get the default models directory
    pub fn default_models_dir() -> Result<PathBuf> {
        Ok(Self::default_config_dir()?.join("models"))
    }

    /// Get the model artifact path
    pub fn get_model_path(&self) -> Result<PathBuf> {
        if let Some(ref path) = self.model_path {
            Ok(path.clone())
        } else {
            let models_dir = Self::default_models_dir()
                .context("No model path configured and no default location available")?;
            Ok(models_dir.join(DEFAULT_MODEL_FILENAME))
        }
    }
}
