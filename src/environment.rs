// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_FETCH_LIMIT: usize = 1000;
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Settings for one deployment environment, as written in `config.yaml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
    pub api_url: String,
    pub timeout_seconds: u64,
    pub fetch_limit: usize,
    pub page_size: usize,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            fetch_limit: DEFAULT_FETCH_LIMIT,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    local: EnvironmentConfig,
    #[serde(default)]
    production: EnvironmentConfig,
}

impl EnvironmentConfig {
    /// Load configuration for the current environment.
    ///
    /// A missing `config.yaml` is not an error; built-in defaults apply.
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = PathBuf::from("config.yaml");
        if !config_path.exists() {
            info!("config.yaml not found, using defaults");
            return Ok(Self::default());
        }

        Self::load_from_file(&config_path, &environment)
    }

    pub fn get_environment() -> String {
        std::env::var("JOBMOD_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        Self::from_yaml(&config_content, environment)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }
}
