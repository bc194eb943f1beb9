// src/core/config_manager.rs
//! Configuration loading: `config.yaml` first, environment variables on top

use anyhow::{Context, Result};
use tracing::info;

use crate::environment::EnvironmentConfig;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: String,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub fetch_limit: usize,
    pub page_size: usize,
    pub token: Option<String>,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = EnvironmentConfig::get_environment();
        let file_config = EnvironmentConfig::load()?;
        let api = Self::apply_overrides(file_config, |key| std::env::var(key).ok())?;

        info!(
            "Admin API: {} (timeout {}s, page size {})",
            api.base_url, api.timeout_seconds, api.page_size
        );

        Ok(Self { environment, api })
    }

    /// Layer `JOBMOD_*` variables over file settings
    pub fn apply_overrides<F>(base: EnvironmentConfig, lookup: F) -> Result<ApiConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let base_url = lookup("JOBMOD_API_URL").unwrap_or(base.api_url);

        let timeout_seconds = match lookup("JOBMOD_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("JOBMOD_TIMEOUT_SECS must be a number, got {}", raw))?,
            None => base.timeout_seconds,
        };

        let fetch_limit = match lookup("JOBMOD_FETCH_LIMIT") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("JOBMOD_FETCH_LIMIT must be a number, got {}", raw))?,
            None => base.fetch_limit,
        };

        let page_size = match lookup("JOBMOD_PAGE_SIZE") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("JOBMOD_PAGE_SIZE must be a number, got {}", raw))?,
            None => base.page_size,
        };

        if page_size == 0 {
            anyhow::bail!("page_size must be at least 1");
        }

        let token = lookup("JOBMOD_TOKEN").filter(|t| !t.trim().is_empty());

        Ok(ApiConfig {
            base_url,
            timeout_seconds,
            fetch_limit,
            page_size,
            token,
        })
    }
}

impl ApiConfig {
    /// Prefer an explicitly passed token over the configured one
    pub fn with_token(mut self, token: Option<String>) -> Self {
        if let Some(token) = token.filter(|t| !t.trim().is_empty()) {
            self.token = Some(token);
        }
        self
    }
}
