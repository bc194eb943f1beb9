// src/core/mod.rs
//! Configuration, errors and the HTTP client shared by the workflow and the CLI

pub mod config_manager;
pub mod error;
pub mod service_client;

pub use config_manager::{ApiConfig, ConfigManager};
pub use error::{ApiError, ApiResult};
pub use service_client::{AdminApiClient, ModerationApi};
