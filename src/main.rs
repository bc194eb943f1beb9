use anyhow::{Context, Result};
use clap::Parser;
use job_moderation::admin_cli::{handle_admin_command, AdminCli};
use job_moderation::app_log;
use job_moderation::ConfigManager;
use std::fs::OpenOptions;

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = AdminCli::parse();

    // Initialize logging first
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true) // Clear file on startup
        .open(&cli.log_file)
        .with_context(|| format!("Failed to open log file {}", cli.log_file.display()))?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .json()
                .with_writer(file)
                .with_current_span(false)
                .with_span_list(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let manager = ConfigManager::load()?;
    app_log!(info, "Environment: {}", manager.environment);

    let mut api = manager.api.with_token(cli.token);
    if let Some(url) = cli.api_url {
        api.base_url = url;
    }

    handle_admin_command(cli.command, api).await
}
