//! Admin moderation console for the job portal: approve or reject job
//! postings and company registrations against the portal's REST backend.

pub mod admin_cli;
pub mod auth;
pub mod core;
pub mod environment;
pub mod moderation;
pub mod types;
pub mod utils;

pub use crate::core::{AdminApiClient, ApiError, ConfigManager, ModerationApi};
pub use crate::moderation::{BoardOptions, CompanyQueue, ModerationAction, ModerationBoard};

/// Log through `tracing` with the level as the first token:
/// `app_log!(info, "Fetched {} jobs", n)`.
#[macro_export]
macro_rules! app_log {
    ($level:ident, $($arg:tt)+) => {
        ::tracing::$level!($($arg)+)
    };
}
