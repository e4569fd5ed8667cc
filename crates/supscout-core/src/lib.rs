//! Shared types and configuration for the supplier scout workspace.

pub mod app_config;
pub mod config;
pub mod suppliers;

pub use app_config::{AppConfig, Environment, FetchSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use suppliers::{Candidate, Contacts, EnrichedSupplier};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
