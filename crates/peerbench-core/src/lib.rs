use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod defaults;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use defaults::{IndustryAverages, IndustryDefaults};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required env var: {0}")]
    MissingEnvVar(String),
    #[error("invalid env var {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
    #[error("failed to read defaults file '{path}': {source}")]
    DefaultsFileIo {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse defaults file '{path}': {source}")]
    DefaultsFileParse {
        path: String,
        source: serde_yaml::Error,
    },
    #[error("invalid defaults file: {0}")]
    Validation(String),
}
