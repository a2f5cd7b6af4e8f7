//! Errors raised while setting up the mock robot.

use std::path::PathBuf;

use mwb_core::utils::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid JSON in {}: {source}", path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("invalid drive configuration: {0:?}")]
    Config(ConfigError),

    #[error("teleop segment {0} runs for zero cycles")]
    EmptySegment(usize),
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e)
    }
}
