//! Settings error types.

use thiserror::Error;

/// Errors from loading or parsing settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),

    /// The settings file is not valid JSON (or not the expected shape).
    #[error("failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The home directory could not be resolved.
    #[error("could not resolve home directory")]
    NoHome,
}

/// Crate-local result alias.
pub type Result<T> = std::result::Result<T, SettingsError>;
