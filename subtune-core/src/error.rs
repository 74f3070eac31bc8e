use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // Configuration errors
    #[error("Config file not found at {path}. A template has been created with the default settings.")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid config: {message}")]
    ConfigInvalid { message: String },

    #[error("Failed to parse config file: {0}")]
    ConfigParseError(#[from] toml::de::Error),

    // Font errors
    #[error("Only .ttf fonts are supported, got {path}")]
    UnsupportedFontFormat { path: PathBuf },

    #[error("Failed to read font file {path}: {source}")]
    FontReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Lyrics errors
    #[error("Failed to parse LRC: {reason}")]
    LrcParseError { reason: String },

    // IO errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CoreError>;
