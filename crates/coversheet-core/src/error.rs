//! Error types for the cover-sheet core

use thiserror::Error;

/// Errors that can occur while building cover-sheet state
#[derive(Error, Debug)]
pub enum CoreError {
    /// Colour string is not `#rrggbb` or `#rgb`
    #[error("Invalid color '{0}': expected #rrggbb or #rgb")]
    InvalidColor(String),

    /// Inline image representation could not be decoded
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),

    /// Base64 payload of a data URL is malformed
    #[error("Base64 decode error: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Form settings file is not valid TOML for the expected schema
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] toml::de::Error),

    /// Form settings could not be serialized
    #[error("Settings serialize error: {0}")]
    SettingsSerialize(#[from] toml::ser::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
