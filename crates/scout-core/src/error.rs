//! Error types for Sales Scout.

use std::time::Duration;
use thiserror::Error;

use crate::Capability;

/// Backend errors - surfaced to the run log.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Search backend failed.
    #[error("Search error: {0}")]
    Search(String),

    /// Search did not finish in time.
    #[error("Search timeout after {duration:?}")]
    Timeout { duration: Duration },

    /// Backend unavailable (e.g., not initialized).
    #[error("Search backend unavailable")]
    Unavailable,
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No config directory found.
    #[error("Config directory not found")]
    NoConfigDir,

    /// IO error.
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Invalid keybinding.
    #[error("Invalid keybinding: {0}")]
    InvalidKeybinding(String),
}

/// Errors returned by controller operations.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// The capability exists in the UI but has no implementation.
    #[error("{0} is not implemented yet")]
    Unimplemented(Capability),

    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
