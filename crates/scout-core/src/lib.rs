//! Core types for Sales Scout.
//!
//! This crate contains shared data structures that are used across all Scout crates:
//! - Search parameters and the fields that edit them
//! - Run log entries and company candidates
//! - Capability stubs for not-yet-built features
//! - Configuration types
//! - Error types

mod candidate;
mod capability;
mod config;
mod error;
mod params;
mod run_log;

pub use candidate::CompanyCandidate;
pub use capability::Capability;
pub use config::{
    config_dir, config_path, AppConfig, AppearanceConfig, KeybindingConfig, SearchConfig,
    ThemeMode, WindowConfig, CONFIG_ENV_VAR,
};
pub use error::{BackendError, ConfigError, ScoutError};
pub use params::{SearchField, SearchParameters};
pub use run_log::LogEntry;
