//! Configuration types.
//!
//! All configuration lives in an optional `config.toml`. Every section falls
//! back to its defaults, so an absent or partial file is fine.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::ConfigError;

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "SALES_SCOUT_CONFIG";

/// Runtime configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Simulated search settings
    #[serde(default)]
    pub search: SearchConfig,

    /// Appearance settings
    #[serde(default)]
    pub appearance: AppearanceConfig,

    /// Window settings
    #[serde(default)]
    pub window: WindowConfig,

    /// User keybindings, applied after the defaults.
    #[serde(default)]
    pub keybindings: Vec<KeybindingConfig>,
}

impl AppConfig {
    /// Load configuration from a file.
    ///
    /// A missing file yields the defaults. An unreadable or malformed file is an error.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(format!("{}: {}", path.display(), e)))?;
        let config: Self = toml::from_str(&text).map_err(|e| ConfigError::Parse(e.to_string()))?;

        for binding in &config.keybindings {
            binding.validate()?;
        }

        Ok(config)
    }

    /// Load configuration from the default location, falling back to defaults on error.
    pub fn load() -> Self {
        let Some(path) = config_path() else {
            tracing::warn!("{} - using default configuration", ConfigError::NoConfigDir);
            return Self::default();
        };

        if !path.exists() {
            tracing::info!(
                "No config file at {} - using default configuration",
                path.display()
            );
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(config) => {
                tracing::info!("Configuration loaded from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("{} - using default configuration", e);
                Self::default()
            }
        }
    }
}

/// Simulated search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Delay before the simulated results arrive, in milliseconds.
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_delay_ms() -> u64 {
    800
}

impl SearchConfig {
    /// The delay as a Duration.
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.delay_ms)
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
        }
    }
}

/// Appearance configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppearanceConfig {
    /// Theme mode: "light", "dark", or "system"
    #[serde(default)]
    pub theme: ThemeMode,

    /// Accent hue in degrees (0-360). Indigo by default.
    #[serde(default = "default_accent_hue")]
    pub accent_hue: f32,
}

fn default_accent_hue() -> f32 {
    239.0
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            theme: ThemeMode::default(),
            accent_hue: default_accent_hue(),
        }
    }
}

/// Theme mode selection.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

/// Window configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    #[serde(default = "default_width")]
    pub width: f32,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_width() -> f32 {
    1100.0
}

fn default_height() -> f32 {
    760.0
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

/// A user keybinding, e.g. `{ key = "cmd+enter", action = "find_companies" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct KeybindingConfig {
    /// Keystroke, "ctrl+n" or "ctrl-n" style.
    pub key: String,

    /// Built-in action name.
    pub action: String,

    /// Key context the binding applies in. Defaults to the panel.
    #[serde(default)]
    pub context: Option<String>,
}

impl KeybindingConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.key.trim().is_empty() {
            return Err(ConfigError::InvalidKeybinding(format!(
                "empty key for action '{}'",
                self.action
            )));
        }
        if self.action.trim().is_empty() {
            return Err(ConfigError::InvalidKeybinding(format!(
                "empty action for key '{}'",
                self.key
            )));
        }
        Ok(())
    }
}

/// Get the config directory path.
pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("sales-scout"))
}

/// Get the path to config.toml, honoring `SALES_SCOUT_CONFIG`.
pub fn config_path() -> Option<PathBuf> {
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        return Some(PathBuf::from(path));
    }
    config_dir().map(|p| p.join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load_from(&dir.path().join("config.toml")).unwrap();

        assert_eq!(config.search.delay_ms, 800);
        assert_eq!(config.search.delay(), Duration::from_millis(800));
        assert_eq!(config.appearance.theme, ThemeMode::System);
        assert!(config.keybindings.is_empty());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let file = write_config(
            r#"
            [appearance]
            theme = "dark"
            "#,
        );
        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.appearance.theme, ThemeMode::Dark);
        assert!((config.appearance.accent_hue - 239.0).abs() < 0.001);
        assert_eq!(config.search.delay_ms, 800);
        assert!((config.window.width - 1100.0).abs() < 0.001);
    }

    #[test]
    fn test_full_file() {
        let file = write_config(
            r#"
            [search]
            delay_ms = 50

            [window]
            width = 900.0
            height = 600.0

            [[keybindings]]
            key = "ctrl+enter"
            action = "find_companies"
            context = "ScoutPanel"
            "#,
        );
        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.search.delay(), Duration::from_millis(50));
        assert_eq!(config.keybindings.len(), 1);
        assert_eq!(config.keybindings[0].action, "find_companies");
        assert_eq!(config.keybindings[0].context.as_deref(), Some("ScoutPanel"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let file = write_config("[search\ndelay_ms = ");
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_empty_keybinding_rejected() {
        let file = write_config(
            r#"
            [[keybindings]]
            key = ""
            action = "find_companies"
            "#,
        );
        let err = AppConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidKeybinding(_)));
    }

    #[test]
    fn test_load_honors_env_override() {
        // Only this test may touch CONFIG_ENV_VAR.
        let valid = write_config(
            r#"
            [search]
            delay_ms = 50
            "#,
        );
        std::env::set_var(CONFIG_ENV_VAR, valid.path());
        assert_eq!(config_path().as_deref(), Some(valid.path()));
        assert_eq!(AppConfig::load().search.delay_ms, 50);

        let malformed = write_config("[search\ndelay_ms = ");
        std::env::set_var(CONFIG_ENV_VAR, malformed.path());
        let config = AppConfig::load();
        assert_eq!(config.search.delay_ms, 800);
        assert_eq!(config.appearance.theme, ThemeMode::System);

        let dir = tempfile::tempdir().unwrap();
        std::env::set_var(CONFIG_ENV_VAR, dir.path().join("absent.toml"));
        assert_eq!(AppConfig::load().search.delay_ms, 800);

        std::env::remove_var(CONFIG_ENV_VAR);
    }
}
