//! GPUI frontend for Sales Scout.
//!
//! This crate provides the native GPUI user interface including:
//! - ScoutWindow for window management
//! - ScoutPanel for UI composition
//! - TextField and the GPUI-independent EditBuffer behind it
//! - Configurable keybindings

pub mod actions;
pub mod keymap;
pub mod model;
pub mod theme;
pub mod views;
pub mod window;

// Re-export commonly used types
pub use model::EditBuffer;
pub use theme::{sync_theme, Appearance, Theme, ThemeExt, ThemeSettings};
pub use views::{ScoutPanel, TextField, TextFieldEvent};
pub use window::{run_app, ScoutWindow};
