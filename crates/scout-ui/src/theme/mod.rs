//! Theme system for Sales Scout.
//!
//! Two layers:
//! - `ThemeSettings`: preferences taken from `[appearance]` in the config
//! - `Theme`: computed colors derived from settings + system appearance

use gpui::{hsla, px, App, Global, Hsla, Pixels, SharedString, Window, WindowAppearance};
use scout_core::{AppearanceConfig, ThemeMode};

// =============================================================================
// Theme Settings
// =============================================================================

/// User-configurable theme settings.
#[derive(Debug, Clone)]
pub struct ThemeSettings {
    /// Light, dark, or follow system.
    pub appearance: Appearance,
    /// Accent hue (0.0-1.0). Default is indigo (239/360).
    pub accent_hue: f32,
    /// Main font family.
    pub font_family: SharedString,
    /// Base font size.
    pub font_size: Pixels,
}

impl ThemeSettings {
    /// Build settings from the `[appearance]` config section.
    ///
    /// The config stores the hue in degrees; it is wrapped into 0.0-1.0 here.
    pub fn from_config(config: &AppearanceConfig) -> Self {
        Self {
            appearance: config.theme.into(),
            accent_hue: config.accent_hue.rem_euclid(360.0) / 360.0,
            ..Default::default()
        }
    }
}

impl Default for ThemeSettings {
    fn default() -> Self {
        Self {
            appearance: Appearance::System,
            accent_hue: 239.0 / 360.0,
            font_family: "Inter".into(),
            font_size: px(14.0),
        }
    }
}

impl Global for ThemeSettings {}

/// Appearance mode preference.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
    #[default]
    System,
}

impl From<ThemeMode> for Appearance {
    fn from(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Light => Appearance::Light,
            ThemeMode::Dark => Appearance::Dark,
            ThemeMode::System => Appearance::System,
        }
    }
}

// =============================================================================
// Theme (Computed)
// =============================================================================

/// The active theme with computed colors.
///
/// Access via `cx.theme()` in render methods.
#[derive(Debug, Clone)]
pub struct Theme {
    pub is_dark: bool,

    // -------------------------------------------------------------------------
    // Backgrounds
    // -------------------------------------------------------------------------
    /// Window background behind the cards.
    pub background: Hsla,
    /// Card surface.
    pub surface: Hsla,
    /// Inputs and list rows inside a card.
    pub surface_inset: Hsla,
    /// Surface when hovered.
    pub surface_hover: Hsla,

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------
    pub text: Hsla,
    pub text_muted: Hsla,
    pub text_placeholder: Hsla,
    /// Text drawn on top of `accent`.
    pub text_on_accent: Hsla,

    // -------------------------------------------------------------------------
    // Interactive
    // -------------------------------------------------------------------------
    /// Text selection background.
    pub selection: Hsla,
    /// Primary buttons, cursor, focus rings.
    pub accent: Hsla,
    pub accent_hover: Hsla,
    /// Background of the heuristics chip.
    pub chip: Hsla,

    // -------------------------------------------------------------------------
    // Semantic
    // -------------------------------------------------------------------------
    /// Dev test bullets.
    pub success: Hsla,

    // -------------------------------------------------------------------------
    // Borders
    // -------------------------------------------------------------------------
    pub border: Hsla,
    pub border_focused: Hsla,

    // -------------------------------------------------------------------------
    // Typography
    // -------------------------------------------------------------------------
    pub font_family: SharedString,
    pub font_size: Pixels,
    /// Captions, log details, field labels.
    pub font_size_small: Pixels,
    /// Card titles.
    pub font_size_large: Pixels,
    /// Page title.
    pub font_size_title: Pixels,

    // -------------------------------------------------------------------------
    // Spacing
    // -------------------------------------------------------------------------
    /// Card corner radius.
    pub radius: Pixels,
    /// Input and button corner radius.
    pub radius_small: Pixels,
    /// Max width of the page content.
    pub content_width: Pixels,
    /// Width of the run log / dev tests column.
    pub side_column_width: Pixels,
}

impl Theme {
    /// Create a theme from settings and system appearance.
    pub fn from_settings(settings: &ThemeSettings, system_is_dark: bool) -> Self {
        let is_dark = match settings.appearance {
            Appearance::Dark => true,
            Appearance::Light => false,
            Appearance::System => system_is_dark,
        };

        let palette = if is_dark {
            Palette::dark(settings.accent_hue)
        } else {
            Palette::light(settings.accent_hue)
        };

        let base_size: f32 = settings.font_size.into();

        Self {
            is_dark,

            background: palette.bg_base,
            surface: palette.bg_card,
            surface_inset: palette.bg_inset,
            surface_hover: palette.bg_hover,

            text: palette.fg_primary,
            text_muted: palette.fg_secondary,
            text_placeholder: palette.fg_tertiary,
            text_on_accent: hsla(0.0, 0.0, 1.0, 1.0),

            selection: palette.accent.with_alpha(if is_dark { 0.35 } else { 0.2 }),
            accent: palette.accent,
            accent_hover: palette.accent_hover,
            chip: palette.accent.with_alpha(0.12),

            success: palette.success,

            border: palette.border,
            border_focused: palette.accent,

            font_family: settings.font_family.clone(),
            font_size: settings.font_size,
            font_size_small: px(base_size - 2.0),
            font_size_large: px(base_size + 2.0),
            font_size_title: px(base_size + 10.0),

            radius: px(16.0),
            radius_small: px(8.0),
            content_width: px(1024.0),
            side_column_width: px(340.0),
        }
    }

}

impl Global for Theme {}

/// Recompute the global `Theme` from `ThemeSettings` and the window's appearance.
pub fn sync_theme(window: &Window, cx: &mut App) {
    let system_is_dark = matches!(
        window.appearance(),
        WindowAppearance::Dark | WindowAppearance::VibrantDark
    );
    let theme = match cx.try_global::<ThemeSettings>() {
        Some(settings) => Theme::from_settings(settings, system_is_dark),
        None => Theme::from_settings(&ThemeSettings::default(), system_is_dark),
    };
    cx.set_global(theme);
}

// =============================================================================
// Palette (Internal)
// =============================================================================

struct Palette {
    bg_base: Hsla,
    bg_card: Hsla,
    bg_inset: Hsla,
    bg_hover: Hsla,
    fg_primary: Hsla,
    fg_secondary: Hsla,
    fg_tertiary: Hsla,
    accent: Hsla,
    accent_hover: Hsla,
    border: Hsla,
    success: Hsla,
}

impl Palette {
    fn dark(accent_hue: f32) -> Self {
        Self {
            bg_base: hsla(222.0 / 360.0, 0.25, 0.08, 1.0),
            bg_card: hsla(222.0 / 360.0, 0.20, 0.12, 1.0),
            bg_inset: hsla(0.0, 0.0, 1.0, 0.05),
            bg_hover: hsla(0.0, 0.0, 1.0, 0.10),
            fg_primary: hsla(0.0, 0.0, 0.95, 1.0),
            fg_secondary: hsla(220.0 / 360.0, 0.10, 0.65, 1.0),
            fg_tertiary: hsla(220.0 / 360.0, 0.08, 0.45, 1.0),
            accent: hsla(accent_hue, 0.75, 0.62, 1.0),
            accent_hover: hsla(accent_hue, 0.75, 0.68, 1.0),
            border: hsla(0.0, 0.0, 1.0, 0.12),
            success: hsla(142.0 / 360.0, 0.65, 0.50, 1.0),
        }
    }

    fn light(accent_hue: f32) -> Self {
        Self {
            bg_base: hsla(210.0 / 360.0, 0.40, 0.98, 1.0),
            bg_card: hsla(0.0, 0.0, 1.0, 1.0),
            bg_inset: hsla(0.0, 0.0, 0.0, 0.03),
            bg_hover: hsla(0.0, 0.0, 0.0, 0.06),
            fg_primary: hsla(222.0 / 360.0, 0.47, 0.11, 1.0),
            fg_secondary: hsla(215.0 / 360.0, 0.16, 0.47, 1.0),
            fg_tertiary: hsla(215.0 / 360.0, 0.14, 0.65, 1.0),
            accent: hsla(accent_hue, 0.84, 0.60, 1.0),
            accent_hover: hsla(accent_hue, 0.84, 0.54, 1.0),
            border: hsla(214.0 / 360.0, 0.32, 0.91, 1.0),
            success: hsla(142.0 / 360.0, 0.70, 0.40, 1.0),
        }
    }
}

// =============================================================================
// Extensions
// =============================================================================

trait HslaExt {
    fn with_alpha(self, a: f32) -> Hsla;
}

impl HslaExt for Hsla {
    fn with_alpha(self, a: f32) -> Hsla {
        Hsla { a, ..self }
    }
}

/// Convenient theme access from any `App`.
pub trait ThemeExt {
    fn theme(&self) -> &Theme;
}

impl ThemeExt for App {
    fn theme(&self) -> &Theme {
        self.global::<Theme>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = ThemeSettings::default();
        assert_eq!(settings.appearance, Appearance::System);
        assert!((settings.accent_hue - 239.0 / 360.0).abs() < 0.001);
    }

    #[test]
    fn test_from_config_converts_degrees() {
        let config = AppearanceConfig {
            theme: ThemeMode::Dark,
            accent_hue: 180.0,
        };
        let settings = ThemeSettings::from_config(&config);
        assert_eq!(settings.appearance, Appearance::Dark);
        assert!((settings.accent_hue - 0.5).abs() < 0.001);
    }

    #[test]
    fn test_from_config_wraps_hue() {
        let config = AppearanceConfig {
            theme: ThemeMode::System,
            accent_hue: 450.0,
        };
        let settings = ThemeSettings::from_config(&config);
        assert!((settings.accent_hue - 0.25).abs() < 0.001);

        let config = AppearanceConfig {
            accent_hue: -90.0,
            ..config
        };
        let settings = ThemeSettings::from_config(&config);
        assert!((settings.accent_hue - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_appearance_override() {
        let settings = ThemeSettings {
            appearance: Appearance::Dark,
            ..Default::default()
        };
        assert!(Theme::from_settings(&settings, false).is_dark);

        let settings = ThemeSettings {
            appearance: Appearance::Light,
            ..Default::default()
        };
        assert!(!Theme::from_settings(&settings, true).is_dark);
    }

    #[test]
    fn test_system_appearance_follows_platform() {
        let settings = ThemeSettings::default();
        assert!(Theme::from_settings(&settings, true).is_dark);
        assert!(!Theme::from_settings(&settings, false).is_dark);
    }

    #[test]
    fn test_accent_drives_focus_and_chip() {
        let settings = ThemeSettings {
            accent_hue: 0.0,
            ..Default::default()
        };
        let theme = Theme::from_settings(&settings, false);
        assert!((theme.accent.h - 0.0).abs() < 0.001);
        assert!((theme.border_focused.h - 0.0).abs() < 0.001);
        assert!((theme.chip.h - 0.0).abs() < 0.001);
        assert!(theme.chip.a < theme.accent.a);
    }

    #[test]
    fn test_font_size_derivation() {
        let settings = ThemeSettings {
            font_size: px(16.0),
            ..Default::default()
        };
        let theme = Theme::from_settings(&settings, true);
        let small: f32 = theme.font_size_small.into();
        let large: f32 = theme.font_size_large.into();
        let title: f32 = theme.font_size_title.into();

        assert!((small - 14.0).abs() < 0.001);
        assert!((large - 18.0).abs() < 0.001);
        assert!((title - 26.0).abs() < 0.001);
    }
}
