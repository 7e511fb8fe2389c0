//! Window management for Sales Scout.
//!
//! `ScoutWindow` owns the single application window. `run_app` is the GPUI
//! entry point.

use std::sync::Arc;

use gpui::{
    px, size, App, AppContext, Bounds, TitlebarOptions, WindowBounds, WindowHandle, WindowKind,
    WindowOptions,
};
use scout_agent::SearchController;
use scout_core::{AppConfig, WindowConfig};
use tokio::runtime::Handle;

use crate::keymap::apply_keybindings;
use crate::theme::{sync_theme, ThemeSettings};
use crate::views::ScoutPanel;

// =============================================================================
// Window Configuration
// =============================================================================

pub const WINDOW_TITLE: &str = "AI Sales Scout — Preview";

/// Minimum window size; the layout stops adapting below this.
pub const MIN_WIDTH: f32 = 720.0;
pub const MIN_HEIGHT: f32 = 480.0;

fn create_window_options() -> WindowOptions {
    WindowOptions {
        window_bounds: None, // Set via Bounds::centered once App is available
        titlebar: Some(TitlebarOptions {
            title: Some(WINDOW_TITLE.into()),
            ..Default::default()
        }),
        focus: true,
        show: true,
        kind: WindowKind::Normal,
        is_movable: true,
        window_min_size: Some(size(px(MIN_WIDTH), px(MIN_HEIGHT))),
        ..Default::default()
    }
}

/// Configured size, clamped to the minimum.
fn window_size(config: &WindowConfig) -> (f32, f32) {
    (config.width.max(MIN_WIDTH), config.height.max(MIN_HEIGHT))
}

// =============================================================================
// Scout Window
// =============================================================================

/// The application window and its root panel.
pub struct ScoutWindow {
    window_handle: WindowHandle<ScoutPanel>,
}

impl ScoutWindow {
    /// Open the window with a fresh `ScoutPanel` and focus the first field.
    ///
    /// Returns `None` if the window couldn't be created.
    pub fn new(
        config: &WindowConfig,
        controller: Arc<SearchController>,
        runtime: Handle,
        cx: &mut App,
    ) -> Option<Self> {
        let (width, height) = window_size(config);
        let bounds = Bounds::centered(None, size(px(width), px(height)), cx);
        let options = WindowOptions {
            window_bounds: Some(WindowBounds::Windowed(bounds)),
            ..create_window_options()
        };

        let window_handle = match cx.open_window(options, |window, cx| {
            sync_theme(window, cx);

            let panel = cx.new(|cx| ScoutPanel::new(controller, runtime, window, cx));
            panel.update(cx, |panel, cx| panel.focus_first_field(window, cx));
            panel
        }) {
            Ok(handle) => handle,
            Err(e) => {
                tracing::error!("Failed to open window: {}", e);
                return None;
            }
        };

        Some(Self { window_handle })
    }

    /// Bring the window to the front.
    pub fn activate(&self, cx: &mut App) {
        let _ = self.window_handle.update(cx, |_panel, window, _cx| {
            window.activate_window();
        });
    }
}

impl gpui::Global for ScoutWindow {}

// =============================================================================
// App Entry Point
// =============================================================================

/// Run the GPUI application until the window is closed.
///
/// 1. Initializes gpui-component
/// 2. Registers keybindings (defaults + config)
/// 3. Installs theme settings from `[appearance]`
/// 4. Opens the window
pub fn run_app(config: AppConfig, controller: Arc<SearchController>, runtime: Handle) {
    gpui::Application::new().run(move |cx: &mut App| {
        gpui_component::init(cx);

        apply_keybindings(&config.keybindings, cx);
        cx.set_global(ThemeSettings::from_config(&config.appearance));

        let Some(window) = ScoutWindow::new(&config.window, controller, runtime, cx) else {
            cx.quit();
            return;
        };
        window.activate(cx);
        cx.set_global(window);

        cx.on_window_closed(|cx| {
            if cx.windows().is_empty() {
                tracing::info!("Window closed, quitting");
                cx.quit();
            }
        })
        .detach();
    });
}
