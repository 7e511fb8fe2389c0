//! GPUI keybinding registration.
//!
//! `apply_keybindings()` registers the built-in defaults followed by the
//! `[[keybindings]]` entries from the config.
//!
//! ## Binding Order
//!
//! GPUI uses last-wins semantics: later bindings override earlier ones at the
//! same context depth. Defaults go first, so user bindings take precedence.

use std::rc::Rc;

#[cfg(test)]
use gpui::Keystroke;
use gpui::{App, DummyKeyboardMapper, KeyBinding, KeyBindingContextPredicate};

use scout_core::KeybindingConfig;

use crate::actions::action_from_name;

/// Key context of the scout panel (the default for user bindings).
pub const PANEL_CONTEXT: &str = "ScoutPanel";

/// Key context of a single-line text field.
pub const TEXT_FIELD_CONTEXT: &str = "TextField";

// =============================================================================
// Default Bindings
// =============================================================================

fn binding(key: &str, action: &str, context: &str) -> KeybindingConfig {
    KeybindingConfig {
        key: key.to_string(),
        action: action.to_string(),
        context: Some(context.to_string()),
    }
}

/// Built-in bindings, registered before any user bindings.
///
/// Platform shortcuts come in `cmd` and `ctrl` flavors.
pub fn default_bindings() -> Vec<KeybindingConfig> {
    let mut bindings = vec![
        // Panel
        binding("escape", "cancel_search", PANEL_CONTEXT),
        binding("tab", "focus_next", PANEL_CONTEXT),
        binding("shift+tab", "focus_previous", PANEL_CONTEXT),
        // Text editing
        binding("enter", "submit", TEXT_FIELD_CONTEXT),
        binding("backspace", "backspace", TEXT_FIELD_CONTEXT),
        binding("delete", "delete", TEXT_FIELD_CONTEXT),
        binding("left", "move_left", TEXT_FIELD_CONTEXT),
        binding("right", "move_right", TEXT_FIELD_CONTEXT),
        binding("shift+left", "select_left", TEXT_FIELD_CONTEXT),
        binding("shift+right", "select_right", TEXT_FIELD_CONTEXT),
        binding("home", "home", TEXT_FIELD_CONTEXT),
        binding("end", "end", TEXT_FIELD_CONTEXT),
    ];

    for modifier in ["cmd", "ctrl"] {
        bindings.extend([
            binding(
                &format!("{}+enter", modifier),
                "find_companies",
                PANEL_CONTEXT,
            ),
            binding(
                &format!("{}+a", modifier),
                "text_select_all",
                TEXT_FIELD_CONTEXT,
            ),
            binding(&format!("{}+c", modifier), "copy", TEXT_FIELD_CONTEXT),
            binding(&format!("{}+v", modifier), "paste", TEXT_FIELD_CONTEXT),
            binding(&format!("{}+x", modifier), "cut", TEXT_FIELD_CONTEXT),
        ]);
    }

    bindings
}

// =============================================================================
// Keystroke Parsing
// =============================================================================

/// Convert user-friendly keystroke to GPUI format.
///
/// Users write: "ctrl+n" or "cmd+shift+z"
/// GPUI expects: "ctrl-n" or "cmd-shift-z"
fn normalize_keystroke(s: &str) -> String {
    s.trim().replace('+', "-")
}

#[cfg(test)]
fn parse_keystroke(s: &str) -> Result<Keystroke, String> {
    let normalized = normalize_keystroke(s);
    Keystroke::parse(&normalized).map_err(|e| format!("Invalid keystroke '{}': {:?}", s, e))
}

// =============================================================================
// Context Building
// =============================================================================

/// Build a GPUI context predicate; no context means the panel.
fn build_context_predicate(context: Option<&str>) -> Option<Rc<KeyBindingContextPredicate>> {
    let context = context
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(PANEL_CONTEXT);

    KeyBindingContextPredicate::parse(context).ok().map(Rc::new)
}

// =============================================================================
// Apply Keybindings
// =============================================================================

/// Register the defaults, then `user` bindings, with GPUI.
///
/// Invalid entries are logged and skipped.
pub fn apply_keybindings(user: &[KeybindingConfig], cx: &mut App) {
    let defaults = default_bindings();
    let registered = defaults
        .iter()
        .chain(user)
        .filter(|config| apply_binding(config, cx))
        .count();

    tracing::debug!(
        "Registered {} keybindings ({} from config)",
        registered,
        user.len()
    );
}

/// Register a single binding. Returns `false` if it was skipped.
fn apply_binding(config: &KeybindingConfig, cx: &mut App) -> bool {
    let Some(action) = action_from_name(&config.action) else {
        tracing::warn!("Unknown action '{}' for key '{}'", config.action, config.key);
        return false;
    };

    let context_predicate = build_context_predicate(config.context.as_deref());
    let keystroke = normalize_keystroke(&config.key);

    match KeyBinding::load(
        &keystroke,
        action,
        context_predicate,
        false, // use_key_equivalents
        None,  // action_input
        &DummyKeyboardMapper,
    ) {
        Ok(binding) => {
            cx.bind_keys([binding]);
            tracing::trace!(
                "Registered binding: {} -> {} (context: {:?})",
                config.key,
                config.action,
                config.context
            );
            true
        }
        Err(e) => {
            tracing::warn!("Failed to create binding for '{}': {:?}", config.key, e);
            false
        }
    }
}
