//! Centralized actions for Sales Scout.
//!
//! This module defines all GPUI actions used by the panel and its fields.
//! Actions are dispatched by GPUI's key binding system.

use gpui::actions;

// =============================================================================
// Panel Actions
// =============================================================================

actions!(
    scout,
    [
        FindCompanies,
        CancelSearch,
        ExportCsv,
        FocusNext,
        FocusPrevious,
    ]
);

// =============================================================================
// Text Editing Actions
// =============================================================================

actions!(
    scout,
    [
        Backspace,
        Delete,
        MoveLeft,
        MoveRight,
        SelectLeft,
        SelectRight,
        TextSelectAll,
        Home,
        End,
        Copy,
        Paste,
        Cut,
        Submit,
    ]
);

// =============================================================================
// Action Lookup
// =============================================================================

/// Look up an action by name for GPUI registration.
///
/// Returns a boxed action that can be used with `cx.bind_keys()`.
pub fn action_from_name(name: &str) -> Option<Box<dyn gpui::Action>> {
    match name {
        // Panel
        "find_companies" => Some(Box::new(FindCompanies)),
        "cancel_search" => Some(Box::new(CancelSearch)),
        "export_csv" => Some(Box::new(ExportCsv)),
        "focus_next" => Some(Box::new(FocusNext)),
        "focus_previous" => Some(Box::new(FocusPrevious)),

        // Text editing
        "backspace" => Some(Box::new(Backspace)),
        "delete" => Some(Box::new(Delete)),
        "move_left" => Some(Box::new(MoveLeft)),
        "move_right" => Some(Box::new(MoveRight)),
        "select_left" => Some(Box::new(SelectLeft)),
        "select_right" => Some(Box::new(SelectRight)),
        "text_select_all" => Some(Box::new(TextSelectAll)),
        "home" => Some(Box::new(Home)),
        "end" => Some(Box::new(End)),
        "copy" => Some(Box::new(Copy)),
        "paste" => Some(Box::new(Paste)),
        "cut" => Some(Box::new(Cut)),
        "submit" => Some(Box::new(Submit)),

        _ => None,
    }
}

/// Get all available action names.
pub fn available_actions() -> &'static [&'static str] {
    &[
        // Panel
        "find_companies",
        "cancel_search",
        "export_csv",
        "focus_next",
        "focus_previous",
        // Text editing
        "backspace",
        "delete",
        "move_left",
        "move_right",
        "select_left",
        "select_right",
        "text_select_all",
        "home",
        "end",
        "copy",
        "paste",
        "cut",
        "submit",
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_from_name() {
        assert!(action_from_name("find_companies").is_some());
        assert!(action_from_name("submit").is_some());
        assert!(action_from_name("unknown_action").is_none());
    }

    #[test]
    fn test_every_available_action_resolves() {
        for name in available_actions() {
            assert!(action_from_name(name).is_some(), "unresolved: {}", name);
        }
    }
}
