//! Small stateless building blocks shared by the panel sections.

use gpui::{div, prelude::*, Div, ElementId, FontWeight, SharedString, Stateful};

use crate::theme::Theme;

/// Visual weight of a button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonVariant {
    /// Filled with the accent color.
    Primary,
    /// Bordered, transparent background.
    Ghost,
    /// Tinted with the accent color.
    Subtle,
}

/// A labeled button. Callers attach `on_click` only when `enabled`.
pub fn button(
    id: impl Into<ElementId>,
    label: impl Into<SharedString>,
    variant: ButtonVariant,
    enabled: bool,
    theme: &Theme,
) -> Stateful<Div> {
    let (bg, hover_bg, fg, border) = match variant {
        ButtonVariant::Primary => (
            theme.accent,
            theme.accent_hover,
            theme.text_on_accent,
            theme.accent,
        ),
        ButtonVariant::Ghost => (
            gpui::transparent_black(),
            theme.surface_hover,
            theme.text,
            theme.border,
        ),
        ButtonVariant::Subtle => (theme.chip, theme.selection, theme.accent, theme.chip),
    };

    div()
        .id(id)
        .flex()
        .items_center()
        .justify_center()
        .px_4()
        .py_2()
        .rounded(theme.radius_small)
        .border_1()
        .border_color(border)
        .bg(bg)
        .text_color(fg)
        .text_size(theme.font_size)
        .font_weight(FontWeight::MEDIUM)
        .child(label.into())
        .when(enabled, |this| {
            this.cursor_pointer().hover(move |style| style.bg(hover_bg))
        })
        .when(!enabled, |this| this.opacity(0.5))
}

/// A rounded, bordered section container.
pub fn card(theme: &Theme) -> Div {
    div()
        .w_full()
        .flex()
        .flex_col()
        .gap_3()
        .p_4()
        .bg(theme.surface)
        .rounded(theme.radius)
        .border_1()
        .border_color(theme.border)
}

/// Card heading.
pub fn card_title(title: impl Into<SharedString>, theme: &Theme) -> Div {
    div()
        .text_size(theme.font_size_large)
        .font_weight(FontWeight::SEMIBOLD)
        .text_color(theme.text)
        .child(title.into())
}

/// Muted single-line text, used for empty states and captions.
pub fn muted(text: impl Into<SharedString>, theme: &Theme) -> Div {
    div()
        .text_size(theme.font_size_small)
        .text_color(theme.text_muted)
        .child(text.into())
}

/// Pill-shaped label.
pub fn chip(text: impl Into<SharedString>, theme: &Theme) -> Div {
    div()
        .px_3()
        .py_1()
        .rounded_full()
        .bg(theme.chip)
        .text_size(theme.font_size_small)
        .text_color(theme.accent)
        .child(text.into())
}
