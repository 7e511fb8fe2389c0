//! Scout panel - the main UI composition.
//!
//! Lays out the header, the search form, the candidate list, the run log and
//! the static dev tests card.
//!
//! ## Architecture
//!
//! - `SearchController` owns the state; the panel keeps the latest snapshot
//! - Field edits are pushed to the controller as they happen
//! - The backend future runs on the tokio runtime, not the GPUI executor
//! - State changes flow back through the controller's watch channel

use std::sync::Arc;

use gpui::{
    div, prelude::*, px, App, AsyncApp, ClickEvent, Context, Entity, FocusHandle, Focusable,
    FontWeight, IntoElement, Render, ScrollHandle, WeakEntity, Window,
};
use scout_agent::{CompanyCandidate, LogEntry, ScoutState, SearchController, SearchField};
use tokio::runtime::Handle;

use crate::actions::{CancelSearch, ExportCsv, FindCompanies, FocusNext, FocusPrevious};
use crate::keymap::PANEL_CONTEXT;
use crate::theme::{sync_theme, Theme, ThemeExt};
use crate::views::widgets::{button, card, card_title, chip, muted, ButtonVariant};
use crate::views::{TextField, TextFieldEvent};

pub const TITLE: &str = "AI Sales Scout";
pub const SUBTITLE: &str = "Find likely adopters of Melexis parts and the people to contact";
pub const HEURISTICS: &str = "Heuristics: platform fit • actuator density • safety level";
pub const NO_RESULTS: &str = "No results yet. Click Find companies to begin.";
pub const NO_LOGS: &str = "No logs yet.";

const DEV_TEST_BULLETS: [&str; 3] = [
    "mockFindCompanies returns Promise ✓",
    "company objects have required fields ✓",
    "exportCSV handles empty input ✓",
];

/// Max height of the run log before it scrolls. Rows wrap, so heights vary.
const LOG_MAX_HEIGHT: f32 = 224.0;

/// Label of the search button.
pub fn search_button_label(loading: bool) -> &'static str {
    if loading {
        "Searching…"
    } else {
        "Find companies"
    }
}

/// Index of the field to focus after `current` when cycling with tab.
///
/// With nothing focused, forward starts at the first field and backward at
/// the last. Returns `None` when there are no fields.
pub fn next_field_index(current: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(match (current, forward) {
        (None, true) => 0,
        (None, false) => len - 1,
        (Some(i), true) => (i + 1) % len,
        (Some(i), false) => (i + len - 1) % len,
    })
}

// =============================================================================
// Scout Panel
// =============================================================================

pub struct ScoutPanel {
    controller: Arc<SearchController>,
    /// Runtime that drives backend futures.
    runtime: Handle,
    /// Latest snapshot from the controller.
    state: ScoutState,
    /// Form inputs in display order.
    fields: Vec<(SearchField, Entity<TextField>)>,
    focus_handle: FocusHandle,
    log_scroll: ScrollHandle,
}

impl ScoutPanel {
    pub fn new(
        controller: Arc<SearchController>,
        runtime: Handle,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let focus_handle = cx.focus_handle();
        let state = controller.snapshot();

        let fields = SearchField::ALL
            .into_iter()
            .map(|field| {
                let value = state.params.get(field).to_string();
                let input = cx.new(|cx| TextField::new(field.label(), value, window, cx));
                cx.subscribe(&input, move |this, _input, event: &TextFieldEvent, cx| {
                    this.on_field_event(field, event, cx);
                })
                .detach();
                (field, input)
            })
            .collect();

        // Subscribe to controller state changes
        let state_rx = controller.subscribe();
        cx.spawn(async move |this: WeakEntity<Self>, cx: &mut AsyncApp| {
            let mut rx = state_rx;
            while rx.changed().await.is_ok() {
                let state = rx.borrow_and_update().clone();
                if this
                    .update(cx, |this, cx| this.on_state_changed(state, cx))
                    .is_err()
                {
                    break;
                }
            }
        })
        .detach();

        cx.observe_window_appearance(window, |_this, window, cx| {
            sync_theme(window, cx);
            cx.notify();
        })
        .detach();

        Self {
            controller,
            runtime,
            state,
            fields,
            focus_handle,
            log_scroll: ScrollHandle::new(),
        }
    }

    /// Focus the first form field.
    pub fn focus_first_field(&self, window: &mut Window, cx: &mut Context<Self>) {
        if let Some((_, input)) = self.fields.first() {
            let handle = input.read(cx).focus_handle(cx);
            window.focus(&handle, cx);
        }
    }

    // -------------------------------------------------------------------------
    // Controller Integration
    // -------------------------------------------------------------------------

    fn on_state_changed(&mut self, state: ScoutState, cx: &mut Context<Self>) {
        if state.logs.len() != self.state.logs.len() {
            if let Some(last) = state.logs.len().checked_sub(1) {
                self.log_scroll.scroll_to_item(last);
            }
        }
        self.state = state;
        cx.notify();
    }

    fn start_search(&mut self, cx: &mut Context<Self>) {
        let Some(ticket) = self.controller.begin_search() else {
            return;
        };

        let controller = self.controller.clone();
        self.runtime.spawn(async move {
            controller.complete_search(ticket).await;
        });
        cx.notify();
    }

    fn export_csv(&mut self) {
        if !self.state.can_export() {
            return;
        }
        if let Err(e) = self.controller.export_csv() {
            tracing::debug!("Export CSV: {}", e);
        }
    }

    fn identify_decision_makers(&mut self, candidate: &CompanyCandidate) {
        if let Err(e) = self.controller.identify_decision_makers(candidate) {
            tracing::debug!("Identify decision makers for {}: {}", candidate.name, e);
        }
    }

    // -------------------------------------------------------------------------
    // Field Events
    // -------------------------------------------------------------------------

    fn on_field_event(&mut self, field: SearchField, event: &TextFieldEvent, cx: &mut Context<Self>) {
        match event {
            TextFieldEvent::Changed(text) => {
                self.controller.set_field(field, text.clone());
            }
            TextFieldEvent::Submit => self.start_search(cx),
        }
    }

    // -------------------------------------------------------------------------
    // Action Handlers
    // -------------------------------------------------------------------------

    fn on_find_companies(&mut self, _: &FindCompanies, _window: &mut Window, cx: &mut Context<Self>) {
        self.start_search(cx);
    }

    fn on_cancel_search(&mut self, _: &CancelSearch, _window: &mut Window, _cx: &mut Context<Self>) {
        self.controller.cancel_search();
    }

    fn on_export_csv(&mut self, _: &ExportCsv, _window: &mut Window, _cx: &mut Context<Self>) {
        self.export_csv();
    }

    fn on_focus_next(&mut self, _: &FocusNext, window: &mut Window, cx: &mut Context<Self>) {
        self.cycle_focus(true, window, cx);
    }

    fn on_focus_previous(
        &mut self,
        _: &FocusPrevious,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.cycle_focus(false, window, cx);
    }

    fn cycle_focus(&mut self, forward: bool, window: &mut Window, cx: &mut Context<Self>) {
        let current = self
            .fields
            .iter()
            .position(|(_, input)| input.read(cx).focus_handle(cx).is_focused(window));

        let Some(next) = next_field_index(current, self.fields.len(), forward) else {
            return;
        };
        let handle = self.fields[next].1.read(cx).focus_handle(cx);
        window.focus(&handle, cx);
    }

    // -------------------------------------------------------------------------
    // Render Helpers
    // -------------------------------------------------------------------------

    fn render_header(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let can_export = self.state.can_export();

        div()
            .w_full()
            .flex()
            .items_center()
            .justify_between()
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_3()
                    .child(
                        div()
                            .size(px(36.))
                            .rounded(theme.radius_small)
                            .bg(theme.accent)
                            .text_color(theme.text_on_accent)
                            .flex()
                            .items_center()
                            .justify_center()
                            .child("✦"),
                    )
                    .child(
                        div()
                            .flex()
                            .flex_col()
                            .child(
                                div()
                                    .text_size(theme.font_size_title)
                                    .font_weight(FontWeight::BOLD)
                                    .text_color(theme.text)
                                    .child(TITLE),
                            )
                            .child(muted(SUBTITLE, theme)),
                    ),
            )
            .child(
                button("export-csv", "Export CSV", ButtonVariant::Ghost, can_export, theme)
                    .when(can_export, |this| {
                        this.on_click(cx.listener(|this, _: &ClickEvent, _window, _cx| {
                            this.export_csv();
                        }))
                    }),
            )
    }

    fn render_field(&self, field: SearchField, input: &Entity<TextField>, theme: &Theme) -> gpui::Div {
        div()
            .flex()
            .flex_col()
            .gap_1()
            .child(
                div()
                    .text_size(theme.font_size_small)
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(theme.text_muted)
                    .child(field.label()),
            )
            .child(input.clone())
    }

    fn render_controls(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let loading = self.state.loading;
        let can_search = self.state.can_search();

        // Three fields per row; the last row stretches
        let rows = self.fields.chunks(3).map(|row| {
            div().w_full().flex().gap_4().children(
                row.iter()
                    .map(|(field, input)| self.render_field(*field, input, theme).flex_1()),
            )
        });

        card(theme)
            .gap_4()
            .children(rows)
            .child(
                div()
                    .flex()
                    .items_center()
                    .gap_2()
                    .child(
                        button(
                            "find-companies",
                            search_button_label(loading),
                            ButtonVariant::Primary,
                            can_search,
                            theme,
                        )
                        .when(can_search, |this| {
                            this.on_click(cx.listener(|this, _: &ClickEvent, _window, cx| {
                                this.start_search(cx);
                            }))
                        }),
                    )
                    .child(chip(HEURISTICS, theme)),
            )
    }

    fn render_results(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement {
        let column = div()
            .flex_1()
            .min_w_0()
            .flex()
            .flex_col()
            .gap_4()
            .child(card_title("Company candidates", theme));

        if self.state.results.is_empty() {
            return column.child(card(theme).child(muted(NO_RESULTS, theme)));
        }

        column.children(self.state.results.iter().enumerate().map(|(ix, candidate)| {
            let candidate = candidate.clone();
            card(theme)
                .gap_1()
                .child(
                    div()
                        .font_weight(FontWeight::SEMIBOLD)
                        .text_color(theme.accent)
                        .child(candidate.name.clone()),
                )
                .child(
                    div()
                        .text_size(theme.font_size_small)
                        .text_color(theme.text)
                        .child(candidate.why.clone()),
                )
                .child(
                    div().pt_2().flex().child(
                        button(
                            ("identify-decision-makers", ix),
                            "Identify decision makers",
                            ButtonVariant::Subtle,
                            true,
                            theme,
                        )
                        .on_click(cx.listener(
                            move |this, _: &ClickEvent, _window, _cx| {
                                this.identify_decision_makers(&candidate);
                            },
                        )),
                    ),
                )
        }))
    }

    fn render_log_row(entry: &LogEntry, theme: &Theme) -> impl IntoElement {
        div()
            .w_full()
            .pl_3()
            .py_1()
            .border_l_2()
            .border_color(theme.border)
            .flex()
            .flex_col()
            .text_size(theme.font_size_small)
            .child(
                div()
                    .font_weight(FontWeight::MEDIUM)
                    .text_color(theme.text)
                    .child(entry.title.clone()),
            )
            .child(
                div()
                    .w_full()
                    .text_color(theme.text_muted)
                    .whitespace_normal()
                    .child(entry.detail.clone()),
            )
    }

    fn render_run_log(&self, theme: &Theme) -> impl IntoElement {
        let body = if self.state.logs.is_empty() {
            muted(NO_LOGS, theme).into_any_element()
        } else {
            div()
                .id("run-log")
                .track_scroll(&self.log_scroll)
                .overflow_y_scroll()
                .max_h(px(LOG_MAX_HEIGHT))
                .w_full()
                .flex()
                .flex_col()
                .gap_2()
                .children(
                    self.state
                        .logs
                        .iter()
                        .map(|entry| Self::render_log_row(entry, theme)),
                )
                .into_any_element()
        };

        card(theme)
            .gap_2()
            .child(card_title("Agent run log", theme))
            .child(body)
    }

    fn render_dev_tests(theme: &Theme) -> impl IntoElement {
        card(theme)
            .gap_2()
            .child(card_title("Dev tests", theme))
            .child(muted("Basic sanity checks (mocked).", theme))
            .child(
                div()
                    .flex()
                    .flex_col()
                    .gap_1()
                    .pl_2()
                    .text_size(theme.font_size_small)
                    .text_color(theme.success)
                    .children(DEV_TEST_BULLETS.iter().map(|line| format!("• {}", line))),
            )
    }
}

// =============================================================================
// Focusable
// =============================================================================

impl Focusable for ScoutPanel {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

// =============================================================================
// Render
// =============================================================================

impl Render for ScoutPanel {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme().clone();

        div()
            .id("scout-panel")
            .key_context(PANEL_CONTEXT)
            .track_focus(&self.focus_handle)
            .on_action(cx.listener(Self::on_find_companies))
            .on_action(cx.listener(Self::on_cancel_search))
            .on_action(cx.listener(Self::on_export_csv))
            .on_action(cx.listener(Self::on_focus_next))
            .on_action(cx.listener(Self::on_focus_previous))
            .size_full()
            .overflow_y_scroll()
            .bg(theme.background)
            .text_color(theme.text)
            .font_family(theme.font_family.clone())
            .text_size(theme.font_size)
            .flex()
            .justify_center()
            .child(
                div()
                    .w_full()
                    .max_w(theme.content_width)
                    .p_6()
                    .flex()
                    .flex_col()
                    .gap_6()
                    .child(self.render_header(&theme, cx))
                    .child(self.render_controls(&theme, cx))
                    .child(
                        div()
                            .w_full()
                            .flex()
                            .items_start()
                            .gap_6()
                            .child(self.render_results(&theme, cx))
                            .child(
                                div()
                                    .w(theme.side_column_width)
                                    .flex_shrink_0()
                                    .flex()
                                    .flex_col()
                                    .gap_4()
                                    .child(self.render_run_log(&theme))
                                    .child(Self::render_dev_tests(&theme)),
                            ),
                    ),
            )
    }
}

// =============================================================================
// Tests
// =============================================================================
