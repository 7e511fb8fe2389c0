//! Single-line text field with IME support.
//!
//! Editing state lives in `EditBuffer`; this module wires it to GPUI actions,
//! the mouse, and the platform input handler.

use std::ops::Range;

use gpui::{
    div, fill, point, prelude::*, px, relative, size, App, Bounds, ClipboardItem, Context,
    CursorStyle, Element, ElementId, ElementInputHandler, Entity, EntityInputHandler, EventEmitter,
    FocusHandle, Focusable, GlobalElementId, IntoElement, LayoutId, MouseButton, MouseDownEvent,
    MouseMoveEvent, MouseUpEvent, PaintQuad, Pixels, Point, Render, ShapedLine, SharedString,
    Style, TextRun, UTF16Selection, UnderlineStyle, Window,
};

use crate::actions::{
    Backspace, Copy, Cut, Delete, End, Home, MoveLeft, MoveRight, Paste, SelectLeft, SelectRight,
    Submit, TextSelectAll,
};
use crate::keymap::TEXT_FIELD_CONTEXT;
use crate::model::EditBuffer;
use crate::theme::ThemeExt;

// =============================================================================
// Events
// =============================================================================

#[derive(Debug, Clone)]
pub enum TextFieldEvent {
    /// Text content changed.
    Changed(String),
    /// Enter pressed.
    Submit,
}

// =============================================================================
// TextField (Public API)
// =============================================================================

/// Labeled form input. Forwards events from the inner editor.
pub struct TextField {
    editor: Entity<FieldEditor>,
}

impl TextField {
    pub fn new(
        placeholder: impl Into<SharedString>,
        text: impl Into<String>,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let text = text.into();
        let editor = cx.new(|cx| FieldEditor::new(placeholder.into(), text, window, cx));

        cx.subscribe(&editor, |_this, _editor, event: &TextFieldEvent, cx| {
            cx.emit(event.clone());
        })
        .detach();

        Self { editor }
    }

    pub fn text<'a>(&self, cx: &'a App) -> &'a str {
        self.editor.read(cx).buffer.text()
    }
}

impl EventEmitter<TextFieldEvent> for TextField {}

impl Focusable for TextField {
    fn focus_handle(&self, cx: &App) -> FocusHandle {
        self.editor.read(cx).focus_handle.clone()
    }
}

impl Render for TextField {
    fn render(&mut self, _window: &mut Window, _cx: &mut Context<Self>) -> impl IntoElement {
        self.editor.clone()
    }
}

// =============================================================================
// FieldEditor (Internal)
// =============================================================================

struct FieldEditor {
    buffer: EditBuffer,
    placeholder: SharedString,
    focus_handle: FocusHandle,
    /// Shaped text and bounds from the last paint, for hit testing.
    last_layout: Option<ShapedLine>,
    last_bounds: Option<Bounds<Pixels>>,
    is_selecting: bool,
}

impl FieldEditor {
    fn new(
        placeholder: SharedString,
        text: String,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) -> Self {
        let focus_handle = cx.focus_handle();

        // Tabbing into a field selects its contents
        cx.on_focus(&focus_handle, window, |this: &mut Self, _window, cx| {
            this.buffer.select_all();
            cx.notify();
        })
        .detach();

        Self {
            buffer: EditBuffer::new(text),
            placeholder,
            focus_handle,
            last_layout: None,
            last_bounds: None,
            is_selecting: false,
        }
    }

    fn emit_changed(&self, cx: &mut Context<Self>) {
        cx.emit(TextFieldEvent::Changed(self.buffer.text().to_string()));
        cx.notify();
    }

    fn index_for_mouse_position(&self, position: Point<Pixels>) -> usize {
        if self.buffer.is_empty() {
            return 0;
        }

        let (Some(bounds), Some(line)) = (self.last_bounds.as_ref(), self.last_layout.as_ref())
        else {
            return 0;
        };

        if position.y < bounds.top() {
            return 0;
        }
        if position.y > bounds.bottom() {
            return self.buffer.text().len();
        }

        line.closest_index_for_x(position.x - bounds.left())
    }

    // -------------------------------------------------------------------------
    // Action Handlers
    // -------------------------------------------------------------------------

    fn backspace(&mut self, _: &Backspace, _window: &mut Window, cx: &mut Context<Self>) {
        if self.buffer.backspace() {
            self.emit_changed(cx);
        }
    }

    fn delete(&mut self, _: &Delete, _window: &mut Window, cx: &mut Context<Self>) {
        if self.buffer.delete() {
            self.emit_changed(cx);
        }
    }

    fn left(&mut self, _: &MoveLeft, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_left();
        cx.notify();
    }

    fn right(&mut self, _: &MoveRight, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_right();
        cx.notify();
    }

    fn select_left(&mut self, _: &SelectLeft, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.select_left();
        cx.notify();
    }

    fn select_right(&mut self, _: &SelectRight, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.select_right();
        cx.notify();
    }

    fn select_all(&mut self, _: &TextSelectAll, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.select_all();
        cx.notify();
    }

    fn home(&mut self, _: &Home, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_home();
        cx.notify();
    }

    fn end(&mut self, _: &End, _window: &mut Window, cx: &mut Context<Self>) {
        self.buffer.move_end();
        cx.notify();
    }

    fn copy(&mut self, _: &Copy, _window: &mut Window, cx: &mut Context<Self>) {
        if let Some(selected) = self.buffer.selected_text() {
            cx.write_to_clipboard(ClipboardItem::new_string(selected.to_string()));
        }
    }

    fn paste(&mut self, _: &Paste, _window: &mut Window, cx: &mut Context<Self>) {
        if let Some(text) = cx.read_from_clipboard().and_then(|item| item.text()) {
            self.buffer.replace(None, &text.replace('\n', " "));
            self.emit_changed(cx);
        }
    }

    fn cut(&mut self, _: &Cut, _window: &mut Window, cx: &mut Context<Self>) {
        if let Some(selected) = self.buffer.selected_text() {
            cx.write_to_clipboard(ClipboardItem::new_string(selected.to_string()));
            self.buffer.replace(None, "");
            self.emit_changed(cx);
        }
    }

    fn submit(&mut self, _: &Submit, _window: &mut Window, cx: &mut Context<Self>) {
        cx.emit(TextFieldEvent::Submit);
    }

    // -------------------------------------------------------------------------
    // Mouse Handlers
    // -------------------------------------------------------------------------

    fn on_mouse_down(
        &mut self,
        event: &MouseDownEvent,
        window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.is_selecting = true;
        let was_focused = self.focus_handle.is_focused(window);
        window.focus(&self.focus_handle, cx);

        let index = self.index_for_mouse_position(event.position);
        if event.modifiers.shift {
            self.buffer.select_to(index);
        } else if was_focused {
            self.buffer.move_to(index);
        }
        cx.notify();
    }

    fn on_mouse_up(&mut self, _: &MouseUpEvent, _window: &mut Window, _cx: &mut Context<Self>) {
        self.is_selecting = false;
    }

    fn on_mouse_move(
        &mut self,
        event: &MouseMoveEvent,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        if self.is_selecting {
            self.buffer
                .select_to(self.index_for_mouse_position(event.position));
            cx.notify();
        }
    }
}

impl EventEmitter<TextFieldEvent> for FieldEditor {}

impl Focusable for FieldEditor {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}

// =============================================================================
// EntityInputHandler (IME)
// =============================================================================

impl EntityInputHandler for FieldEditor {
    fn text_for_range(
        &mut self,
        range_utf16: Range<usize>,
        actual_range: &mut Option<Range<usize>>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<String> {
        let range = self.buffer.range_from_utf16(&range_utf16);
        actual_range.replace(self.buffer.range_to_utf16(&range));
        self.buffer.text().get(range).map(str::to_string)
    }

    fn selected_text_range(
        &mut self,
        _ignore_disabled_input: bool,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<UTF16Selection> {
        Some(UTF16Selection {
            range: self.buffer.range_to_utf16(&self.buffer.selected_range()),
            reversed: self.buffer.selection_reversed(),
        })
    }

    fn marked_text_range(
        &self,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Range<usize>> {
        self.buffer
            .marked_range()
            .map(|r| self.buffer.range_to_utf16(&r))
    }

    fn unmark_text(&mut self, _window: &mut Window, _cx: &mut Context<Self>) {
        self.buffer.unmark();
    }

    fn replace_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.buffer.replace(range_utf16, new_text);
        self.emit_changed(cx);
    }

    fn replace_and_mark_text_in_range(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_range_utf16: Option<Range<usize>>,
        _window: &mut Window,
        cx: &mut Context<Self>,
    ) {
        self.buffer
            .replace_and_mark(range_utf16, new_text, new_selected_range_utf16);
        self.emit_changed(cx);
    }

    fn bounds_for_range(
        &mut self,
        range_utf16: Range<usize>,
        element_bounds: Bounds<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<Bounds<Pixels>> {
        let layout = self.last_layout.as_ref()?;
        let range = self.buffer.range_from_utf16(&range_utf16);

        Some(Bounds::from_corners(
            point(
                element_bounds.left() + layout.x_for_index(range.start),
                element_bounds.top(),
            ),
            point(
                element_bounds.left() + layout.x_for_index(range.end),
                element_bounds.bottom(),
            ),
        ))
    }

    fn character_index_for_point(
        &mut self,
        point: Point<Pixels>,
        _window: &mut Window,
        _cx: &mut Context<Self>,
    ) -> Option<usize> {
        let bounds = self.last_bounds.as_ref()?;
        let layout = self.last_layout.as_ref()?;

        let local_point = bounds.localize(&point)?;
        let utf8_index = layout.index_for_x(local_point.x)?;
        Some(self.buffer.offset_to_utf16(utf8_index))
    }
}

// =============================================================================
// Render
// =============================================================================

impl Render for FieldEditor {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        let theme = cx.theme();
        let is_focused = self.focus_handle.is_focused(window);

        div()
            .key_context(TEXT_FIELD_CONTEXT)
            .track_focus(&self.focus_handle)
            .cursor(CursorStyle::IBeam)
            .on_action(cx.listener(Self::backspace))
            .on_action(cx.listener(Self::delete))
            .on_action(cx.listener(Self::left))
            .on_action(cx.listener(Self::right))
            .on_action(cx.listener(Self::select_left))
            .on_action(cx.listener(Self::select_right))
            .on_action(cx.listener(Self::select_all))
            .on_action(cx.listener(Self::home))
            .on_action(cx.listener(Self::end))
            .on_action(cx.listener(Self::copy))
            .on_action(cx.listener(Self::paste))
            .on_action(cx.listener(Self::cut))
            .on_action(cx.listener(Self::submit))
            .on_mouse_down(MouseButton::Left, cx.listener(Self::on_mouse_down))
            .on_mouse_up(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_up_out(MouseButton::Left, cx.listener(Self::on_mouse_up))
            .on_mouse_move(cx.listener(Self::on_mouse_move))
            .w_full()
            .px_3()
            .py_2()
            .overflow_hidden()
            .bg(theme.surface_inset)
            .rounded(theme.radius_small)
            .border_1()
            .border_color(theme.border)
            .when(is_focused, |this| this.border_color(theme.border_focused))
            .child(FieldTextElement {
                editor: cx.entity().clone(),
            })
    }
}

// =============================================================================
// Text Element
// =============================================================================

/// Paints text, selection and cursor, and registers the input handler.
struct FieldTextElement {
    editor: Entity<FieldEditor>,
}

struct FieldTextPrepaint {
    line: Option<ShapedLine>,
    cursor: Option<PaintQuad>,
    selection: Option<PaintQuad>,
}

impl IntoElement for FieldTextElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

impl Element for FieldTextElement {
    type RequestLayoutState = ();
    type PrepaintState = FieldTextPrepaint;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static core::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = relative(1.).into();
        style.size.height = window.line_height().into();
        (window.request_layout(style, [], cx), ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let editor = self.editor.read(cx);
        let buffer = &editor.buffer;
        let theme = cx.theme();
        let is_focused = editor.focus_handle.is_focused(window);
        let style = window.text_style();

        let (display_text, text_color) = if buffer.is_empty() {
            (editor.placeholder.clone(), theme.text_placeholder)
        } else {
            (SharedString::from(buffer.text().to_string()), theme.text)
        };

        let base_run = TextRun {
            len: display_text.len(),
            font: style.font(),
            color: text_color,
            background_color: None,
            underline: None,
            strikethrough: None,
        };

        // Underline the IME composition
        let runs = match buffer.marked_range().filter(|_| !buffer.is_empty()) {
            Some(marked) => [
                TextRun {
                    len: marked.start,
                    ..base_run.clone()
                },
                TextRun {
                    len: marked.end - marked.start,
                    underline: Some(UnderlineStyle {
                        color: Some(text_color),
                        thickness: px(1.0),
                        wavy: false,
                    }),
                    ..base_run.clone()
                },
                TextRun {
                    len: display_text.len().saturating_sub(marked.end),
                    ..base_run
                },
            ]
            .into_iter()
            .filter(|run| run.len > 0)
            .collect(),
            None => vec![base_run],
        };

        let font_size = style.font_size.to_pixels(window.rem_size());
        let line = window
            .text_system()
            .shape_line(display_text, font_size, &runs, None);

        let selected = buffer.selected_range();
        let selection = (!buffer.is_empty() && !selected.is_empty()).then(|| {
            fill(
                Bounds::from_corners(
                    point(bounds.left() + line.x_for_index(selected.start), bounds.top()),
                    point(bounds.left() + line.x_for_index(selected.end), bounds.bottom()),
                ),
                theme.selection,
            )
        });

        let cursor = (is_focused && selection.is_none()).then(|| {
            let x = if buffer.is_empty() {
                px(0.)
            } else {
                line.x_for_index(buffer.cursor_offset())
            };
            fill(
                Bounds::new(
                    point(bounds.left() + x, bounds.top()),
                    size(px(2.), bounds.size.height),
                ),
                theme.accent,
            )
        });

        FieldTextPrepaint {
            line: Some(line),
            cursor,
            selection,
        }
    }

    fn paint(
        &mut self,
        _id: Option<&GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        let focus_handle = self.editor.read(cx).focus_handle.clone();
        window.handle_input(
            &focus_handle,
            ElementInputHandler::new(bounds, self.editor.clone()),
            cx,
        );

        if let Some(selection) = prepaint.selection.take() {
            window.paint_quad(selection);
        }

        if let Some(line) = prepaint.line.take() {
            let _ = line.paint(bounds.origin, window.line_height(), window, cx);

            self.editor.update(cx, |editor, _cx| {
                editor.last_layout = Some(line);
                editor.last_bounds = Some(bounds);
            });
        }

        if let Some(cursor) = prepaint.cursor.take() {
            window.paint_quad(cursor);
        }
    }
}
