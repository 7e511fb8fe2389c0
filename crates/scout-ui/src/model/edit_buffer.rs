//! Single-line text buffer with selection and IME composition.
//!
//! All ranges stored here are UTF-8 byte offsets into `text`. Platform IME
//! APIs speak UTF-16, so conversions are provided at the edge. Cursor
//! movement snaps to grapheme boundaries.

use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    text: String,
    /// Start == end means a cursor with no selection.
    selected_range: Range<usize>,
    /// Selection was made right-to-left (cursor at start).
    selection_reversed: bool,
    /// IME composition range, if active.
    marked_range: Option<Range<usize>>,
}

impl EditBuffer {
    /// Create a buffer holding `text`, cursor at the end.
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        let end = text.len();
        Self {
            text,
            selected_range: end..end,
            selection_reversed: false,
            marked_range: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn selected_range(&self) -> Range<usize> {
        self.selected_range.clone()
    }

    pub fn selection_reversed(&self) -> bool {
        self.selection_reversed
    }

    pub fn marked_range(&self) -> Option<Range<usize>> {
        self.marked_range.clone()
    }

    pub fn selected_text(&self) -> Option<&str> {
        if self.selected_range.is_empty() {
            None
        } else {
            Some(&self.text[self.selected_range.clone()])
        }
    }

    /// The "active" end of the selection.
    pub fn cursor_offset(&self) -> usize {
        if self.selection_reversed {
            self.selected_range.start
        } else {
            self.selected_range.end
        }
    }

    // -------------------------------------------------------------------------
    // Cursor / Selection
    // -------------------------------------------------------------------------

    /// Move the cursor, collapsing any selection.
    pub fn move_to(&mut self, offset: usize) {
        let offset = offset.min(self.text.len());
        self.selected_range = offset..offset;
        self.selection_reversed = false;
    }

    /// Extend the selection so the cursor lands on `offset`.
    pub fn select_to(&mut self, offset: usize) {
        let offset = offset.min(self.text.len());
        if self.selection_reversed {
            self.selected_range.start = offset;
        } else {
            self.selected_range.end = offset;
        }

        if self.selected_range.end < self.selected_range.start {
            self.selection_reversed = !self.selection_reversed;
            self.selected_range = self.selected_range.end..self.selected_range.start;
        }
    }

    pub fn select_all(&mut self) {
        self.selected_range = 0..self.text.len();
        self.selection_reversed = false;
    }

    pub fn move_left(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.previous_boundary(self.cursor_offset()));
        } else {
            self.move_to(self.selected_range.start);
        }
    }

    pub fn move_right(&mut self) {
        if self.selected_range.is_empty() {
            self.move_to(self.next_boundary(self.cursor_offset()));
        } else {
            self.move_to(self.selected_range.end);
        }
    }

    pub fn select_left(&mut self) {
        self.select_to(self.previous_boundary(self.cursor_offset()));
    }

    pub fn select_right(&mut self) {
        self.select_to(self.next_boundary(self.cursor_offset()));
    }

    pub fn move_home(&mut self) {
        self.move_to(0);
    }

    pub fn move_end(&mut self) {
        self.move_to(self.text.len());
    }

    fn previous_boundary(&self, offset: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .rev()
            .find_map(|(idx, _)| (idx < offset).then_some(idx))
            .unwrap_or(0)
    }

    fn next_boundary(&self, offset: usize) -> usize {
        self.text
            .grapheme_indices(true)
            .find_map(|(idx, _)| (idx > offset).then_some(idx))
            .unwrap_or(self.text.len())
    }

    // -------------------------------------------------------------------------
    // Editing
    // -------------------------------------------------------------------------

    /// Delete the selection, or the grapheme before the cursor.
    ///
    /// Returns `true` if the text changed.
    pub fn backspace(&mut self) -> bool {
        if self.selected_range.is_empty() {
            self.select_to(self.previous_boundary(self.cursor_offset()));
        }
        self.delete_selection()
    }

    /// Delete the selection, or the grapheme after the cursor.
    ///
    /// Returns `true` if the text changed.
    pub fn delete(&mut self) -> bool {
        if self.selected_range.is_empty() {
            self.select_to(self.next_boundary(self.cursor_offset()));
        }
        self.delete_selection()
    }

    fn delete_selection(&mut self) -> bool {
        if self.selected_range.is_empty() {
            return false;
        }
        self.replace(None, "");
        true
    }

    /// Replace `range` (UTF-16), else the marked range, else the selection.
    ///
    /// Ends composition and leaves the cursor after the inserted text.
    pub fn replace(&mut self, range_utf16: Option<Range<usize>>, new_text: &str) {
        let range = self.target_range(range_utf16);
        self.splice(&range, new_text);

        let cursor = range.start + new_text.len();
        self.selected_range = cursor..cursor;
        self.selection_reversed = false;
        self.marked_range = None;
    }

    /// Replace like `replace`, but mark the inserted text as IME composition.
    ///
    /// `new_selected_utf16` is relative to the inserted text.
    pub fn replace_and_mark(
        &mut self,
        range_utf16: Option<Range<usize>>,
        new_text: &str,
        new_selected_utf16: Option<Range<usize>>,
    ) {
        let range = self.target_range(range_utf16);
        self.splice(&range, new_text);

        self.marked_range =
            (!new_text.is_empty()).then(|| range.start..range.start + new_text.len());

        self.selected_range = new_selected_utf16
            .map(|r| {
                let local = utf16_range_to_utf8(new_text, &r);
                local.start + range.start..local.end + range.start
            })
            .unwrap_or_else(|| {
                let cursor = range.start + new_text.len();
                cursor..cursor
            });
        self.selection_reversed = false;
    }

    /// End IME composition, keeping the composed text.
    pub fn unmark(&mut self) {
        self.marked_range = None;
    }

    fn target_range(&self, range_utf16: Option<Range<usize>>) -> Range<usize> {
        range_utf16
            .as_ref()
            .map(|r| self.range_from_utf16(r))
            .or(self.marked_range.clone())
            .unwrap_or(self.selected_range.clone())
    }

    fn splice(&mut self, range: &Range<usize>, new_text: &str) {
        self.text.replace_range(range.clone(), new_text);
    }

    // -------------------------------------------------------------------------
    // UTF-16 Conversion (for platform IME APIs)
    // -------------------------------------------------------------------------

    pub fn offset_to_utf16(&self, utf8_offset: usize) -> usize {
        self.text[..utf8_offset].encode_utf16().count()
    }

    pub fn offset_from_utf16(&self, utf16_offset: usize) -> usize {
        utf16_to_utf8(&self.text, utf16_offset)
    }

    pub fn range_to_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_to_utf16(range.start)..self.offset_to_utf16(range.end)
    }

    pub fn range_from_utf16(&self, range: &Range<usize>) -> Range<usize> {
        self.offset_from_utf16(range.start)..self.offset_from_utf16(range.end)
    }
}

fn utf16_to_utf8(text: &str, utf16_offset: usize) -> usize {
    let mut utf8_offset = 0;
    let mut utf16_count = 0;

    for ch in text.chars() {
        if utf16_count >= utf16_offset {
            break;
        }
        utf16_count += ch.len_utf16();
        utf8_offset += ch.len_utf8();
    }

    utf8_offset
}

fn utf16_range_to_utf8(text: &str, range: &Range<usize>) -> Range<usize> {
    utf16_to_utf8(text, range.start)..utf16_to_utf8(text, range.end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_places_cursor_at_end() {
        let buffer = EditBuffer::new("China, EU");
        assert_eq!(buffer.selected_range(), 9..9);
        assert_eq!(buffer.cursor_offset(), 9);
        assert!(buffer.selected_text().is_none());
    }

    #[test]
    fn test_typing_and_backspace() {
        let mut buffer = EditBuffer::new("EU");
        buffer.replace(None, ", US");
        assert_eq!(buffer.text(), "EU, US");

        assert!(buffer.backspace());
        assert_eq!(buffer.text(), "EU, U");

        buffer.move_home();
        assert!(!buffer.backspace());
        assert_eq!(buffer.text(), "EU, U");
    }

    #[test]
    fn test_delete_forward() {
        let mut buffer = EditBuffer::new("ABS");
        buffer.move_home();
        assert!(buffer.delete());
        assert_eq!(buffer.text(), "BS");

        buffer.move_end();
        assert!(!buffer.delete());
    }

    #[test]
    fn test_selection_and_replace() {
        let mut buffer = EditBuffer::new("rotary, linear");
        buffer.select_all();
        assert_eq!(buffer.selected_text(), Some("rotary, linear"));

        buffer.replace(None, "angle");
        assert_eq!(buffer.text(), "angle");
        assert_eq!(buffer.selected_range(), 5..5);
    }

    #[test]
    fn test_select_left_flips_direction() {
        let mut buffer = EditBuffer::new("abc");
        buffer.move_to(1);
        buffer.select_right();
        assert_eq!(buffer.selected_range(), 1..2);
        assert!(!buffer.selection_reversed());

        buffer.select_left();
        buffer.select_left();
        assert_eq!(buffer.selected_range(), 0..1);
        assert!(buffer.selection_reversed());
        assert_eq!(buffer.cursor_offset(), 0);
    }

    #[test]
    fn test_move_collapses_selection() {
        let mut buffer = EditBuffer::new("pumps");
        buffer.select_all();
        buffer.move_left();
        assert_eq!(buffer.selected_range(), 0..0);

        buffer.select_all();
        buffer.move_right();
        assert_eq!(buffer.selected_range(), 5..5);
    }

    #[test]
    fn test_grapheme_navigation() {
        // "é" as e + combining acute is one grapheme, three bytes
        let mut buffer = EditBuffer::new("e\u{301}x");
        buffer.move_home();
        buffer.move_right();
        assert_eq!(buffer.cursor_offset(), 3);

        buffer.move_end();
        assert!(buffer.backspace());
        assert!(buffer.backspace());
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_utf16_conversion() {
        // U+1F697 is two UTF-16 units and four UTF-8 bytes
        let buffer = EditBuffer::new("a\u{1F697}b");
        assert_eq!(buffer.offset_to_utf16(5), 3);
        assert_eq!(buffer.offset_from_utf16(3), 5);
        assert_eq!(buffer.range_from_utf16(&(1..3)), 1..5);
        assert_eq!(buffer.range_to_utf16(&(0..6)), 0..4);
    }

    #[test]
    fn test_ime_composition() {
        let mut buffer = EditBuffer::new("NIO ");
        buffer.replace_and_mark(None, "ni", None);
        assert_eq!(buffer.text(), "NIO ni");
        assert_eq!(buffer.marked_range(), Some(4..6));
        assert_eq!(buffer.selected_range(), 6..6);

        // Composition replaces the marked text
        buffer.replace(None, "蔚来");
        assert_eq!(buffer.text(), "NIO 蔚来");
        assert!(buffer.marked_range().is_none());
        assert_eq!(buffer.cursor_offset(), buffer.text().len());
    }

    #[test]
    fn test_replace_and_mark_relative_selection() {
        let mut buffer = EditBuffer::new("");
        buffer.replace_and_mark(None, "abc", Some(1..2));
        assert_eq!(buffer.selected_range(), 1..2);

        buffer.unmark();
        assert!(buffer.marked_range().is_none());
        assert_eq!(buffer.text(), "abc");
    }
}
