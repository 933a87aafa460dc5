//! Cursor and selection bookkeeping shared by the editable text widgets.
//!
//! All indices are in chars, not bytes.

use std::ops::Range;

use crate::input::{Key, KeyEvent};

/// Which characters typing may insert.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CharFilter {
    /// Any non-control character.
    Any,
    /// Digits and the decimal separators `.` and `,`.
    #[default]
    Numeric,
}

impl CharFilter {
    pub fn accepts(self, c: char) -> bool {
        match self {
            CharFilter::Any => !c.is_control(),
            CharFilter::Numeric => c.is_ascii_digit() || matches!(c, '.' | ','),
        }
    }
}

/// What a key press did to the text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// The text changed.
    Edited,
    /// Only the cursor or selection moved.
    Moved,
    /// Nothing happened (filtered key, full field, cursor at a boundary).
    Ignored,
}

/// Text with a cursor and an optional selection.
///
/// A selection runs from `anchor` to the cursor; it exists while the anchor
/// is set and differs from the cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEditState {
    text: String,
    cursor: usize,
    anchor: Option<usize>,
    max_length: Option<usize>,
    filter: CharFilter,
}

impl TextEditState {
    /// Cursor placed after the last character.
    pub fn new(text: impl Into<String>, filter: CharFilter) -> Self {
        let text = text.into();
        let cursor = text.chars().count();
        Self {
            text,
            cursor,
            anchor: None,
            max_length: None,
            filter,
        }
    }

    /// Limit the number of chars typing may produce; `None` is unbounded.
    pub fn with_max_length(mut self, max_length: Option<usize>) -> Self {
        self.max_length = max_length;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn max_length(&self) -> Option<usize> {
        self.max_length
    }

    pub fn filter(&self) -> CharFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: CharFilter) {
        self.filter = filter;
    }

    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.max_length = max_length;
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Replace the text, moving the cursor to the end and dropping the selection.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.char_count();
        self.anchor = None;
    }

    /// Place the cursor, dropping the selection.
    pub fn set_cursor(&mut self, index: usize) {
        self.cursor = index.min(self.char_count());
        self.anchor = None;
    }

    /// Text before the char at `index`.
    pub fn prefix(&self, index: usize) -> &str {
        &self.text[..self.byte_index(index)]
    }

    fn byte_index(&self, index: usize) -> usize {
        self.text
            .char_indices()
            .nth(index)
            .map_or(self.text.len(), |(byte, _)| byte)
    }

    // --- Selection -------------------------------------------------------

    /// Selected char range, ordered; `None` when empty.
    pub fn selected_range(&self) -> Option<Range<usize>> {
        let anchor = self.anchor?;
        (anchor != self.cursor).then(|| anchor.min(self.cursor)..anchor.max(self.cursor))
    }

    pub fn has_selection(&self) -> bool {
        self.selected_range().is_some()
    }

    pub fn selected_text(&self) -> Option<&str> {
        let range = self.selected_range()?;
        Some(&self.text[self.byte_index(range.start)..self.byte_index(range.end)])
    }

    /// Select from `anchor` to `focus`, leaving the cursor at `focus`.
    pub fn select_range(&mut self, anchor: usize, focus: usize) {
        let len = self.char_count();
        self.anchor = Some(anchor.min(len));
        self.cursor = focus.min(len);
    }

    pub fn clear_selection(&mut self) {
        self.anchor = None;
    }

    /// Remove the selected text and return it.
    pub fn take_selection(&mut self) -> Option<String> {
        let range = self.selected_range()?;
        let (start, end) = (self.byte_index(range.start), self.byte_index(range.end));
        let taken: String = self.text.drain(start..end).collect();
        self.cursor = range.start;
        self.anchor = None;
        Some(taken)
    }

    // --- Movement --------------------------------------------------------

    fn move_to(&mut self, index: usize, extend: bool) -> EditOutcome {
        if extend {
            self.anchor.get_or_insert(self.cursor);
        } else {
            self.anchor = None;
        }
        let index = index.min(self.char_count());
        if index == self.cursor {
            return EditOutcome::Ignored;
        }
        self.cursor = index;
        EditOutcome::Moved
    }

    pub fn move_left(&mut self, extend: bool) -> EditOutcome {
        self.move_to(self.cursor.saturating_sub(1), extend)
    }

    pub fn move_right(&mut self, extend: bool) -> EditOutcome {
        self.move_to(self.cursor + 1, extend)
    }

    pub fn move_home(&mut self, extend: bool) -> EditOutcome {
        self.move_to(0, extend)
    }

    pub fn move_end(&mut self, extend: bool) -> EditOutcome {
        self.move_to(self.char_count(), extend)
    }

    // --- Editing ---------------------------------------------------------

    /// Text that typing `c` would produce, or `None` if it would be refused.
    pub fn preview_insert(&self, c: char) -> Option<String> {
        if !self.filter.accepts(c) {
            return None;
        }
        let (start, end) = match self.selected_range() {
            Some(range) => (range.start, range.end),
            None => (self.cursor, self.cursor),
        };
        let remaining = self.char_count() - (end - start);
        if self.max_length.is_some_and(|max| remaining >= max) {
            return None;
        }
        let mut text = String::with_capacity(self.text.len() + c.len_utf8());
        text.push_str(&self.text[..self.byte_index(start)]);
        text.push(c);
        text.push_str(&self.text[self.byte_index(end)..]);
        Some(text)
    }

    /// Type `c` at the cursor, replacing the selection.
    pub fn insert(&mut self, c: char) -> EditOutcome {
        let Some(text) = self.preview_insert(c) else {
            return EditOutcome::Ignored;
        };
        let start = self.selected_range().map_or(self.cursor, |r| r.start);
        self.text = text;
        self.cursor = start + 1;
        self.anchor = None;
        EditOutcome::Edited
    }

    /// Remove the selection, or the char before the cursor.
    pub fn backspace(&mut self) -> EditOutcome {
        if self.take_selection().is_some() {
            return EditOutcome::Edited;
        }
        self.anchor = None;
        if self.cursor == 0 {
            return EditOutcome::Ignored;
        }
        let byte = self.byte_index(self.cursor - 1);
        self.text.remove(byte);
        self.cursor -= 1;
        EditOutcome::Edited
    }

    /// Remove the selection, or the char after the cursor.
    pub fn delete(&mut self) -> EditOutcome {
        if self.take_selection().is_some() {
            return EditOutcome::Edited;
        }
        self.anchor = None;
        if self.cursor >= self.char_count() {
            return EditOutcome::Ignored;
        }
        let byte = self.byte_index(self.cursor);
        self.text.remove(byte);
        EditOutcome::Edited
    }

    /// Apply the editing keys (characters, arrows, Home/End, Backspace/Delete).
    ///
    /// Enter and Escape are left to the widget.
    pub fn apply_key(&mut self, event: &KeyEvent) -> EditOutcome {
        let extend = event.shift();
        match event.key {
            Key::Character(c) => self.insert(c),
            Key::Backspace => self.backspace(),
            Key::Delete => self.delete(),
            Key::Left => self.move_left(extend),
            Key::Right => self.move_right(extend),
            Key::Home => self.move_home(extend),
            Key::End => self.move_end(extend),
            Key::Enter | Key::Escape => EditOutcome::Ignored,
        }
    }

    /// Char boundary nearest to `x`, given a function measuring a prefix width.
    ///
    /// A position left of a char's horizontal midpoint maps before that char.
    pub fn cursor_index_from_x(&self, x: f64, width_of: impl Fn(&str) -> f64) -> usize {
        let mut left = 0.0;
        for (i, (byte, c)) in self.text.char_indices().enumerate() {
            let right = width_of(&self.text[..byte + c.len_utf8()]);
            if x < left + (right - left) / 2.0 {
                return i;
            }
            left = right;
        }
        self.char_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Every char is 10px wide.
    fn mono(s: &str) -> f64 {
        s.chars().count() as f64 * 10.0
    }

    #[test]
    fn test_numeric_filter() {
        let mut state = TextEditState::new("1", CharFilter::Numeric);
        assert_eq!(state.insert('a'), EditOutcome::Ignored);
        assert_eq!(state.insert(','), EditOutcome::Edited);
        assert_eq!(state.insert('5'), EditOutcome::Edited);
        assert_eq!(state.text(), "1,5");
        assert_eq!(state.insert('-'), EditOutcome::Ignored);
        assert!(!CharFilter::Numeric.accepts('+'));
        assert!(CharFilter::Any.accepts('a'));
        assert!(!CharFilter::Any.accepts('\n'));
    }

    #[test]
    fn test_insert_at_cursor() {
        let mut state = TextEditState::new("15", CharFilter::Numeric);
        state.move_left(false);
        state.insert('2');
        assert_eq!(state.text(), "125");
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_max_length() {
        let mut state = TextEditState::new("12", CharFilter::Numeric).with_max_length(Some(3));
        assert_eq!(state.insert('3'), EditOutcome::Edited);
        assert_eq!(state.insert('4'), EditOutcome::Ignored);
        assert_eq!(state.text(), "123");

        // Replacing a selection frees room.
        state.select_range(0, 1);
        assert_eq!(state.insert('9'), EditOutcome::Edited);
        assert_eq!(state.text(), "923");
    }

    #[test]
    fn test_shift_selection() {
        let mut state = TextEditState::new("12345", CharFilter::Numeric);
        state.move_left(true);
        state.move_left(true);
        assert_eq!(state.selected_range(), Some(3..5));
        assert_eq!(state.selected_text(), Some("45"));

        state.move_left(false);
        assert!(!state.has_selection());
        assert_eq!(state.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut state = TextEditState::new("1234", CharFilter::Numeric);
        state.set_cursor(2);
        assert_eq!(state.backspace(), EditOutcome::Edited);
        assert_eq!(state.text(), "134");
        assert_eq!(state.delete(), EditOutcome::Edited);
        assert_eq!(state.text(), "14");
        state.set_cursor(0);
        assert_eq!(state.backspace(), EditOutcome::Ignored);
        state.move_end(false);
        assert_eq!(state.delete(), EditOutcome::Ignored);
    }

    #[test]
    fn test_delete_removes_selection() {
        let mut state = TextEditState::new("98765", CharFilter::Numeric);
        state.select_range(1, 4);
        assert_eq!(state.delete(), EditOutcome::Edited);
        assert_eq!(state.text(), "95");
        assert_eq!(state.cursor(), 1);
    }

    #[test]
    fn test_take_selection() {
        let mut state = TextEditState::new("héllo", CharFilter::Any);
        state.select_range(4, 1);
        assert_eq!(state.take_selection().as_deref(), Some("éll"));
        assert_eq!(state.text(), "ho");
        assert_eq!(state.take_selection(), None);
    }

    #[test]
    fn test_cursor_from_x() {
        let state = TextEditState::new("abc", CharFilter::Any);
        assert_eq!(state.cursor_index_from_x(-5.0, mono), 0);
        assert_eq!(state.cursor_index_from_x(4.0, mono), 0);
        assert_eq!(state.cursor_index_from_x(6.0, mono), 1);
        assert_eq!(state.cursor_index_from_x(24.0, mono), 2);
        assert_eq!(state.cursor_index_from_x(100.0, mono), 3);
    }

    #[test]
    fn test_apply_key() {
        let mut state = TextEditState::new("", CharFilter::Any);
        for c in "ab".chars() {
            state.apply_key(&KeyEvent::char(c));
        }
        assert_eq!(state.apply_key(&KeyEvent::shifted(Key::Home)), EditOutcome::Moved);
        assert_eq!(state.selected_text(), Some("ab"));
        assert_eq!(state.apply_key(&KeyEvent::new(Key::Enter)), EditOutcome::Ignored);
        assert_eq!(state.apply_key(&KeyEvent::new(Key::Backspace)), EditOutcome::Edited);
        assert_eq!(state.text(), "");
    }
}
