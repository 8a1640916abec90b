//! Single-line text editor.
//!
//! The cursor and selection anchor are byte offsets into the text, always
//! on grapheme boundaries. A selection is the span between the anchor and
//! the cursor in either order; it is normalized with min/max at use sites.
//! Password mode masks the rendered string but every edit still mutates the
//! real buffer.

use unicode_segmentation::UnicodeSegmentation;

use crate::backend::Platform;
use crate::event::{UiEvent, UiEventKind};
use crate::input::{Key, KeyPressEvent, MouseButton, MousePressEvent, TextInputEvent};
use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};

/// State for a single-line text input.
#[derive(Debug, Clone)]
pub struct TextInputState {
    text: String,
    cursor: usize,
    /// Selection anchor; `None` means no selection. The selected span runs
    /// from the anchor to the cursor in either direction.
    selection_anchor: Option<usize>,
    /// Render a mask instead of the text.
    pub password: bool,
    /// Mask character used in password mode.
    pub mask_char: char,
    /// Maximum text length in characters, if limited.
    pub max_length: Option<usize>,
}

impl Default for TextInputState {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            selection_anchor: None,
            password: false,
            mask_char: '\u{2022}',
            max_length: None,
        }
    }
}

impl TextInputState {
    /// The current text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position as a byte offset.
    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Replace the text. The cursor snaps to the end and any selection is
    /// cleared.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.cursor = self.text.len();
        self.selection_anchor = None;
    }

    /// The normalized selection span, if one exists and is non-empty.
    pub fn selection_range(&self) -> Option<(usize, usize)> {
        let anchor = self.selection_anchor?;
        if anchor == self.cursor {
            return None;
        }
        Some((anchor.min(self.cursor), anchor.max(self.cursor)))
    }

    /// The selected text, or an empty string.
    pub fn selected_text(&self) -> &str {
        match self.selection_range() {
            Some((start, end)) => &self.text[start..end],
            None => "",
        }
    }

    /// Select the whole buffer, cursor at the end.
    pub fn select_all(&mut self) {
        self.selection_anchor = Some(0);
        self.cursor = self.text.len();
    }

    /// The string to render: the text itself, or a same-length mask in
    /// password mode.
    pub fn display_text(&self) -> String {
        if self.password {
            self.mask_char
                .to_string()
                .repeat(self.text.graphemes(true).count())
        } else {
            self.text.clone()
        }
    }

    /// Map a byte offset in the text to the matching byte offset in
    /// [`display_text`](Self::display_text). They differ in password mode,
    /// where every grapheme renders as one mask character.
    pub fn display_offset(&self, byte: usize) -> usize {
        if self.password {
            self.text[..byte].graphemes(true).count() * self.mask_char.len_utf8()
        } else {
            byte
        }
    }

    fn prev_boundary(&self, from: usize) -> usize {
        self.text[..from]
            .grapheme_indices(true)
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self, from: usize) -> usize {
        self.text[from..]
            .graphemes(true)
            .next()
            .map(|g| from + g.len())
            .unwrap_or(self.text.len())
    }

    /// Start of the word left of `from`: trailing spaces are skipped first,
    /// then the word itself.
    fn prev_word_boundary(&self, from: usize) -> usize {
        let mut pos = from;
        while pos > 0 && self.text[..pos].ends_with(' ') {
            pos = self.prev_boundary(pos);
        }
        self.text[..pos]
            .unicode_word_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    /// End of the word right of `from`, skipping leading spaces first.
    fn next_word_boundary(&self, from: usize) -> usize {
        let mut pos = from;
        while pos < self.text.len() && self.text[pos..].starts_with(' ') {
            pos = self.next_boundary(pos);
        }
        self.text[pos..]
            .unicode_word_indices()
            .next()
            .map(|(i, w)| pos + i + w.len())
            .unwrap_or(self.text.len())
    }

    fn move_cursor(&mut self, to: usize, select: bool) {
        if select {
            if self.selection_anchor.is_none() {
                self.selection_anchor = Some(self.cursor);
            }
        } else {
            self.selection_anchor = None;
        }
        self.cursor = to;
    }

    /// Move one grapheme or word left. With a selection and no Shift, the
    /// cursor collapses to the selection start.
    pub fn move_left(&mut self, select: bool, word: bool) {
        if !select {
            if let Some((start, _)) = self.selection_range() {
                self.move_cursor(start, false);
                return;
            }
        }
        let to = if word {
            self.prev_word_boundary(self.cursor)
        } else {
            self.prev_boundary(self.cursor)
        };
        self.move_cursor(to, select);
    }

    /// Move one grapheme or word right. With a selection and no Shift, the
    /// cursor collapses to the selection end.
    pub fn move_right(&mut self, select: bool, word: bool) {
        if !select {
            if let Some((_, end)) = self.selection_range() {
                self.move_cursor(end, false);
                return;
            }
        }
        let to = if word {
            self.next_word_boundary(self.cursor)
        } else {
            self.next_boundary(self.cursor)
        };
        self.move_cursor(to, select);
    }

    /// Move to the start of the line.
    pub fn move_home(&mut self, select: bool) {
        self.move_cursor(0, select);
    }

    /// Move to the end of the line.
    pub fn move_end(&mut self, select: bool) {
        self.move_cursor(self.text.len(), select);
    }

    /// Delete the selected span. Returns whether anything was removed.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection_range() else {
            self.selection_anchor = None;
            return false;
        };
        self.text.replace_range(start..end, "");
        self.cursor = start;
        self.selection_anchor = None;
        true
    }

    /// Insert text at the cursor, replacing any selection first. The cursor
    /// lands immediately after the inserted text. Returns whether the buffer
    /// changed.
    pub fn insert_text(&mut self, input: &str) -> bool {
        let deleted = self.delete_selection();
        let mut accepted = input;
        if let Some(max) = self.max_length {
            let used = self.text.graphemes(true).count();
            let room = max.saturating_sub(used);
            let cut = input
                .grapheme_indices(true)
                .nth(room)
                .map(|(i, _)| i)
                .unwrap_or(input.len());
            accepted = &input[..cut];
        }
        if accepted.is_empty() {
            return deleted;
        }
        self.text.insert_str(self.cursor, accepted);
        self.cursor += accepted.len();
        true
    }

    /// Backspace: delete the selection, or the grapheme left of the cursor.
    pub fn backspace(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor == 0 {
            return false;
        }
        let start = self.prev_boundary(self.cursor);
        self.text.replace_range(start..self.cursor, "");
        self.cursor = start;
        true
    }

    /// Delete: remove the selection, or the grapheme right of the cursor.
    pub fn delete_forward(&mut self) -> bool {
        if self.delete_selection() {
            return true;
        }
        if self.cursor >= self.text.len() {
            return false;
        }
        let end = self.next_boundary(self.cursor);
        self.text.replace_range(self.cursor..end, "");
        true
    }
}

fn with_state<R>(
    tree: &mut WidgetTree,
    id: WidgetId,
    f: impl FnOnce(&mut TextInputState) -> R,
) -> Option<R> {
    tree.get_mut(id).and_then(|w| match &mut w.kind {
        WidgetKind::TextInput(state) => Some(f(state)),
        _ => None,
    })
}

fn emit_text_changed(tree: &mut WidgetTree, id: WidgetId) {
    let text = match tree.get(id).and_then(|w| w.as_text_input()) {
        Some(state) => state.text().to_owned(),
        None => return,
    };
    tree.push_event(UiEvent::new(id, UiEventKind::TextChanged(text)));
}

impl WidgetTree {
    /// Replace a text input's contents. The cursor snaps to the end. Does
    /// not emit `TextChanged`; only user edits do.
    pub fn set_input_text(&mut self, id: WidgetId, text: impl Into<String>) {
        with_state(self, id, |state| state.set_text(text));
    }
}

pub(crate) fn handle_mouse_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MousePressEvent,
) -> bool {
    if event.button != MouseButton::Left {
        return false;
    }
    tree.focus(id);
    true
}

pub(crate) fn handle_text_input(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &TextInputEvent,
) -> bool {
    let changed = with_state(tree, id, |state| state.insert_text(&event.text)).unwrap_or(false);
    if changed {
        emit_text_changed(tree, id);
    }
    true
}

pub(crate) fn handle_key_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &KeyPressEvent,
    platform: &mut dyn Platform,
) -> bool {
    let select = event.modifiers.shift;
    let word = event.modifiers.control;

    match event.key {
        Key::ArrowLeft => {
            with_state(tree, id, |s| s.move_left(select, word));
            true
        }
        Key::ArrowRight => {
            with_state(tree, id, |s| s.move_right(select, word));
            true
        }
        Key::Home => {
            with_state(tree, id, |s| s.move_home(select));
            true
        }
        Key::End => {
            with_state(tree, id, |s| s.move_end(select));
            true
        }
        Key::Backspace => {
            if with_state(tree, id, |s| s.backspace()).unwrap_or(false) {
                emit_text_changed(tree, id);
            }
            true
        }
        Key::Delete => {
            if with_state(tree, id, |s| s.delete_forward()).unwrap_or(false) {
                emit_text_changed(tree, id);
            }
            true
        }
        Key::Enter => {
            let text = tree
                .get(id)
                .and_then(|w| w.as_text_input())
                .map(|s| s.text().to_owned())
                .unwrap_or_default();
            tree.push_event(UiEvent::new(id, UiEventKind::TextSubmitted(text)));
            true
        }
        Key::A if event.modifiers.control => {
            with_state(tree, id, |s| s.select_all());
            true
        }
        Key::C if event.modifiers.control => {
            if let Some(selected) = tree
                .get(id)
                .and_then(|w| w.as_text_input())
                .map(|s| s.selected_text().to_owned())
            {
                if !selected.is_empty() {
                    platform.set_clipboard_text(&selected);
                }
            }
            true
        }
        Key::X if event.modifiers.control => {
            let selected = tree
                .get(id)
                .and_then(|w| w.as_text_input())
                .map(|s| s.selected_text().to_owned())
                .unwrap_or_default();
            if !selected.is_empty() {
                platform.set_clipboard_text(&selected);
                with_state(tree, id, |s| s.delete_selection());
                emit_text_changed(tree, id);
            }
            true
        }
        Key::V if event.modifiers.control => {
            if let Some(pasted) = platform.clipboard_text() {
                let changed =
                    with_state(tree, id, |s| s.insert_text(&pasted)).unwrap_or(false);
                if changed {
                    emit_text_changed(tree, id);
                }
            }
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::NullPlatform;
    use crate::input::Modifiers;
    use crate::widget::Widget;

    #[test]
    fn test_set_text_snaps_cursor_to_end() {
        let mut state = TextInputState::default();
        state.set_text("hello");
        assert_eq!(state.cursor(), "hello".len());
        assert!(state.selection_range().is_none());
    }

    #[test]
    fn test_insert_replaces_selection() {
        let mut state = TextInputState::default();
        state.set_text("hello world");
        // Select "world"
        state.move_cursor(6, false);
        state.move_end(true);
        assert_eq!(state.selected_text(), "world");

        assert!(state.insert_text("rust"));
        assert_eq!(state.text(), "hello rust");
        assert_eq!(state.cursor(), "hello rust".len());
    }

    #[test]
    fn test_cursor_collapses_selection_without_shift() {
        let mut state = TextInputState::default();
        state.set_text("abc");
        state.select_all();
        state.move_left(false, false);
        assert_eq!(state.cursor(), 0);
        assert!(state.selection_range().is_none());
    }

    #[test]
    fn test_word_navigation_skips_spaces_first() {
        let mut state = TextInputState::default();
        state.set_text("foo bar   ");
        // Cursor at the very end, behind trailing spaces
        state.move_left(false, true);
        assert_eq!(state.cursor(), 4); // start of "bar"
        state.move_left(false, true);
        assert_eq!(state.cursor(), 0);
    }

    #[test]
    fn test_backspace_handles_graphemes() {
        let mut state = TextInputState::default();
        state.set_text("a\u{1F600}");
        assert!(state.backspace());
        assert_eq!(state.text(), "a");
        assert!(state.backspace());
        assert!(!state.backspace());
    }

    #[test]
    fn test_password_mask_has_same_grapheme_count() {
        let mut state = TextInputState::default();
        state.password = true;
        state.set_text("ab\u{1F600}");
        assert_eq!(state.display_text(), "\u{2022}\u{2022}\u{2022}");
        assert_eq!(state.text(), "ab\u{1F600}");
    }

    #[test]
    fn test_max_length_truncates_insert() {
        let mut state = TextInputState::default();
        state.max_length = Some(5);
        state.insert_text("abcdefgh");
        assert_eq!(state.text(), "abcde");
        assert!(!state.insert_text("x"));
    }

    #[test]
    fn test_typed_text_emits_change() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let input = tree.spawn(root, Widget::text_input().with_rect(0, 0, 120, 20));

        handle_text_input(
            &mut tree,
            input,
            &TextInputEvent {
                text: "hi".to_owned(),
            },
        );
        let events = tree.take_events();
        assert_eq!(
            events,
            vec![UiEvent::new(input, UiEventKind::TextChanged("hi".to_owned()))]
        );
    }

    #[test]
    fn test_enter_submits_current_text() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let input = tree.spawn(root, Widget::text_input());
        tree.set_input_text(input, "cmd");

        let mut platform = NullPlatform::default();
        handle_key_press(
            &mut tree,
            input,
            &KeyPressEvent {
                key: Key::Enter,
                modifiers: Modifiers::NONE,
                repeat: false,
            },
            &mut platform,
        );
        assert!(tree
            .take_events()
            .iter()
            .any(|e| e.kind == UiEventKind::TextSubmitted("cmd".to_owned())));
    }

    #[test]
    fn test_cut_and_paste_round_trip() {
        struct MemClipboard(Option<String>);
        impl Platform for MemClipboard {
            fn clipboard_text(&mut self) -> Option<String> {
                self.0.clone()
            }
            fn set_clipboard_text(&mut self, text: &str) {
                self.0 = Some(text.to_owned());
            }
        }

        let mut tree = WidgetTree::new();
        let root = tree.root();
        let input = tree.spawn(root, Widget::text_input());
        tree.set_input_text(input, "hello");
        with_state(&mut tree, input, |s| s.select_all());

        let mut platform = MemClipboard(None);
        let ctrl = |key| KeyPressEvent {
            key,
            modifiers: Modifiers::CTRL,
            repeat: false,
        };
        handle_key_press(&mut tree, input, &ctrl(Key::X), &mut platform);
        assert_eq!(tree.get(input).unwrap().as_text_input().unwrap().text(), "");
        assert_eq!(platform.0.as_deref(), Some("hello"));

        handle_key_press(&mut tree, input, &ctrl(Key::V), &mut platform);
        assert_eq!(
            tree.get(input).unwrap().as_text_input().unwrap().text(),
            "hello"
        );
    }
}
