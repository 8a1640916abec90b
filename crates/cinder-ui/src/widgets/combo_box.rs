//! Drop-down option picker.
//!
//! Two states: closed (draws the current option) and open (draws a dropdown
//! list below the box). While open, Up/Down move a hover cursor that is
//! independent of the committed selection; Enter or a row click commits,
//! Escape or a click anywhere else closes without committing. The open
//! dropdown is tracked by the tree (`open_combo`) so the context can give
//! it first claim on pointer presses.

use crate::event::{UiEvent, UiEventKind};
use crate::input::{Key, KeyPressEvent, MouseButton, MousePressEvent};
use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};
use cinder_ui_core::{Point, Rect, Size};

/// State for a combo box.
#[derive(Debug, Clone)]
pub struct ComboBoxState {
    options: Vec<String>,
    current_index: i32,
    /// Whether the dropdown is showing.
    pub(crate) open: bool,
    /// Hover cursor inside the open dropdown.
    pub(crate) hover_index: i32,
    /// Height of one dropdown row in pixels.
    pub row_height: i32,
}

impl Default for ComboBoxState {
    fn default() -> Self {
        Self::new()
    }
}

impl ComboBoxState {
    /// Empty combo box with no selection.
    pub fn new() -> Self {
        Self {
            options: Vec::new(),
            current_index: -1,
            open: false,
            hover_index: -1,
            row_height: 20,
        }
    }

    /// The selectable options in display order.
    #[inline]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The committed selection index, -1 when nothing is selected.
    #[inline]
    pub fn current_index(&self) -> i32 {
        self.current_index
    }

    /// The committed option text, if any.
    pub fn current_option(&self) -> Option<&str> {
        usize::try_from(self.current_index)
            .ok()
            .and_then(|i| self.options.get(i))
            .map(String::as_str)
    }

    /// Append an option. The first option added to an empty box is
    /// auto-selected.
    pub fn add_option(&mut self, text: impl Into<String>) {
        self.options.push(text.into());
        if self.current_index < 0 {
            self.current_index = 0;
        }
    }

    /// Remove all options and clear the selection.
    pub fn clear_options(&mut self) {
        self.options.clear();
        self.current_index = -1;
        self.open = false;
    }

    /// Set the committed index. Values outside `[-1, option count - 1]`
    /// leave the index unchanged. Returns whether it changed.
    pub fn set_current_index(&mut self, index: i32) -> bool {
        if index < -1 || index >= self.options.len() as i32 {
            return false;
        }
        if index == self.current_index {
            return false;
        }
        self.current_index = index;
        true
    }

    /// Open the dropdown. Refused for an empty option list.
    pub(crate) fn open_dropdown(&mut self) -> bool {
        if self.options.is_empty() {
            return false;
        }
        self.open = true;
        self.hover_index = self.current_index.max(0);
        true
    }

    /// The dropdown rectangle in local coordinates, directly below the box.
    pub fn dropdown_rect(&self, size: Size) -> Rect {
        Rect::new(
            0,
            size.height,
            size.width,
            self.row_height * self.options.len() as i32,
        )
    }

    /// The dropdown row index under a local point, if any.
    pub fn row_at(&self, local: Point, size: Size) -> Option<usize> {
        if !self.open || !self.dropdown_rect(size).contains(local) {
            return None;
        }
        let row = (local.y - size.height) / self.row_height;
        (row >= 0 && (row as usize) < self.options.len()).then_some(row as usize)
    }
}

fn with_state<R>(
    tree: &mut WidgetTree,
    id: WidgetId,
    f: impl FnOnce(&mut ComboBoxState) -> R,
) -> Option<R> {
    tree.get_mut(id).and_then(|w| match &mut w.kind {
        WidgetKind::ComboBox(state) => Some(f(state)),
        _ => None,
    })
}

/// Commit a selection and emit [`UiEventKind::SelectionChanged`] if the
/// index actually changed.
pub(crate) fn commit_index(tree: &mut WidgetTree, id: WidgetId, index: i32) {
    let changed = with_state(tree, id, |state| state.set_current_index(index)).unwrap_or(false);
    if changed {
        tree.push_event(UiEvent::new(id, UiEventKind::SelectionChanged(index)));
    }
}

fn close(tree: &mut WidgetTree, id: WidgetId) {
    with_state(tree, id, |state| state.open = false);
    if tree.open_combo == Some(id) {
        tree.open_combo = None;
    }
}

/// Press routing while this combo box's dropdown is open. The context calls
/// this before normal hit-testing. Returns `true` when the press was
/// consumed (a row was committed or the press landed on the box itself);
/// `false` closes the dropdown and lets the press route normally.
pub(crate) fn handle_open_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MousePressEvent,
) -> bool {
    let local = event.position - tree.absolute_origin(id);
    let size = match tree.get(id) {
        Some(w) => w.size(),
        None => return false,
    };
    let row = tree
        .get(id)
        .and_then(|w| w.as_combo_box())
        .and_then(|s| s.row_at(local, size));

    if let Some(row) = row {
        commit_index(tree, id, row as i32);
        close(tree, id);
        return true;
    }
    // Anywhere else closes without committing; presses on the box itself
    // are consumed so they do not immediately re-open it.
    close(tree, id);
    Rect::from_origin_size(Point::ZERO, size).contains(local)
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
    let opened = with_state(tree, id, |state| state.open_dropdown()).unwrap_or(false);
    if opened {
        tree.open_combo = Some(id);
    }
    true
}

pub(crate) fn handle_key_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &KeyPressEvent,
) -> bool {
    let (open, hover, count) = match tree.get(id).and_then(|w| w.as_combo_box()) {
        Some(state) => (state.open, state.hover_index, state.options.len() as i32),
        None => return false,
    };

    if !open {
        // Closed box: Enter or Down opens
        if matches!(event.key, Key::Enter | Key::ArrowDown) {
            let opened = with_state(tree, id, |state| state.open_dropdown()).unwrap_or(false);
            if opened {
                tree.open_combo = Some(id);
            }
            return opened;
        }
        return false;
    }

    match event.key {
        Key::ArrowUp => {
            with_state(tree, id, |state| {
                state.hover_index = (hover - 1).max(0);
            });
            true
        }
        Key::ArrowDown => {
            with_state(tree, id, |state| {
                state.hover_index = (hover + 1).min(count - 1);
            });
            true
        }
        Key::Enter => {
            commit_index(tree, id, hover);
            close(tree, id);
            true
        }
        Key::Escape => {
            close(tree, id);
            true
        }
        _ => false,
    }
}
