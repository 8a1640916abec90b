//! Widget interaction events delivered to the host.
//!
//! Instead of per-widget closure fields, widgets push typed events into a
//! queue the host drains once per frame (`UiContext::poll_events`). The
//! caller decides what a click or value change means; the toolkit only
//! reports that it happened.

use crate::widget::WidgetId;

/// A widget interaction event.
#[derive(Debug, Clone, PartialEq)]
pub struct UiEvent {
    /// The widget the event originated from.
    pub source: WidgetId,
    /// What happened.
    pub kind: UiEventKind,
}

impl UiEvent {
    pub(crate) fn new(source: WidgetId, kind: UiEventKind) -> Self {
        Self { source, kind }
    }
}

/// The kinds of interaction events widgets emit.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEventKind {
    /// A button was clicked (pressed and released inside).
    Clicked,
    /// A scroll bar or progress bar value changed. Carries the new value.
    ValueChanged(i32),
    /// Text input contents changed. Carries the new text.
    TextChanged(String),
    /// Enter was pressed in a text input. Carries the committed text.
    TextSubmitted(String),
    /// A combo box committed a new selection. Carries the new index
    /// (-1 when cleared).
    SelectionChanged(i32),
    /// The widget gained keyboard focus.
    FocusGained,
    /// The widget lost keyboard focus.
    FocusLost,
    /// A window's close button or Escape asked it to close. Emitted whether
    /// or not the close was vetoed.
    WindowCloseRequested,
    /// A window was hidden by its close path.
    WindowHidden,
}
