//! Push button.

use cinder_ui_core::Color;

use crate::event::{UiEvent, UiEventKind};
use crate::input::{MouseButton, MousePressEvent, MouseReleaseEvent};
use crate::widget::tree::WidgetTree;
use crate::widget::WidgetId;

/// State for a clickable push button.
///
/// A click is a left press inside the button followed by a release that is
/// still inside it; releasing outside cancels without an event.
#[derive(Debug, Clone)]
pub struct ButtonState {
    /// Caption text.
    pub text: String,
    /// Caption color.
    pub text_color: Color,
    /// Font size in pixels.
    pub font_size: i32,
}

impl Default for ButtonState {
    fn default() -> Self {
        Self {
            text: String::new(),
            text_color: Color::WHITE,
            font_size: 14,
        }
    }
}

impl ButtonState {
    /// Button with the given caption and default style.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
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
    if let Some(widget) = tree.get_mut(id) {
        widget.pressed = true;
    }
    tree.focus(id);
    true
}

pub(crate) fn handle_mouse_release(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseReleaseEvent,
) -> bool {
    if event.button != MouseButton::Left {
        return false;
    }
    let was_pressed = tree.get(id).map(|w| w.pressed).unwrap_or(false);
    if !was_pressed {
        return false;
    }
    if let Some(widget) = tree.get_mut(id) {
        widget.pressed = false;
    }
    if tree.absolute_rect(id).contains(event.position) {
        tree.push_event(UiEvent::new(id, UiEventKind::Clicked));
    }
    true
}
