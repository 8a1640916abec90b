//! Event routing through the widget tree.
//!
//! Pointer events descend toward the widget under the cursor: each level
//! finds its topmost visible hit child and delegates, and only handles the
//! event itself when no child consumed it. Keyboard and text events follow
//! the focused-child chain instead. Disabled or hidden widgets drop events
//! for their whole subtree. Every function returns whether the event was
//! consumed.

use cinder_ui_core::logging::targets;
use tracing::trace;

use crate::backend::Platform;
use crate::input::{
    KeyPressEvent, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, TextInputEvent, WheelEvent,
};
use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};
use crate::widgets;

fn hit_child(tree: &WidgetTree, id: WidgetId, position: cinder_ui_core::Point) -> Option<WidgetId> {
    let widget = tree.get(id)?;
    widget
        .children()
        .iter()
        .rev()
        .copied()
        .find(|&child| {
            tree.get(child)
                .map(|c| c.visible && tree.absolute_rect(child).contains(position))
                .unwrap_or(false)
        })
}

/// Route a mouse press toward the widget under the pointer. Returns the
/// widget that consumed it, so the caller can track the pressed widget.
pub(crate) fn dispatch_mouse_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MousePressEvent,
) -> Option<WidgetId> {
    let widget = tree.get(id)?;
    if !widget.visible || !widget.enabled {
        return None;
    }

    if let Some(child) = hit_child(tree, id, event.position) {
        if let Some(handler) = dispatch_mouse_press(tree, child, event) {
            return Some(handler);
        }
    }

    let handled = match tree.get(id).map(|w| &w.kind) {
        Some(WidgetKind::Button(_)) => widgets::button::handle_mouse_press(tree, id, event),
        Some(WidgetKind::TextInput(_)) => widgets::text_input::handle_mouse_press(tree, id, event),
        Some(WidgetKind::ScrollBar(_)) => widgets::scroll_bar::handle_mouse_press(tree, id, event),
        Some(WidgetKind::ScrollPanel(_)) => {
            widgets::scroll_panel::handle_mouse_press(tree, id, event)
        }
        Some(WidgetKind::ComboBox(_)) => widgets::combo_box::handle_mouse_press(tree, id, event),
        Some(WidgetKind::Window(_)) => widgets::window::handle_mouse_press(tree, id, event),
        _ => false,
    };
    if handled {
        trace!(target: targets::INPUT, widget = ?id, "mouse press consumed");
        Some(id)
    } else {
        None
    }
}

/// Deliver a mouse release directly to the widget that consumed the press.
pub(crate) fn deliver_mouse_release(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseReleaseEvent,
) -> bool {
    match tree.get(id).map(|w| &w.kind) {
        Some(WidgetKind::Button(_)) => widgets::button::handle_mouse_release(tree, id, event),
        Some(WidgetKind::ScrollBar(_)) => {
            widgets::scroll_bar::handle_mouse_release(tree, id, event)
        }
        Some(WidgetKind::ScrollPanel(_)) => {
            widgets::scroll_panel::handle_mouse_release(tree, id, event)
        }
        Some(WidgetKind::Window(_)) => widgets::window::handle_mouse_release(tree, id, event),
        _ => false,
    }
}

/// Deliver a mouse move directly to the widget that consumed the press
/// (drag tracking).
pub(crate) fn deliver_mouse_move(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseMoveEvent,
) -> bool {
    match tree.get(id).map(|w| &w.kind) {
        Some(WidgetKind::ScrollBar(_)) => widgets::scroll_bar::handle_mouse_move(tree, id, event),
        Some(WidgetKind::ScrollPanel(_)) => {
            widgets::scroll_panel::handle_mouse_move(tree, id, event)
        }
        Some(WidgetKind::Window(_)) => widgets::window::handle_mouse_move(tree, id, event),
        _ => false,
    }
}

/// Route a wheel event toward the widget under the pointer.
pub(crate) fn dispatch_wheel(tree: &mut WidgetTree, id: WidgetId, event: &WheelEvent) -> bool {
    let Some(widget) = tree.get(id) else {
        return false;
    };
    if !widget.visible || !widget.enabled {
        return false;
    }

    if let Some(child) = hit_child(tree, id, event.position) {
        if dispatch_wheel(tree, child, event) {
            return true;
        }
    }

    match tree.get(id).map(|w| &w.kind) {
        Some(WidgetKind::ScrollBar(_)) => widgets::scroll_bar::handle_wheel(tree, id, event),
        Some(WidgetKind::ScrollPanel(_)) => widgets::scroll_panel::handle_wheel(tree, id, event),
        _ => false,
    }
}

/// Route a key press down the focused-child chain; the deepest focused
/// widget gets first claim, ancestors may handle what it ignores.
pub(crate) fn dispatch_key_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &KeyPressEvent,
    platform: &mut dyn Platform,
) -> bool {
    let Some(widget) = tree.get(id) else {
        return false;
    };
    if !widget.visible || !widget.enabled {
        return false;
    }

    if let Some(focused) = tree.focused_child(id) {
        if dispatch_key_press(tree, focused, event, platform) {
            return true;
        }
    }

    match tree.get(id).map(|w| &w.kind) {
        Some(WidgetKind::TextInput(_)) => {
            widgets::text_input::handle_key_press(tree, id, event, platform)
        }
        Some(WidgetKind::ScrollBar(_)) => widgets::scroll_bar::handle_key_press(tree, id, event),
        Some(WidgetKind::ComboBox(_)) => widgets::combo_box::handle_key_press(tree, id, event),
        Some(WidgetKind::Window(_)) => widgets::window::handle_key_press(tree, id, event),
        _ => false,
    }
}

/// Route committed text down the focused-child chain.
pub(crate) fn dispatch_text_input(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &TextInputEvent,
) -> bool {
    let Some(widget) = tree.get(id) else {
        return false;
    };
    if !widget.visible || !widget.enabled {
        return false;
    }

    if let Some(focused) = tree.focused_child(id) {
        if dispatch_text_input(tree, focused, event) {
            return true;
        }
    }

    match tree.get(id).map(|w| &w.kind) {
        Some(WidgetKind::TextInput(_)) => {
            widgets::text_input::handle_text_input(tree, id, event)
        }
        _ => false,
    }
}
