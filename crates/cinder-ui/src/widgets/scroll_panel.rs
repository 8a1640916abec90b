//! Scrollable clipping panel.
//!
//! The panel never moves its children. At draw time it pushes a clip
//! rectangle and shifts the child origin by (-scroll x, -scroll y); the
//! stored child rectangles stay untouched, so layout and scrolling cannot
//! fight each other. The two scroll bars are embedded [`ScrollBarState`]
//! values sharing the standalone bar's thumb geometry, not child widgets.

use cinder_ui_core::{Point, Rect, Size};

use crate::input::{MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent, WheelEvent};
use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};
use crate::widgets::scroll_bar::ScrollBarState;
use crate::widgets::Orientation;

const WHEEL_STEP: i32 = 20;

/// State for a scrollable panel.
#[derive(Debug, Clone)]
pub struct ScrollPanelState {
    /// Horizontal bar along the bottom edge.
    pub horizontal: ScrollBarState,
    /// Vertical bar along the right edge.
    pub vertical: ScrollBarState,
    /// Bar strip thickness in pixels.
    pub bar_thickness: i32,
    /// The bar strip a press landed in, for routing the following drag.
    pressed_bar: Option<Orientation>,
}

impl Default for ScrollPanelState {
    fn default() -> Self {
        let mut horizontal = ScrollBarState::new(Orientation::Horizontal);
        horizontal.set_range(0, 0);
        horizontal.single_step = WHEEL_STEP;
        let mut vertical = ScrollBarState::new(Orientation::Vertical);
        vertical.set_range(0, 0);
        vertical.single_step = WHEEL_STEP;
        Self {
            horizontal,
            vertical,
            bar_thickness: 12,
            pressed_bar: None,
        }
    }
}

impl ScrollPanelState {
    /// Current horizontal scroll offset in pixels.
    #[inline]
    pub fn scroll_x(&self) -> i32 {
        self.horizontal.value()
    }

    /// Current vertical scroll offset in pixels.
    #[inline]
    pub fn scroll_y(&self) -> i32 {
        self.vertical.value()
    }

    /// Whether the vertical bar has anything to scroll.
    #[inline]
    pub fn vertical_needed(&self) -> bool {
        self.vertical.span() > 0
    }

    /// Whether the horizontal bar has anything to scroll.
    #[inline]
    pub fn horizontal_needed(&self) -> bool {
        self.horizontal.span() > 0
    }

    /// The strip reserved for the vertical bar, in local coordinates.
    pub fn vertical_track(&self, size: Size) -> Rect {
        let bottom_inset = if self.horizontal_needed() {
            self.bar_thickness
        } else {
            0
        };
        Rect::new(
            size.width - self.bar_thickness,
            0,
            self.bar_thickness,
            (size.height - bottom_inset).max(0),
        )
    }

    /// The strip reserved for the horizontal bar, in local coordinates.
    pub fn horizontal_track(&self, size: Size) -> Rect {
        let right_inset = if self.vertical_needed() {
            self.bar_thickness
        } else {
            0
        };
        Rect::new(
            0,
            size.height - self.bar_thickness,
            (size.width - right_inset).max(0),
            self.bar_thickness,
        )
    }

    /// The clipped content viewport, in local coordinates.
    pub fn viewport(&self, size: Size) -> Rect {
        let right = if self.vertical_needed() {
            self.bar_thickness
        } else {
            0
        };
        let bottom = if self.horizontal_needed() {
            self.bar_thickness
        } else {
            0
        };
        Rect::new(
            0,
            0,
            (size.width - right).max(0),
            (size.height - bottom).max(0),
        )
    }
}

/// Recompute both bar ranges from the children's maximum extents against
/// the viewport. Called whenever geometry changes under the panel.
pub(crate) fn refresh_ranges(tree: &mut WidgetTree, id: WidgetId) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    let size = widget.content_rect().size;
    let mut extent = Size::ZERO;
    for &child in widget.children() {
        if let Some(child_widget) = tree.get(child) {
            extent.width = extent.width.max(child_widget.rect.right());
            extent.height = extent.height.max(child_widget.rect.bottom());
        }
    }

    if let Some(state) = tree.get_mut(id).and_then(|w| match &mut w.kind {
        WidgetKind::ScrollPanel(state) => Some(state),
        _ => None,
    }) {
        // Overflow on one axis shrinks the viewport of the other, so settle
        // the ranges in two rounds.
        for _ in 0..2 {
            let viewport = state.viewport(size);
            state
                .vertical
                .set_range(0, (extent.height - viewport.height()).max(0));
            state
                .horizontal
                .set_range(0, (extent.width - viewport.width()).max(0));
            state.vertical.page_step = viewport.height().max(1);
            state.horizontal.page_step = viewport.width().max(1);
        }
    }
}

fn with_state<R>(
    tree: &mut WidgetTree,
    id: WidgetId,
    f: impl FnOnce(&mut ScrollPanelState) -> R,
) -> Option<R> {
    tree.get_mut(id).and_then(|w| match &mut w.kind {
        WidgetKind::ScrollPanel(state) => Some(f(state)),
        _ => None,
    })
}

pub(crate) fn handle_mouse_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MousePressEvent,
) -> bool {
    if event.button != MouseButton::Left {
        return false;
    }
    let local = event.position - tree.absolute_origin(id);
    let size = match tree.get(id) {
        Some(w) => w.size(),
        None => return false,
    };
    with_state(tree, id, |state| {
        if state.vertical_needed() {
            let track = state.vertical_track(size);
            if track.contains(local) {
                state.pressed_bar = Some(Orientation::Vertical);
                if let Some(value) = state.vertical.begin_press(local, track) {
                    state.vertical.set_value(value);
                }
                return true;
            }
        }
        if state.horizontal_needed() {
            let track = state.horizontal_track(size);
            if track.contains(local) {
                state.pressed_bar = Some(Orientation::Horizontal);
                if let Some(value) = state.horizontal.begin_press(local, track) {
                    state.horizontal.set_value(value);
                }
                return true;
            }
        }
        false
    })
    .unwrap_or(false)
}

pub(crate) fn handle_mouse_move(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseMoveEvent,
) -> bool {
    let local = event.position - tree.absolute_origin(id);
    let size = match tree.get(id) {
        Some(w) => w.size(),
        None => return false,
    };
    with_state(tree, id, |state| match state.pressed_bar {
        Some(Orientation::Vertical) => {
            let track = state.vertical_track(size);
            if let Some(value) = state.vertical.drag_value(local, track) {
                state.vertical.set_value(value);
            }
            true
        }
        Some(Orientation::Horizontal) => {
            let track = state.horizontal_track(size);
            if let Some(value) = state.horizontal.drag_value(local, track) {
                state.horizontal.set_value(value);
            }
            true
        }
        None => false,
    })
    .unwrap_or(false)
}

pub(crate) fn handle_mouse_release(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseReleaseEvent,
) -> bool {
    if event.button != MouseButton::Left {
        return false;
    }
    with_state(tree, id, |state| {
        let had_press = state.pressed_bar.is_some();
        state.pressed_bar = None;
        state.vertical.dragging = false;
        state.horizontal.dragging = false;
        had_press
    })
    .unwrap_or(false)
}

pub(crate) fn handle_wheel(tree: &mut WidgetTree, id: WidgetId, event: &WheelEvent) -> bool {
    with_state(tree, id, |state| {
        if !state.vertical_needed() {
            return false;
        }
        let target = state.vertical.value() - event.delta * state.vertical.single_step;
        state.vertical.set_value(target);
        true
    })
    .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Modifiers;
    use crate::widget::Widget;

    fn panel_with_tall_child(tree: &mut WidgetTree) -> WidgetId {
        let root = tree.root();
        let panel = tree.spawn(root, Widget::scroll_panel().with_rect(0, 0, 100, 100));
        tree.spawn(panel, Widget::panel().with_rect(0, 0, 80, 400));
        panel
    }

    #[test]
    fn test_ranges_follow_child_extents() {
        let mut tree = WidgetTree::new();
        let panel = panel_with_tall_child(&mut tree);

        let state = tree.get(panel).unwrap().as_scroll_panel().unwrap();
        assert!(state.vertical_needed());
        assert!(!state.horizontal_needed());
        // 400 of content in a 100-tall viewport
        assert_eq!(state.vertical.maximum, 300);
        assert_eq!(state.vertical.page_step, 100);
    }

    #[test]
    fn test_small_content_needs_no_bars() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let panel = tree.spawn(root, Widget::scroll_panel().with_rect(0, 0, 100, 100));
        tree.spawn(panel, Widget::panel().with_rect(0, 0, 50, 50));

        let state = tree.get(panel).unwrap().as_scroll_panel().unwrap();
        assert!(!state.vertical_needed());
        assert!(!state.horizontal_needed());
    }

    #[test]
    fn test_wheel_scrolls_and_clamps() {
        let mut tree = WidgetTree::new();
        let panel = panel_with_tall_child(&mut tree);

        let wheel = |delta| WheelEvent {
            position: Point::new(50, 50),
            delta,
            modifiers: Modifiers::NONE,
        };
        assert!(handle_wheel(&mut tree, panel, &wheel(-1)));
        assert_eq!(
            tree.get(panel).unwrap().as_scroll_panel().unwrap().scroll_y(),
            20
        );

        // Scrolling past the top clamps to zero
        handle_wheel(&mut tree, panel, &wheel(5));
        assert_eq!(
            tree.get(panel).unwrap().as_scroll_panel().unwrap().scroll_y(),
            0
        );
    }

    #[test]
    fn test_press_in_bar_strip_is_swallowed() {
        let mut tree = WidgetTree::new();
        let panel = panel_with_tall_child(&mut tree);

        let press = MousePressEvent {
            position: Point::new(95, 95),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        };
        assert!(handle_mouse_press(&mut tree, panel, &press));

        // Content-area presses fall through to children
        let press = MousePressEvent {
            position: Point::new(40, 40),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        };
        assert!(!handle_mouse_press(&mut tree, panel, &press));
    }
}
