//! Scroll bar: a draggable thumb over an integer range.
//!
//! The thumb rectangle is never stored; it is recomputed from
//! (value, range, page step) for every draw and hit-test, so the two can
//! never disagree. All geometry helpers take an explicit track rectangle:
//! a standalone scroll bar passes its own local rect, a scrollable panel
//! passes the strip it reserves for its embedded bars.

use cinder_ui_core::{Point, Rect};

use crate::event::{UiEvent, UiEventKind};
use crate::input::{
    Key, KeyPressEvent, MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent,
    WheelEvent,
};
use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};
use crate::widgets::Orientation;

const MIN_THUMB: i32 = 12;

/// State for a scroll bar.
#[derive(Debug, Clone)]
pub struct ScrollBarState {
    /// Thumb travel direction.
    pub orientation: Orientation,
    /// Lower bound of the range.
    pub minimum: i32,
    /// Upper bound of the range.
    pub maximum: i32,
    value: i32,
    /// Step used by track clicks and Page Up/Down. Also sets the thumb size
    /// relative to the range.
    pub page_step: i32,
    /// Step used by arrow keys and the wheel.
    pub single_step: i32,
    /// Whether the thumb is being dragged.
    pub(crate) dragging: bool,
    /// Pixel offset from the thumb origin to the grab point.
    pub(crate) drag_offset: i32,
}

impl Default for ScrollBarState {
    fn default() -> Self {
        Self::new(Orientation::Vertical)
    }
}

impl ScrollBarState {
    /// Scroll bar over 0..100 with a page step of 10.
    pub fn new(orientation: Orientation) -> Self {
        Self {
            orientation,
            minimum: 0,
            maximum: 100,
            value: 0,
            page_step: 10,
            single_step: 1,
            dragging: false,
            drag_offset: 0,
        }
    }

    /// Current value, always within `[minimum, maximum]`.
    #[inline]
    pub fn value(&self) -> i32 {
        self.value
    }

    /// Distance between the range bounds.
    #[inline]
    pub fn span(&self) -> i32 {
        self.maximum - self.minimum
    }

    /// Set the range, re-clamping the current value into it.
    pub fn set_range(&mut self, minimum: i32, maximum: i32) {
        self.minimum = minimum;
        self.maximum = maximum.max(minimum);
        self.value = self.value.clamp(self.minimum, self.maximum);
    }

    /// Store the nearest in-range value. Returns whether it changed.
    pub fn set_value(&mut self, value: i32) -> bool {
        let clamped = value.clamp(self.minimum, self.maximum);
        if clamped == self.value {
            return false;
        }
        self.value = clamped;
        true
    }

    fn axis(&self, point: Point) -> i32 {
        match self.orientation {
            Orientation::Vertical => point.y,
            Orientation::Horizontal => point.x,
        }
    }

    fn track_start(&self, track: Rect) -> i32 {
        match self.orientation {
            Orientation::Vertical => track.top(),
            Orientation::Horizontal => track.left(),
        }
    }

    fn track_length(&self, track: Rect) -> i32 {
        match self.orientation {
            Orientation::Vertical => track.height(),
            Orientation::Horizontal => track.width(),
        }
    }

    /// Length of the thumb along the travel axis. Proportional to the page
    /// step's share of the total reachable content, floored at a grabbable
    /// minimum.
    pub fn thumb_length(&self, track: Rect) -> i32 {
        let length = self.track_length(track);
        let total = self.span() + self.page_step;
        if total <= 0 {
            return length;
        }
        let proportional = (length as f32 * self.page_step as f32 / total as f32) as i32;
        proportional.clamp(MIN_THUMB.min(length), length)
    }

    /// Thumb rectangle inside `track`, in the same coordinate space.
    pub fn thumb_rect(&self, track: Rect) -> Rect {
        let thumb_len = self.thumb_length(track);
        let travel = self.track_length(track) - thumb_len;
        let span = self.span();
        let offset = if span > 0 && travel > 0 {
            (travel as f32 * (self.value - self.minimum) as f32 / span as f32).round() as i32
        } else {
            0
        };
        let pos = self.track_start(track) + offset;
        match self.orientation {
            Orientation::Vertical => Rect::new(track.left(), pos, track.width(), thumb_len),
            Orientation::Horizontal => Rect::new(pos, track.top(), thumb_len, track.height()),
        }
    }

    /// The value whose thumb origin would sit at `thumb_pos` on the travel
    /// axis. Linear interpolation over the available travel, clamped.
    pub fn value_at(&self, thumb_pos: i32, track: Rect) -> i32 {
        let travel = self.track_length(track) - self.thumb_length(track);
        if travel <= 0 {
            return self.minimum;
        }
        let offset = (thumb_pos - self.track_start(track)).clamp(0, travel);
        let value = self.minimum as f32 + self.span() as f32 * offset as f32 / travel as f32;
        (value.round() as i32).clamp(self.minimum, self.maximum)
    }

    /// Press handling shared by the standalone widget and the panel strips.
    /// `local` is in `track`'s coordinate space. Returns the new value to
    /// store, or starts a drag and returns `None`.
    pub(crate) fn begin_press(&mut self, local: Point, track: Rect) -> Option<i32> {
        let thumb = self.thumb_rect(track);
        if thumb.contains(local) {
            self.dragging = true;
            self.drag_offset = self.axis(local) - self.axis(thumb.origin);
            return None;
        }
        // Track click: page toward the pointer
        let delta = if self.axis(local) < self.axis(thumb.origin) {
            -self.page_step
        } else {
            self.page_step
        };
        Some(self.value + delta)
    }

    /// Drag tracking. Returns the value for the current pointer position, or
    /// `None` when no drag is active.
    pub(crate) fn drag_value(&self, local: Point, track: Rect) -> Option<i32> {
        if !self.dragging {
            return None;
        }
        Some(self.value_at(self.axis(local) - self.drag_offset, track))
    }
}

impl WidgetTree {
    /// Set a scroll bar's value, clamped to its range. Emits
    /// [`UiEventKind::ValueChanged`] once when the stored value changes.
    pub fn set_scroll_value(&mut self, id: WidgetId, value: i32) {
        let changed = match self.get_mut(id).and_then(|w| match &mut w.kind {
            WidgetKind::ScrollBar(state) => Some(state.set_value(value)),
            _ => None,
        }) {
            Some(changed) => changed,
            None => return,
        };
        if changed {
            let stored = self
                .get(id)
                .and_then(|w| w.as_scroll_bar())
                .map(|s| s.value())
                .unwrap_or(value);
            self.push_event(UiEvent::new(id, UiEventKind::ValueChanged(stored)));
        }
    }
}

fn local_track(tree: &WidgetTree, id: WidgetId) -> Rect {
    let size = tree.get(id).map(|w| w.size()).unwrap_or_default();
    Rect::from_origin_size(Point::ZERO, size)
}

fn to_local(tree: &WidgetTree, id: WidgetId, position: Point) -> Point {
    position - tree.absolute_origin(id)
}

pub(crate) fn handle_mouse_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MousePressEvent,
) -> bool {
    if event.button != MouseButton::Left {
        return false;
    }
    let track = local_track(tree, id);
    let local = to_local(tree, id, event.position);
    let outcome = match tree.get_mut(id).and_then(|w| w.as_scroll_bar_mut()) {
        Some(state) => state.begin_press(local, track),
        None => return false,
    };
    tree.focus(id);
    if let Some(value) = outcome {
        tree.set_scroll_value(id, value);
    }
    true
}

pub(crate) fn handle_mouse_move(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseMoveEvent,
) -> bool {
    let track = local_track(tree, id);
    let local = to_local(tree, id, event.position);
    let value = match tree.get(id).and_then(|w| w.as_scroll_bar()) {
        Some(state) => state.drag_value(local, track),
        None => None,
    };
    match value {
        Some(value) => {
            tree.set_scroll_value(id, value);
            true
        }
        None => false,
    }
}

pub(crate) fn handle_mouse_release(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseReleaseEvent,
) -> bool {
    if event.button != MouseButton::Left {
        return false;
    }
    match tree.get_mut(id).and_then(|w| w.as_scroll_bar_mut()) {
        Some(state) if state.dragging => {
            state.dragging = false;
            true
        }
        _ => false,
    }
}

pub(crate) fn handle_wheel(tree: &mut WidgetTree, id: WidgetId, event: &WheelEvent) -> bool {
    let (value, step) = match tree.get(id).and_then(|w| w.as_scroll_bar()) {
        Some(state) => (state.value(), state.single_step),
        None => return false,
    };
    // Wheel-up scrolls toward the minimum regardless of drag state
    tree.set_scroll_value(id, value - event.delta * step);
    true
}

pub(crate) fn handle_key_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &KeyPressEvent,
) -> bool {
    let state = match tree.get(id).and_then(|w| w.as_scroll_bar()) {
        Some(state) => state.clone(),
        None => return false,
    };
    let target = match event.key {
        Key::ArrowUp | Key::ArrowLeft => state.value() - state.single_step,
        Key::ArrowDown | Key::ArrowRight => state.value() + state.single_step,
        Key::PageUp => state.value() - state.page_step,
        Key::PageDown => state.value() + state.page_step,
        Key::Home => state.minimum,
        Key::End => state.maximum,
        _ => return false,
    };
    tree.set_scroll_value(id, target);
    true
}
