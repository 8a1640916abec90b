//! Movable, resizable, closeable window.
//!
//! Pointer position at press time selects a drag mode: the title bar moves
//! the window, an 8px border strip resizes it in one of eight directions.
//! Resizing from a leading edge moves the origin so the opposite edge stays
//! fixed, and every mode clamps to the min/max size limits. Closing hides
//! the window, it never destroys it; an optional callback can veto the
//! close.

use cinder_ui_core::{Point, Rect, Size};

use crate::event::{UiEvent, UiEventKind};
use crate::input::{Key, KeyPressEvent, MouseButton, MouseMoveEvent, MousePressEvent, MouseReleaseEvent};
use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};

/// Width of the resize-sensitive border strip.
const RESIZE_BORDER: i32 = 8;

/// What a pointer drag is currently doing to the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragMode {
    /// No drag in progress.
    #[default]
    None,
    /// Title-bar drag moving the whole window.
    Move,
    /// Resizing by the named edge or corner.
    ResizeLeft,
    ResizeRight,
    ResizeTop,
    ResizeBottom,
    ResizeTopLeft,
    ResizeTopRight,
    ResizeBottomLeft,
    ResizeBottomRight,
}

/// Decision callback run before a window hides; returning `false` keeps it
/// open.
pub type CloseCallback = Box<dyn FnMut() -> bool>;

/// State for a window.
pub struct WindowState {
    /// Title bar text.
    pub title: String,
    /// Whether the title bar moves the window.
    pub draggable: bool,
    /// Whether the border strip resizes the window.
    pub resizable: bool,
    /// Whether the close button is shown and Escape closes.
    pub closeable: bool,
    /// Smallest allowed size.
    pub min_size: Size,
    /// Largest allowed size.
    pub max_size: Size,
    /// Title bar height in pixels.
    pub title_bar_height: i32,
    /// Veto hook consulted by the close path.
    pub on_close: Option<CloseCallback>,

    pub(crate) drag: DragMode,
    drag_start_pointer: Point,
    drag_start_rect: Rect,
}

impl std::fmt::Debug for WindowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowState")
            .field("title", &self.title)
            .field("draggable", &self.draggable)
            .field("resizable", &self.resizable)
            .field("closeable", &self.closeable)
            .field("min_size", &self.min_size)
            .field("max_size", &self.max_size)
            .field("drag", &self.drag)
            .finish_non_exhaustive()
    }
}

impl Default for WindowState {
    fn default() -> Self {
        Self {
            title: String::new(),
            draggable: true,
            resizable: true,
            closeable: true,
            min_size: Size::new(80, 40),
            max_size: Size::new(i32::MAX, i32::MAX),
            title_bar_height: 24,
            on_close: None,
            drag: DragMode::None,
            drag_start_pointer: Point::ZERO,
            drag_start_rect: Rect::ZERO,
        }
    }
}

impl WindowState {
    /// Window state with a title and default behavior flags.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// The title bar rectangle in local coordinates.
    pub fn title_bar_rect(&self, size: Size) -> Rect {
        Rect::new(0, 0, size.width, self.title_bar_height)
    }

    /// The close button rectangle in local coordinates.
    pub fn close_button_rect(&self, size: Size) -> Rect {
        let side = self.title_bar_height - 8;
        Rect::new(size.width - side - 4, 4, side, side)
    }

    /// Pick the drag mode for a press at `local`, honoring the behavior
    /// flags. Resize edges take priority over the title bar so corner grabs
    /// near the bar still resize.
    pub fn hit_drag_mode(&self, local: Point, size: Size) -> DragMode {
        if self.resizable {
            let left = local.x < RESIZE_BORDER;
            let right = local.x >= size.width - RESIZE_BORDER;
            let top = local.y < RESIZE_BORDER;
            let bottom = local.y >= size.height - RESIZE_BORDER;
            let mode = match (left, right, top, bottom) {
                (true, _, true, _) => DragMode::ResizeTopLeft,
                (_, true, true, _) => DragMode::ResizeTopRight,
                (true, _, _, true) => DragMode::ResizeBottomLeft,
                (_, true, _, true) => DragMode::ResizeBottomRight,
                (true, _, _, _) => DragMode::ResizeLeft,
                (_, true, _, _) => DragMode::ResizeRight,
                (_, _, true, _) => DragMode::ResizeTop,
                (_, _, _, true) => DragMode::ResizeBottom,
                _ => DragMode::None,
            };
            if mode != DragMode::None {
                return mode;
            }
        }
        if self.draggable && self.title_bar_rect(size).contains(local) {
            return DragMode::Move;
        }
        DragMode::None
    }

    /// The window rectangle for a pointer drag of `delta` from the press
    /// position, clamped to the size limits. Leading-edge resizes keep the
    /// opposite edge fixed.
    pub fn dragged_rect(&self, delta: Point) -> Rect {
        let start = self.drag_start_rect;
        let mut rect = start;
        let clamp_w = |w: i32| w.clamp(self.min_size.width, self.max_size.width);
        let clamp_h = |h: i32| h.clamp(self.min_size.height, self.max_size.height);

        let resize_left = |rect: &mut Rect| {
            rect.size.width = clamp_w(start.width() - delta.x);
            rect.origin.x = start.right() - rect.size.width;
        };
        let resize_right = |rect: &mut Rect| {
            rect.size.width = clamp_w(start.width() + delta.x);
        };
        let resize_top = |rect: &mut Rect| {
            rect.size.height = clamp_h(start.height() - delta.y);
            rect.origin.y = start.bottom() - rect.size.height;
        };
        let resize_bottom = |rect: &mut Rect| {
            rect.size.height = clamp_h(start.height() + delta.y);
        };

        match self.drag {
            DragMode::None => {}
            DragMode::Move => {
                rect.origin = start.origin + delta;
            }
            DragMode::ResizeLeft => resize_left(&mut rect),
            DragMode::ResizeRight => resize_right(&mut rect),
            DragMode::ResizeTop => resize_top(&mut rect),
            DragMode::ResizeBottom => resize_bottom(&mut rect),
            DragMode::ResizeTopLeft => {
                resize_left(&mut rect);
                resize_top(&mut rect);
            }
            DragMode::ResizeTopRight => {
                resize_right(&mut rect);
                resize_top(&mut rect);
            }
            DragMode::ResizeBottomLeft => {
                resize_left(&mut rect);
                resize_bottom(&mut rect);
            }
            DragMode::ResizeBottomRight => {
                resize_right(&mut rect);
                resize_bottom(&mut rect);
            }
        }
        rect
    }
}

fn with_state<R>(
    tree: &mut WidgetTree,
    id: WidgetId,
    f: impl FnOnce(&mut WindowState) -> R,
) -> Option<R> {
    tree.get_mut(id).and_then(|w| match &mut w.kind {
        WidgetKind::Window(state) => Some(f(state)),
        _ => None,
    })
}

/// Clamp the window rectangle into its size limits. Run at attach time so a
/// markup-built window never starts below its minimum.
pub(crate) fn clamp_to_limits(tree: &mut WidgetTree, id: WidgetId) {
    let clamped = match tree.get(id) {
        Some(widget) => match widget.as_window() {
            Some(state) => {
                let mut rect = widget.rect;
                rect.size.width = rect.size.width.clamp(state.min_size.width, state.max_size.width);
                rect.size.height = rect
                    .size
                    .height
                    .clamp(state.min_size.height, state.max_size.height);
                (rect != widget.rect).then_some(rect)
            }
            None => None,
        },
        None => None,
    };
    if let Some(rect) = clamped {
        tree.set_rect(id, rect);
    }
}

/// Ask a window to close. Emits `WindowCloseRequested`, consults the veto
/// callback, and hides (never destroys) the window unless vetoed.
pub fn request_close(tree: &mut WidgetTree, id: WidgetId) {
    if !matches!(tree.get(id).map(|w| &w.kind), Some(WidgetKind::Window(_))) {
        return;
    }
    tree.push_event(UiEvent::new(id, UiEventKind::WindowCloseRequested));

    // Take the callback out so it can borrow the tree-free state
    let mut callback = with_state(tree, id, |state| state.on_close.take()).flatten();
    let allow = callback.as_mut().map(|cb| cb()).unwrap_or(true);
    with_state(tree, id, |state| state.on_close = callback);

    if allow {
        tree.set_visible(id, false);
        tree.push_event(UiEvent::new(id, UiEventKind::WindowHidden));
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
    let local = event.position - tree.absolute_origin(id);
    let (size, rect) = match tree.get(id) {
        Some(w) => (w.size(), w.rect),
        None => return false,
    };
    tree.focus(id);

    let close_hit = tree
        .get(id)
        .and_then(|w| w.as_window())
        .map(|s| s.closeable && s.close_button_rect(size).contains(local))
        .unwrap_or(false);
    if close_hit {
        request_close(tree, id);
        return true;
    }

    with_state(tree, id, |state| {
        let mode = state.hit_drag_mode(local, size);
        if mode != DragMode::None {
            state.drag = mode;
            state.drag_start_pointer = event.position;
            state.drag_start_rect = rect;
        }
    });

    // The press is consumed even without a drag so clicks on the window body
    // do not fall through to whatever is behind it
    true
}

pub(crate) fn handle_mouse_move(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &MouseMoveEvent,
) -> bool {
    let rect = match tree.get(id).and_then(|w| w.as_window()) {
        Some(state) if state.drag != DragMode::None => {
            let delta = event.position - state.drag_start_pointer;
            state.dragged_rect(delta)
        }
        _ => return false,
    };
    tree.set_rect(id, rect);
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
    with_state(tree, id, |state| {
        let had_drag = state.drag != DragMode::None;
        state.drag = DragMode::None;
        had_drag
    })
    .unwrap_or(false)
}

pub(crate) fn handle_key_press(
    tree: &mut WidgetTree,
    id: WidgetId,
    event: &KeyPressEvent,
) -> bool {
    if event.key != Key::Escape {
        return false;
    }
    let closeable = tree
        .get(id)
        .and_then(|w| w.as_window())
        .map(|s| s.closeable)
        .unwrap_or(false);
    if !closeable {
        return false;
    }
    request_close(tree, id);
    true
}
