//! The widget node model.
//!
//! A [`Widget`] is one node in the UI tree: geometry, style, state flags,
//! and a [`WidgetKind`] carrying the behavior-specific state. Nodes live in
//! a [`WidgetTree`](tree::WidgetTree) arena and refer to each other through
//! [`WidgetId`] keys; the parent reference is a non-owning back-reference,
//! so ownership flows strictly down the tree.

pub mod tree;

use cinder_ui_core::{Color, Edges, Point, Rect, Size};
use slotmap::new_key_type;

use crate::backend::TextureHandle;
use crate::layout::anchor::Anchor;
use crate::layout::LayoutMode;
use crate::widgets::button::ButtonState;
use crate::widgets::combo_box::ComboBoxState;
use crate::widgets::label::LabelState;
use crate::widgets::progress_bar::ProgressBarState;
use crate::widgets::scroll_bar::ScrollBarState;
use crate::widgets::scroll_panel::ScrollPanelState;
use crate::widgets::text_input::TextInputState;
use crate::widgets::window::WindowState;

new_key_type! {
    /// Arena key identifying a widget. Stale keys (for destroyed widgets)
    /// simply fail lookups; they are never reused for live widgets'
    /// observable identity within a frame.
    pub struct WidgetId;
}

/// Behavior-specific widget state. One variant per widget type; the set is
/// closed on purpose — dispatch is a `match`, not a vtable.
#[derive(Debug, Default)]
pub enum WidgetKind {
    /// Plain container with no behavior of its own.
    #[default]
    Panel,
    /// Static text.
    Label(LabelState),
    /// Clickable push button.
    Button(ButtonState),
    /// Single-line text editor.
    TextInput(TextInputState),
    /// Read-only value display.
    ProgressBar(ProgressBarState),
    /// Draggable slider over an integer range.
    ScrollBar(ScrollBarState),
    /// Clipping viewport over oversized content.
    ScrollPanel(ScrollPanelState),
    /// Drop-down option picker.
    ComboBox(ComboBoxState),
    /// Movable, resizable, closeable window.
    Window(WindowState),
}

impl WidgetKind {
    /// The type name used by the factory registry and the markup loader.
    pub fn type_name(&self) -> &'static str {
        match self {
            WidgetKind::Panel => "Panel",
            WidgetKind::Label(_) => "Label",
            WidgetKind::Button(_) => "Button",
            WidgetKind::TextInput(_) => "TextInput",
            WidgetKind::ProgressBar(_) => "ProgressBar",
            WidgetKind::ScrollBar(_) => "ScrollBar",
            WidgetKind::ScrollPanel(_) => "ScrollablePanel",
            WidgetKind::ComboBox(_) => "ComboBox",
            WidgetKind::Window(_) => "Window",
        }
    }
}

/// A node in the UI tree.
///
/// The local rectangle is relative to the parent's *content area* (its
/// rectangle shifted by its left/top padding). Children are stored in paint
/// and hit-test order: last is topmost.
#[derive(Debug)]
pub struct Widget {
    /// Identifier used by markup `id:` and anchor targets. Uniqueness within
    /// a lookup scope is conventional, not enforced.
    pub name: String,
    /// Local rectangle relative to the parent content area.
    pub rect: Rect,
    /// Outer spacing consumed by stacking layouts.
    pub margin: Edges,
    /// Content-origin shift applied to all children.
    pub padding: Edges,
    /// Hidden widgets draw nothing and never hit-test.
    pub visible: bool,
    /// Disabled widgets ignore input but still draw.
    pub enabled: bool,
    /// Keyboard focus flag; at most one focused child per parent.
    pub focused: bool,
    /// Monotonic teardown flag.
    pub destroyed: bool,
    /// Pointer-over transient flag.
    pub hovered: bool,
    /// Button-down transient flag.
    pub pressed: bool,
    /// Background fill; transparent draws nothing.
    pub background: Color,
    /// Optional background image, stretched over the widget rect.
    pub background_image: Option<TextureHandle>,
    /// Border color; transparent or zero width draws nothing.
    pub border_color: Color,
    /// Border stroke width in pixels.
    pub border_width: i32,
    /// Border corner radius, forwarded to the renderer as-is.
    pub border_radius: i32,
    /// 0..1 opacity multiplier applied to this widget and its subtree.
    pub opacity: f32,
    /// How this widget positions its direct children.
    pub layout: LayoutMode,
    /// Anchor constraints positioning this widget within its parent.
    pub anchors: Vec<Anchor>,
    /// Behavior-specific state.
    pub kind: WidgetKind,

    pub(crate) parent: Option<WidgetId>,
    pub(crate) children: Vec<WidgetId>,
}

impl Default for Widget {
    fn default() -> Self {
        Self::new(WidgetKind::Panel)
    }
}

impl Widget {
    /// Create a widget of the given kind with default style.
    pub fn new(kind: WidgetKind) -> Self {
        Self {
            name: String::new(),
            rect: Rect::ZERO,
            margin: Edges::ZERO,
            padding: Edges::ZERO,
            visible: true,
            enabled: true,
            focused: false,
            destroyed: false,
            hovered: false,
            pressed: false,
            background: Color::TRANSPARENT,
            background_image: None,
            border_color: Color::TRANSPARENT,
            border_width: 1,
            border_radius: 0,
            opacity: 1.0,
            layout: LayoutMode::None,
            anchors: Vec::new(),
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Plain container.
    pub fn panel() -> Self {
        Self::new(WidgetKind::Panel)
    }

    /// Static text label.
    pub fn label(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::Label(LabelState::with_text(text)))
    }

    /// Push button with a caption.
    pub fn button(text: impl Into<String>) -> Self {
        Self::new(WidgetKind::Button(ButtonState::with_text(text)))
    }

    /// Single-line text input.
    pub fn text_input() -> Self {
        Self::new(WidgetKind::TextInput(TextInputState::default()))
    }

    /// Progress bar over 0..100 by default.
    pub fn progress_bar() -> Self {
        Self::new(WidgetKind::ProgressBar(ProgressBarState::default()))
    }

    /// Vertical scroll bar by default.
    pub fn scroll_bar() -> Self {
        Self::new(WidgetKind::ScrollBar(ScrollBarState::default()))
    }

    /// Scrollable clipping panel.
    pub fn scroll_panel() -> Self {
        Self::new(WidgetKind::ScrollPanel(ScrollPanelState::default()))
    }

    /// Drop-down option picker.
    pub fn combo_box() -> Self {
        Self::new(WidgetKind::ComboBox(ComboBoxState::default()))
    }

    /// Window with a title.
    pub fn window(title: impl Into<String>) -> Self {
        Self::new(WidgetKind::Window(WindowState::with_title(title)))
    }

    /// Set the widget name (builder style).
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the local rectangle (builder style).
    pub fn with_rect(mut self, x: i32, y: i32, width: i32, height: i32) -> Self {
        self.rect = Rect::new(x, y, width, height);
        self
    }

    /// Set the layout mode (builder style).
    pub fn with_layout(mut self, layout: LayoutMode) -> Self {
        self.layout = layout;
        self
    }

    /// Set the background color (builder style).
    pub fn with_background(mut self, color: Color) -> Self {
        self.background = color;
        self
    }

    /// Set padding on all four edges (builder style).
    pub fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Set margin on all four edges (builder style).
    pub fn with_margin(mut self, margin: Edges) -> Self {
        self.margin = margin;
        self
    }

    /// Add an anchor constraint (builder style).
    pub fn with_anchor(mut self, anchor: Anchor) -> Self {
        self.anchors.push(anchor);
        self
    }

    /// The parent widget, if attached.
    #[inline]
    pub fn parent(&self) -> Option<WidgetId> {
        self.parent
    }

    /// Direct children in paint/hit-test order (last = topmost).
    #[inline]
    pub fn children(&self) -> &[WidgetId] {
        &self.children
    }

    /// The widget position relative to the parent content area.
    #[inline]
    pub fn pos(&self) -> Point {
        self.rect.origin
    }

    /// The widget size.
    #[inline]
    pub fn size(&self) -> Size {
        self.rect.size
    }

    /// The content rectangle in local coordinates: (0, 0)..size inset by
    /// padding. Children positions are relative to its origin.
    pub fn content_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.rect.size).inset(self.padding)
    }

    // Kind accessors. Widget-specific APIs hang off the state structs; these
    // are the escape hatches from the generic node to them.

    /// Borrow label state if this is a label.
    pub fn as_label(&self) -> Option<&LabelState> {
        match &self.kind {
            WidgetKind::Label(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow button state if this is a button.
    pub fn as_button(&self) -> Option<&ButtonState> {
        match &self.kind {
            WidgetKind::Button(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow text-input state if this is a text input.
    pub fn as_text_input(&self) -> Option<&TextInputState> {
        match &self.kind {
            WidgetKind::TextInput(state) => Some(state),
            _ => None,
        }
    }

    /// Mutably borrow text-input state if this is a text input.
    pub fn as_text_input_mut(&mut self) -> Option<&mut TextInputState> {
        match &mut self.kind {
            WidgetKind::TextInput(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow progress-bar state if this is a progress bar.
    pub fn as_progress_bar(&self) -> Option<&ProgressBarState> {
        match &self.kind {
            WidgetKind::ProgressBar(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow scroll-bar state if this is a scroll bar.
    pub fn as_scroll_bar(&self) -> Option<&ScrollBarState> {
        match &self.kind {
            WidgetKind::ScrollBar(state) => Some(state),
            _ => None,
        }
    }

    /// Mutably borrow scroll-bar state if this is a scroll bar.
    pub fn as_scroll_bar_mut(&mut self) -> Option<&mut ScrollBarState> {
        match &mut self.kind {
            WidgetKind::ScrollBar(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow scroll-panel state if this is a scrollable panel.
    pub fn as_scroll_panel(&self) -> Option<&ScrollPanelState> {
        match &self.kind {
            WidgetKind::ScrollPanel(state) => Some(state),
            _ => None,
        }
    }

    /// Mutably borrow scroll-panel state if this is a scrollable panel.
    pub fn as_scroll_panel_mut(&mut self) -> Option<&mut ScrollPanelState> {
        match &mut self.kind {
            WidgetKind::ScrollPanel(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow combo-box state if this is a combo box.
    pub fn as_combo_box(&self) -> Option<&ComboBoxState> {
        match &self.kind {
            WidgetKind::ComboBox(state) => Some(state),
            _ => None,
        }
    }

    /// Mutably borrow combo-box state if this is a combo box.
    pub fn as_combo_box_mut(&mut self) -> Option<&mut ComboBoxState> {
        match &mut self.kind {
            WidgetKind::ComboBox(state) => Some(state),
            _ => None,
        }
    }

    /// Borrow window state if this is a window.
    pub fn as_window(&self) -> Option<&WindowState> {
        match &self.kind {
            WidgetKind::Window(state) => Some(state),
            _ => None,
        }
    }

    /// Mutably borrow window state if this is a window.
    pub fn as_window_mut(&mut self) -> Option<&mut WindowState> {
        match &mut self.kind {
            WidgetKind::Window(state) => Some(state),
            _ => None,
        }
    }
}
