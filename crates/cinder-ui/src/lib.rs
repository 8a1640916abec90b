//! Cinder UI - the retained-mode widget toolkit for the Cinder game client.
//!
//! The toolkit owns a widget tree, lays it out with stacking/grid/anchor
//! rules, routes input through hit-testing and focus chains, schedules
//! fade/move animations, and instantiates widget trees from a small
//! declarative markup. Rendering, resource loading, and clipboard access
//! stay on the host side behind the [`backend`] traits.
//!
//! # Example
//!
//! ```no_run
//! use cinder_ui::{Size, UiContext};
//!
//! let mut ctx = UiContext::create(Size::new(1280, 720));
//! let root = ctx.root();
//! ctx.load_markup(root, "Button\n  id: ok\n  text: OK\n  width: 80\n  height: 24");
//!
//! // Per frame: ctx.update(dt), feed input events, ctx.render(&mut renderer),
//! // then drain ctx.poll_events() and react to clicks and value changes.
//! ```

pub mod animation;
pub mod backend;
pub mod context;
pub mod event;
pub mod input;
pub mod layout;
pub mod markup;
pub mod paint;
pub mod style;
pub mod widget;
pub mod widgets;

mod dispatch;

pub use cinder_ui_core::{Color, Edges, MarkupError, Point, Rect, Size};

pub use crate::animation::{Animation, AnimationKind, Easing};
pub use crate::backend::{NullPlatform, Platform, Renderer, ResourceLoader, TextureHandle};
pub use crate::context::UiContext;
pub use crate::event::{UiEvent, UiEventKind};
pub use crate::input::{
    Key, KeyCombination, KeyPressEvent, KeyReleaseEvent, Modifiers, MouseButton, MouseMoveEvent,
    MousePressEvent, MouseReleaseEvent, TextInputEvent, WheelEvent,
};
pub use crate::layout::anchor::{Anchor, AnchorTarget, Edge};
pub use crate::layout::LayoutMode;
pub use crate::markup::WidgetRegistry;
pub use crate::style::StyleSheet;
pub use crate::widget::tree::WidgetTree;
pub use crate::widget::{Widget, WidgetId, WidgetKind};
pub use crate::widgets::Orientation;

#[cfg(test)]
mod tests;
