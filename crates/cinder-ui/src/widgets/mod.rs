//! Concrete widget behaviors.
//!
//! Each module holds one widget kind's state struct plus the `pub(crate)`
//! input handlers the dispatcher calls for it. State structs are plain data
//! with inherent methods; everything that needs the tree (event emission,
//! focus, geometry) lives in free functions or `WidgetTree` extension impls
//! next to the state they belong to.

pub mod button;
pub mod combo_box;
pub mod label;
pub mod progress_bar;
pub mod scroll_bar;
pub mod scroll_panel;
pub mod text_input;
pub mod window;

use crate::widget::tree::WidgetTree;
use crate::widget::{WidgetId, WidgetKind};

/// Scroll direction for scroll bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    /// Thumb travels top to bottom.
    #[default]
    Vertical,
    /// Thumb travels left to right.
    Horizontal,
}

/// Kind-specific initialization run when a widget is attached to a parent.
pub(crate) fn setup(tree: &mut WidgetTree, id: WidgetId) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    match widget.kind {
        WidgetKind::Window(_) => window::clamp_to_limits(tree, id),
        WidgetKind::ScrollPanel(_) => scroll_panel::refresh_ranges(tree, id),
        _ => {}
    }
}
