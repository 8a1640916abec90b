//! Per-widget child layout algorithms.
//!
//! A widget's [`LayoutMode`] decides how its *direct* children are
//! positioned inside its content area. Layout never recurses: each widget
//! repositions one generation, and deeper passes happen when those children
//! run their own geometry updates.

pub mod anchor;

use cinder_ui_core::logging::targets;
use tracing::trace;

use crate::widget::tree::WidgetTree;
use crate::widget::WidgetId;

/// How a widget positions its direct children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LayoutMode {
    /// No repositioning; children keep the rectangles they were given.
    #[default]
    None,
    /// Stack children top-to-bottom, honoring each child's margins.
    Vertical,
    /// Stack children left-to-right, honoring each child's margins.
    Horizontal,
    /// Flow children left-to-right, wrapping to a new row when the next
    /// child would exceed the available content width.
    Grid,
    /// Positions come entirely from each child's anchor constraints.
    Anchored,
}

impl LayoutMode {
    /// Parse the markup spelling of a layout mode.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "none" => Some(LayoutMode::None),
            "vertical" => Some(LayoutMode::Vertical),
            "horizontal" => Some(LayoutMode::Horizontal),
            "grid" => Some(LayoutMode::Grid),
            "anchored" => Some(LayoutMode::Anchored),
            _ => None,
        }
    }
}

/// Apply a widget's layout mode to its direct children.
///
/// Child positions are set in the parent's content space (origin at the
/// parent's left/top padding). Visibility does not affect stacking: layout
/// is geometry-only, hidden children keep their slot.
pub(crate) fn update_layout(tree: &mut WidgetTree, id: WidgetId) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    let mode = widget.layout;
    let children: Vec<WidgetId> = widget.children.to_vec();
    if children.is_empty() {
        return;
    }

    trace!(target: targets::LAYOUT, widget = ?id, ?mode, "layout pass");

    match mode {
        LayoutMode::None => {}
        LayoutMode::Vertical => stack_vertical(tree, &children),
        LayoutMode::Horizontal => stack_horizontal(tree, &children),
        LayoutMode::Grid => flow_grid(tree, id, &children),
        LayoutMode::Anchored => {
            // Declaration order = children order. An anchor to a later
            // sibling reads that sibling's current rect; see the module
            // docs in `anchor`.
            for child in children {
                anchor::resolve_anchors(tree, child);
            }
        }
    }

    // Scroll ranges depend on the freshly settled child extents
    if matches!(
        tree.get(id),
        Some(w) if matches!(w.kind, crate::widget::WidgetKind::ScrollPanel(_))
    ) {
        crate::widgets::scroll_panel::refresh_ranges(tree, id);
    }
}

fn stack_vertical(tree: &mut WidgetTree, children: &[WidgetId]) {
    let mut cursor = 0;
    for &child in children {
        let Some(widget) = tree.get_mut(child) else {
            continue;
        };
        cursor += widget.margin.top;
        widget.rect.origin.x = widget.margin.left;
        widget.rect.origin.y = cursor;
        cursor += widget.rect.height() + widget.margin.bottom;
    }
}

fn stack_horizontal(tree: &mut WidgetTree, children: &[WidgetId]) {
    let mut cursor = 0;
    for &child in children {
        let Some(widget) = tree.get_mut(child) else {
            continue;
        };
        cursor += widget.margin.left;
        widget.rect.origin.x = cursor;
        widget.rect.origin.y = widget.margin.top;
        cursor += widget.rect.width() + widget.margin.right;
    }
}

fn flow_grid(tree: &mut WidgetTree, parent: WidgetId, children: &[WidgetId]) {
    let available = tree
        .get(parent)
        .map(|w| w.content_rect().width())
        .unwrap_or(0);

    let mut x = 0;
    let mut y = 0;
    let mut row_height = 0;

    for &child in children {
        let Some(widget) = tree.get_mut(child) else {
            continue;
        };
        let span = widget.margin.left + widget.rect.width() + widget.margin.right;

        // Wrap when this child would overflow, unless it starts the row.
        if x > 0 && x + span > available {
            x = 0;
            y += row_height;
            row_height = 0;
        }

        widget.rect.origin.x = x + widget.margin.left;
        widget.rect.origin.y = y + widget.margin.top;

        x += span;
        row_height = row_height.max(widget.margin.top + widget.rect.height() + widget.margin.bottom);
    }
}

/// Recompute a widget's own anchored position, then lay out its children.
///
/// This is the single entry point after any change to position, size,
/// padding, or anchors.
pub(crate) fn update_geometry(tree: &mut WidgetTree, id: WidgetId) {
    anchor::resolve_anchors(tree, id);
    update_layout(tree, id);
}
