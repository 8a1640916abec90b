//! Anchor constraints: edge-to-edge positioning against the parent or
//! named siblings.
//!
//! Resolution is a single pass in declaration order. Each anchor computes a
//! target edge value and writes the anchored widget's corresponding
//! coordinate; later anchors overwrite earlier ones on the same axis
//! (last-applied wins). There is no constraint solver and no topological
//! sort across siblings: an anchor to a sibling that has not been
//! positioned yet reads that sibling's current rectangle. This preserves
//! the original engine's semantics; do not "fix" it into a solver without
//! changing the documented contract.

use cinder_ui_core::Rect;

use crate::widget::tree::WidgetTree;
use crate::widget::WidgetId;

/// An edge or center line of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Edge {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Horizontal center line.
    HCenter,
    /// Vertical center line.
    VCenter,
}

impl Edge {
    /// Whether the edge constrains the x axis.
    #[inline]
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Edge::Left | Edge::Right | Edge::HCenter)
    }

    /// Parse the markup spelling of an edge.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "left" => Some(Edge::Left),
            "right" => Some(Edge::Right),
            "top" => Some(Edge::Top),
            "bottom" => Some(Edge::Bottom),
            "hcenter" => Some(Edge::HCenter),
            "vcenter" => Some(Edge::VCenter),
            _ => None,
        }
    }

    /// The scalar position of this edge on a rectangle.
    fn position_on(&self, rect: &Rect) -> i32 {
        match self {
            Edge::Left => rect.left(),
            Edge::Right => rect.right(),
            Edge::Top => rect.top(),
            Edge::Bottom => rect.bottom(),
            Edge::HCenter => rect.center_x(),
            Edge::VCenter => rect.center_y(),
        }
    }
}

/// What an anchor attaches to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorTarget {
    /// The parent's virtual rectangle (0, 0)..(parent width, parent height).
    Parent,
    /// A sibling, looked up by widget name under the same parent.
    Sibling(String),
}

/// A positional constraint tying one of this widget's edges to a target
/// widget's edge, plus a pixel offset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    /// What the anchor attaches to.
    pub target: AnchorTarget,
    /// The edge on the target supplying the position.
    pub target_edge: Edge,
    /// The edge of this widget being positioned.
    pub source_edge: Edge,
    /// Pixel offset added after edge alignment.
    pub offset: i32,
}

impl Anchor {
    /// Anchor an edge to the parent's matching coordinate space.
    pub fn to_parent(source_edge: Edge, target_edge: Edge, offset: i32) -> Self {
        Self {
            target: AnchorTarget::Parent,
            target_edge,
            source_edge,
            offset,
        }
    }

    /// Anchor an edge to a named sibling.
    pub fn to_sibling(
        sibling: impl Into<String>,
        source_edge: Edge,
        target_edge: Edge,
        offset: i32,
    ) -> Self {
        Self {
            target: AnchorTarget::Sibling(sibling.into()),
            target_edge,
            source_edge,
            offset,
        }
    }
}

/// Resolve a widget's anchors against its parent and siblings, mutating its
/// local rectangle. Anchors apply in declaration order; unknown sibling
/// names are skipped.
pub(crate) fn resolve_anchors(tree: &mut WidgetTree, id: WidgetId) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    if widget.anchors.is_empty() {
        return;
    }
    let Some(parent) = widget.parent() else {
        return;
    };

    // Parent is a virtual rect of the full parent size; sibling targets are
    // read in the same local (parent content) space the widget lives in.
    let parent_rect = match tree.get(parent) {
        Some(p) => Rect::from_origin_size(cinder_ui_core::Point::ZERO, p.size()),
        None => return,
    };

    let anchors = widget.anchors.clone();
    let mut rect = widget.rect;

    for anchor in &anchors {
        let target_value = match &anchor.target {
            AnchorTarget::Parent => anchor.target_edge.position_on(&parent_rect),
            AnchorTarget::Sibling(name) => {
                let Some(sibling) = tree.sibling_by_name(id, name) else {
                    continue;
                };
                match tree.get(sibling) {
                    Some(s) => anchor.target_edge.position_on(&s.rect),
                    None => continue,
                }
            }
        };

        match anchor.source_edge {
            Edge::Left => rect.origin.x = target_value + anchor.offset,
            Edge::Right => rect.origin.x = target_value - rect.width() + anchor.offset,
            Edge::HCenter => rect.origin.x = target_value - rect.width() / 2 + anchor.offset,
            Edge::Top => rect.origin.y = target_value + anchor.offset,
            Edge::Bottom => rect.origin.y = target_value - rect.height() + anchor.offset,
            Edge::VCenter => rect.origin.y = target_value - rect.height() / 2 + anchor.offset,
        }
    }

    if let Some(widget) = tree.get_mut(id) {
        widget.rect = rect;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutMode;
    use crate::widget::Widget;

    fn anchored_tree() -> (WidgetTree, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        {
            let w = tree.get_mut(root).unwrap();
            w.rect = Rect::new(0, 0, 200, 100);
            w.layout = LayoutMode::Anchored;
        }
        (tree, root)
    }

    #[test]
    fn test_anchor_to_parent_edges() {
        let (mut tree, root) = anchored_tree();
        let child = tree.spawn(
            root,
            Widget::panel()
                .with_rect(0, 0, 50, 20)
                .with_anchor(Anchor::to_parent(Edge::Right, Edge::Right, -10))
                .with_anchor(Anchor::to_parent(Edge::Bottom, Edge::Bottom, 0)),
        );

        let rect = tree.get(child).unwrap().rect;
        assert_eq!(rect, Rect::new(140, 80, 50, 20));
    }

    #[test]
    fn test_anchor_centering() {
        let (mut tree, root) = anchored_tree();
        let child = tree.spawn(
            root,
            Widget::panel()
                .with_rect(0, 0, 40, 20)
                .with_anchor(Anchor::to_parent(Edge::HCenter, Edge::HCenter, 0))
                .with_anchor(Anchor::to_parent(Edge::VCenter, Edge::VCenter, 0)),
        );

        let rect = tree.get(child).unwrap().rect;
        assert_eq!(rect.origin, cinder_ui_core::Point::new(80, 40));
    }

    #[test]
    fn test_anchor_to_sibling_by_name() {
        let (mut tree, root) = anchored_tree();
        tree.spawn(
            root,
            Widget::panel().with_name("lhs").with_rect(10, 10, 50, 20),
        );
        let rhs = tree.spawn(
            root,
            Widget::panel()
                .with_rect(0, 0, 30, 20)
                .with_anchor(Anchor::to_sibling("lhs", Edge::Left, Edge::Right, 4))
                .with_anchor(Anchor::to_sibling("lhs", Edge::Top, Edge::Top, 0)),
        );

        let rect = tree.get(rhs).unwrap().rect;
        assert_eq!(rect.origin, cinder_ui_core::Point::new(64, 10));
    }

    #[test]
    fn test_last_applied_anchor_wins() {
        let (mut tree, root) = anchored_tree();
        let child = tree.spawn(
            root,
            Widget::panel()
                .with_rect(0, 0, 50, 20)
                .with_anchor(Anchor::to_parent(Edge::Left, Edge::Left, 5))
                .with_anchor(Anchor::to_parent(Edge::Left, Edge::Left, 30)),
        );

        assert_eq!(tree.get(child).unwrap().rect.origin.x, 30);
    }

    #[test]
    fn test_unknown_sibling_is_skipped() {
        let (mut tree, root) = anchored_tree();
        let child = tree.spawn(
            root,
            Widget::panel()
                .with_rect(7, 8, 50, 20)
                .with_anchor(Anchor::to_sibling("nobody", Edge::Left, Edge::Right, 0)),
        );

        // Position untouched
        assert_eq!(tree.get(child).unwrap().rect.origin, cinder_ui_core::Point::new(7, 8));
    }
}
