//! The widget arena and structural operations.
//!
//! All widgets live in one slotmap keyed by [`WidgetId`]. The tree owns its
//! nodes; parent links are plain keys, so there are no ownership cycles and
//! destruction order is explicit (children torn down before the parent
//! detaches). Structural misuse — adding a widget as its own child, removing
//! a non-child, destroying twice — is a no-op, never an error.

use std::fmt::Write as _;

use cinder_ui_core::logging::targets;
use cinder_ui_core::{Point, Rect, Size};
use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::event::{UiEvent, UiEventKind};
use crate::layout;
use crate::widget::{Widget, WidgetId};
use crate::widgets;

/// Arena-owned widget tree.
pub struct WidgetTree {
    nodes: SlotMap<WidgetId, Widget>,
    root: WidgetId,
    /// Interaction events waiting to be drained by the host.
    pub(crate) pending_events: Vec<UiEvent>,
    /// The combo box whose dropdown is currently open, if any. The context
    /// gives it first claim on pointer presses so clicks outside the
    /// dropdown can close it.
    pub(crate) open_combo: Option<WidgetId>,
}

impl WidgetTree {
    /// Create a tree with an empty root panel.
    pub fn new() -> Self {
        let mut nodes = SlotMap::with_key();
        let mut root_widget = Widget::panel();
        root_widget.name = "root".to_owned();
        let root = nodes.insert(root_widget);
        Self {
            nodes,
            root,
            pending_events: Vec::new(),
            open_combo: None,
        }
    }

    /// The root widget id. The root always exists and owns the whole tree.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// Resize the root to match the host viewport and re-run its layout.
    pub fn set_root_size(&mut self, size: Size) {
        if let Some(root) = self.nodes.get_mut(self.root) {
            if root.rect.size != size {
                root.rect.size = size;
                layout::update_geometry(self, self.root);
            }
        }
    }

    /// Whether the id refers to a live widget.
    #[inline]
    pub fn contains(&self, id: WidgetId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live widgets, including the root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Whether only the root remains.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Borrow a widget. `None` for stale ids.
    #[inline]
    pub fn get(&self, id: WidgetId) -> Option<&Widget> {
        self.nodes.get(id)
    }

    /// Mutably borrow a widget. `None` for stale ids.
    ///
    /// Direct mutation does not re-run layout; call
    /// [`update_geometry`](Self::update_geometry) afterwards when geometry
    /// fields changed.
    #[inline]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut Widget> {
        self.nodes.get_mut(id)
    }

    /// Insert a widget with no parent. It will not draw or receive input
    /// until attached with [`add_child`](Self::add_child).
    pub fn insert(&mut self, widget: Widget) -> WidgetId {
        self.nodes.insert(widget)
    }

    /// Insert a widget and attach it to a parent in one step.
    pub fn spawn(&mut self, parent: WidgetId, widget: Widget) -> WidgetId {
        let id = self.insert(widget);
        self.add_child(parent, id);
        id
    }

    // =========================================================================
    // Structure
    // =========================================================================

    /// Append `child` to `parent`'s children (topmost position).
    ///
    /// Detaches `child` from any previous parent first, runs the kind's
    /// setup hook, and re-runs `parent`'s layout. No-op when the ids are
    /// equal or stale.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) {
        let index = self
            .nodes
            .get(parent)
            .map(|p| p.children.len())
            .unwrap_or(0);
        self.insert_child(parent, index, child);
    }

    /// Splice `child` into `parent`'s children at `index` (clamped).
    ///
    /// Same semantics as [`add_child`](Self::add_child) otherwise.
    pub fn insert_child(&mut self, parent: WidgetId, index: usize, child: WidgetId) {
        if parent == child || !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return;
        }

        self.detach(child);

        let parent_node = &mut self.nodes[parent];
        let index = index.min(parent_node.children.len());
        parent_node.children.insert(index, child);
        self.nodes[child].parent = Some(parent);

        trace!(target: targets::TREE, ?parent, ?child, index, "attached child");

        widgets::setup(self, child);
        layout::update_layout(self, parent);
    }

    /// Remove `child` from `parent`'s children and clear its back-reference.
    /// The widget stays alive (and re-attachable). No-op when not a child.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) {
        let is_child = self
            .nodes
            .get(child)
            .map(|c| c.parent == Some(parent))
            .unwrap_or(false);
        if !is_child {
            return;
        }

        self.detach(child);
        layout::update_layout(self, parent);
    }

    fn detach(&mut self, child: WidgetId) {
        let Some(parent) = self.nodes.get(child).and_then(|c| c.parent) else {
            return;
        };
        if let Some(parent_node) = self.nodes.get_mut(parent) {
            parent_node.children.retain(|&c| c != child);
        }
        if let Some(child_node) = self.nodes.get_mut(child) {
            child_node.parent = None;
        }
    }

    /// Destroy a widget and its whole subtree.
    ///
    /// Children are destroyed before the widget detaches from its parent.
    /// Unconditionally idempotent: destroying a stale id is a no-op.
    pub fn destroy(&mut self, id: WidgetId) {
        if !self.nodes.contains_key(id) || id == self.root {
            return;
        }

        debug!(target: targets::TREE, widget = ?id, "destroying subtree");
        self.destroy_children(id);
        self.detach(id);
        self.forget(id);
    }

    fn destroy_children(&mut self, id: WidgetId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => {
                node.destroyed = true;
                std::mem::take(&mut node.children)
            }
            None => return,
        };
        for child in children {
            self.destroy_children(child);
            self.forget(child);
        }
    }

    fn forget(&mut self, id: WidgetId) {
        if self.open_combo == Some(id) {
            self.open_combo = None;
        }
        self.nodes.remove(id);
    }

    /// Destroy every widget below the root, leaving the tree empty.
    pub fn clear(&mut self) {
        let children: Vec<WidgetId> = self.nodes[self.root].children.clone();
        for child in children {
            self.destroy(child);
        }
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// Depth-first search for a widget by name, starting below `from`.
    pub fn find_by_name(&self, from: WidgetId, name: &str) -> Option<WidgetId> {
        let node = self.nodes.get(from)?;
        for &child in &node.children {
            if let Some(child_node) = self.nodes.get(child) {
                if child_node.name == name {
                    return Some(child);
                }
            }
            if let Some(found) = self.find_by_name(child, name) {
                return Some(found);
            }
        }
        None
    }

    /// Find a sibling of `id` by name (excluding `id` itself).
    pub fn sibling_by_name(&self, id: WidgetId, name: &str) -> Option<WidgetId> {
        let parent = self.nodes.get(id)?.parent?;
        self.nodes
            .get(parent)?
            .children
            .iter()
            .copied()
            .find(|&sibling| {
                sibling != id
                    && self
                        .nodes
                        .get(sibling)
                        .map(|s| s.name == name)
                        .unwrap_or(false)
            })
    }

    // =========================================================================
    // Geometry
    // =========================================================================

    /// The widget's absolute top-left corner.
    ///
    /// Each ancestor contributes its own absolute position *plus its
    /// left/top padding*: padding shifts the content origin for the whole
    /// subtree, it is not just a visual inset.
    pub fn absolute_origin(&self, id: WidgetId) -> Point {
        let Some(node) = self.nodes.get(id) else {
            return Point::ZERO;
        };
        match node.parent {
            Some(parent) => {
                let parent_origin = self.absolute_origin(parent);
                let padding = self
                    .nodes
                    .get(parent)
                    .map(|p| Point::new(p.padding.left, p.padding.top))
                    .unwrap_or(Point::ZERO);
                parent_origin + padding + node.rect.origin
            }
            None => node.rect.origin,
        }
    }

    /// The widget's absolute rectangle.
    pub fn absolute_rect(&self, id: WidgetId) -> Rect {
        let size = self.nodes.get(id).map(|n| n.rect.size).unwrap_or(Size::ZERO);
        Rect::from_origin_size(self.absolute_origin(id), size)
    }

    /// Find the deepest visible descendant of `id` whose absolute rectangle
    /// contains `point`. Children are scanned topmost-first; invisible
    /// widgets never match. Returns `None` when no child contains the point.
    pub fn child_at_pos(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id)?;
        for &child in node.children.iter().rev() {
            let Some(child_node) = self.nodes.get(child) else {
                continue;
            };
            if !child_node.visible {
                continue;
            }
            if self.absolute_rect(child).contains(point) {
                return Some(self.child_at_pos(child, point).unwrap_or(child));
            }
        }
        None
    }

    /// Hit-test from the root. Returns the topmost visible widget at the
    /// point, or the root itself when nothing else matches.
    pub fn hit_test(&self, point: Point) -> WidgetId {
        self.child_at_pos(self.root, point).unwrap_or(self.root)
    }

    /// Re-run anchor resolution and child layout for a widget. The single
    /// entry point after changing position, size, padding, or anchors.
    pub fn update_geometry(&mut self, id: WidgetId) {
        layout::update_geometry(self, id);
    }

    /// Set a widget's local rectangle and re-run its geometry.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.rect != rect {
                node.rect = rect;
                self.update_geometry(id);
            }
        }
    }

    // =========================================================================
    // Visibility, enabled, focus
    // =========================================================================

    /// Show or hide a widget. Hiding a focused widget clears its focus.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.visible == visible {
            return;
        }
        node.visible = visible;
        if !visible {
            self.clear_focus_flag(id);
        }
    }

    /// Enable or disable a widget. Disabling a focused widget clears its
    /// focus.
    pub fn set_enabled(&mut self, id: WidgetId, enabled: bool) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if node.enabled == enabled {
            return;
        }
        node.enabled = enabled;
        if !enabled {
            self.clear_focus_flag(id);
        }
    }

    fn clear_focus_flag(&mut self, id: WidgetId) {
        if let Some(node) = self.nodes.get_mut(id) {
            if node.focused {
                node.focused = false;
                self.push_event(UiEvent::new(id, UiEventKind::FocusLost));
            }
        }
    }

    /// Give a widget keyboard focus.
    ///
    /// No-op when already focused, disabled, or invisible. Focus is
    /// exclusive per sibling set, not globally: the currently focused
    /// sibling under the same parent loses its flag (emitting `FocusLost`
    /// exactly once), while focused widgets elsewhere in the tree keep
    /// theirs.
    pub fn focus(&mut self, id: WidgetId) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.focused || !node.enabled || !node.visible {
            return;
        }

        if let Some(parent) = node.parent {
            let siblings: Vec<WidgetId> = self
                .nodes
                .get(parent)
                .map(|p| p.children.clone())
                .unwrap_or_default();
            for sibling in siblings {
                if sibling != id {
                    self.clear_focus_flag(sibling);
                }
            }
        }

        if let Some(node) = self.nodes.get_mut(id) {
            node.focused = true;
        }
        self.push_event(UiEvent::new(id, UiEventKind::FocusGained));
    }

    /// The focused child of a widget, if any.
    pub fn focused_child(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id)?.children.iter().copied().find(|&child| {
            self.nodes
                .get(child)
                .map(|c| c.focused)
                .unwrap_or(false)
        })
    }

    // =========================================================================
    // Events
    // =========================================================================

    /// Queue an interaction event for the host.
    pub(crate) fn push_event(&mut self, event: UiEvent) {
        self.pending_events.push(event);
    }

    /// Drain all queued interaction events.
    pub fn take_events(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.pending_events)
    }

    // =========================================================================
    // Debug
    // =========================================================================

    /// Render the tree as an indented listing for logs and debugging.
    pub fn format_tree(&self) -> String {
        let mut out = String::new();
        self.format_node(self.root, 0, &mut out);
        out
    }

    fn format_node(&self, id: WidgetId, depth: usize, out: &mut String) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        let _ = writeln!(
            out,
            "{:indent$}{} \"{}\" {:?} ({}x{}){}",
            "",
            node.kind.type_name(),
            node.name,
            node.rect.origin,
            node.rect.width(),
            node.rect.height(),
            if node.visible { "" } else { " [hidden]" },
            indent = depth * 2
        );
        for &child in &node.children {
            self.format_node(child, depth + 1, out);
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinder_ui_core::Edges;

    #[test]
    fn test_add_child_round_trip() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let child = tree.insert(Widget::panel());

        tree.add_child(root, child);
        assert_eq!(tree.get(child).unwrap().parent(), Some(root));
        assert_eq!(
            tree.get(root)
                .unwrap()
                .children()
                .iter()
                .filter(|&&c| c == child)
                .count(),
            1
        );

        tree.remove_child(root, child);
        assert_eq!(tree.get(child).unwrap().parent(), None);
        assert!(tree.get(root).unwrap().children().is_empty());
        // Removing again is a no-op
        tree.remove_child(root, child);
    }

    #[test]
    fn test_reparenting_detaches_first() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.spawn(root, Widget::panel());
        let b = tree.spawn(root, Widget::panel());
        let child = tree.spawn(a, Widget::panel());

        tree.add_child(b, child);
        assert_eq!(tree.get(child).unwrap().parent(), Some(b));
        assert!(tree.get(a).unwrap().children().is_empty());
    }

    #[test]
    fn test_self_child_is_noop() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.spawn(root, Widget::panel());
        tree.add_child(a, a);
        assert!(tree.get(a).unwrap().children().is_empty());
        assert_eq!(tree.get(a).unwrap().parent(), Some(root));
    }

    #[test]
    fn test_insert_child_index_clamped() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.spawn(root, Widget::panel());
        let b = tree.insert(Widget::panel());
        tree.insert_child(root, 99, b);
        assert_eq!(tree.get(root).unwrap().children(), &[a, b]);

        let c = tree.insert(Widget::panel());
        tree.insert_child(root, 0, c);
        assert_eq!(tree.get(root).unwrap().children(), &[c, a, b]);
    }

    #[test]
    fn test_destroy_is_recursive_and_idempotent() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let parent = tree.spawn(root, Widget::panel());
        let child = tree.spawn(parent, Widget::panel());
        let grandchild = tree.spawn(child, Widget::panel());

        tree.destroy(parent);
        assert!(!tree.contains(parent));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.get(root).unwrap().children().is_empty());

        // Second destroy with the stale id: no-op, no panic
        tree.destroy(parent);
    }

    #[test]
    fn test_absolute_rect_identity_at_root_level() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let w = tree.spawn(root, Widget::panel().with_rect(5, 6, 70, 80));
        assert_eq!(tree.absolute_rect(w), Rect::new(5, 6, 70, 80));
    }

    #[test]
    fn test_absolute_rect_includes_ancestor_padding() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let outer = tree.spawn(
            root,
            Widget::panel()
                .with_rect(10, 10, 100, 100)
                .with_padding(Edges::new(4, 6, 0, 0)),
        );
        let inner = tree.spawn(outer, Widget::panel().with_rect(1, 2, 10, 10));

        assert_eq!(tree.absolute_origin(inner), Point::new(15, 18));
    }

    #[test]
    fn test_hit_test_topmost_wins() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        tree.get_mut(root).unwrap().rect = Rect::new(0, 0, 200, 200);

        let below = tree.spawn(root, Widget::panel().with_rect(10, 10, 50, 50));
        let above = tree.spawn(root, Widget::panel().with_rect(30, 30, 50, 50));

        // Overlap region: the later child is topmost
        assert_eq!(tree.hit_test(Point::new(40, 40)), above);
        assert_eq!(tree.hit_test(Point::new(15, 15)), below);
        assert_eq!(tree.hit_test(Point::new(150, 150)), root);
    }

    #[test]
    fn test_hit_test_skips_invisible() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        tree.get_mut(root).unwrap().rect = Rect::new(0, 0, 200, 200);
        let w = tree.spawn(root, Widget::panel().with_rect(0, 0, 100, 100));
        tree.set_visible(w, false);

        assert_eq!(tree.hit_test(Point::new(50, 50)), root);
    }

    #[test]
    fn test_hit_test_finds_deepest_descendant() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        tree.get_mut(root).unwrap().rect = Rect::new(0, 0, 200, 200);
        let outer = tree.spawn(root, Widget::panel().with_rect(0, 0, 100, 100));
        let inner = tree.spawn(outer, Widget::panel().with_rect(10, 10, 40, 40));

        assert_eq!(tree.hit_test(Point::new(20, 20)), inner);
        assert_eq!(tree.hit_test(Point::new(80, 80)), outer);
    }

    #[test]
    fn test_focus_exclusive_per_level() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.spawn(root, Widget::button("A"));
        let b = tree.spawn(root, Widget::button("B"));
        let nested = tree.spawn(a, Widget::text_input());

        tree.focus(a);
        tree.focus(nested);
        assert!(tree.get(a).unwrap().focused);
        assert!(tree.get(nested).unwrap().focused);

        tree.take_events();
        tree.focus(b);
        assert!(!tree.get(a).unwrap().focused);
        assert!(tree.get(b).unwrap().focused);
        // Nested focus under `a` is untouched: focus is per level
        assert!(tree.get(nested).unwrap().focused);

        let events = tree.take_events();
        let lost: Vec<_> = events
            .iter()
            .filter(|e| e.kind == UiEventKind::FocusLost)
            .collect();
        assert_eq!(lost.len(), 1);
        assert_eq!(lost[0].source, a);
    }

    #[test]
    fn test_focus_refused_when_hidden_or_disabled() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.spawn(root, Widget::button("A"));

        tree.set_visible(a, false);
        tree.focus(a);
        assert!(!tree.get(a).unwrap().focused);

        tree.set_visible(a, true);
        tree.set_enabled(a, false);
        tree.focus(a);
        assert!(!tree.get(a).unwrap().focused);
    }

    #[test]
    fn test_hiding_focused_widget_clears_focus() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let a = tree.spawn(root, Widget::button("A"));
        tree.focus(a);
        tree.take_events();

        tree.set_visible(a, false);
        assert!(!tree.get(a).unwrap().focused);
        let events = tree.take_events();
        assert_eq!(events, vec![UiEvent::new(a, UiEventKind::FocusLost)]);
    }

    #[test]
    fn test_find_by_name() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let panel = tree.spawn(root, Widget::panel());
        let target = tree.spawn(panel, Widget::button("Ok").with_name("ok"));

        assert_eq!(tree.find_by_name(root, "ok"), Some(target));
        assert_eq!(tree.find_by_name(root, "missing"), None);
    }
}
