//! The long-lived UI context.
//!
//! One [`UiContext`] per running client, owned by whatever drives the frame
//! loop and passed by reference into it. It owns the widget tree, the
//! factory registry, style rules, hotkeys, device state, the modal stack,
//! and the animation list. There are no globals; everything reachable from
//! the frame loop hangs off this object.
//!
//! Per frame the host calls, in order: [`update`](UiContext::update) with
//! the frame delta, the input entry points for every device event, and
//! [`render`](UiContext::render). Interaction events accumulate and are
//! drained with [`poll_events`](UiContext::poll_events).

use cinder_ui_core::logging::targets;
use cinder_ui_core::{Point, Size};
use tracing::{debug, trace};

use crate::animation::{Animation, AnimationKind};
use crate::backend::{Platform, Renderer};
use crate::dispatch;
use crate::event::UiEvent;
use crate::input::{
    HotkeyRegistry, InputState, KeyPressEvent, KeyReleaseEvent, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, TextInputEvent, WheelEvent,
};
use crate::markup::{self, WidgetRegistry};
use crate::paint;
use crate::style::StyleSheet;
use crate::widget::tree::WidgetTree;
use crate::widget::{Widget, WidgetId};
use crate::widgets::combo_box;

/// Explicit, single-instance UI state for one running client.
pub struct UiContext {
    tree: WidgetTree,
    registry: WidgetRegistry,
    styles: StyleSheet,
    input: InputState,
    hotkeys: HotkeyRegistry,
    animations: Vec<Animation>,
    /// LIFO modal stack; the top widget receives input exclusively.
    modal_stack: Vec<WidgetId>,
    hovered: Option<WidgetId>,
    pressed: Option<WidgetId>,
    last_pointer: Point,
}

impl UiContext {
    /// Create a context with an empty root sized to the viewport and the
    /// built-in widget types registered.
    pub fn create(viewport: Size) -> Self {
        let mut tree = WidgetTree::new();
        tree.set_root_size(viewport);
        debug!(target: targets::CONTEXT, ?viewport, "context created");
        Self {
            tree,
            registry: WidgetRegistry::with_builtins(),
            styles: StyleSheet::new(),
            input: InputState::new(),
            hotkeys: HotkeyRegistry::new(),
            animations: Vec::new(),
            modal_stack: Vec::new(),
            hovered: None,
            pressed: None,
            last_pointer: Point::ZERO,
        }
    }

    /// Tear down all UI state: stacks, animations, hotkeys, and every
    /// widget below the root.
    pub fn shutdown(&mut self) {
        debug!(target: targets::CONTEXT, "context shutdown");
        self.modal_stack.clear();
        self.animations.clear();
        self.hovered = None;
        self.pressed = None;
        self.tree.clear();
    }

    /// The widget tree.
    #[inline]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The widget tree, mutably. Prefer [`destroy_widget`](Self::destroy_widget)
    /// over `tree_mut().destroy()` so observer references are cleared too.
    #[inline]
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        &mut self.tree
    }

    /// The root widget id.
    #[inline]
    pub fn root(&self) -> WidgetId {
        self.tree.root()
    }

    /// The hotkey registry.
    #[inline]
    pub fn hotkeys_mut(&mut self) -> &mut HotkeyRegistry {
        &mut self.hotkeys
    }

    /// Edge-triggered device state for direct polling.
    #[inline]
    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Loaded style rules.
    #[inline]
    pub fn styles(&self) -> &StyleSheet {
        &self.styles
    }

    /// Resize the root to a new viewport.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.tree.set_root_size(viewport);
    }

    // =========================================================================
    // Widgets, markup, styles
    // =========================================================================

    /// Register a widget type for markup instantiation.
    pub fn register_widget_type(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn() -> Widget + 'static,
    ) {
        self.registry.register(name, factory);
    }

    /// Parse markup and attach the described widgets under `parent`.
    pub fn load_markup(&mut self, parent: WidgetId, source: &str) -> Vec<WidgetId> {
        markup::load_markup(&mut self.tree, parent, &self.registry, source)
    }

    /// Replace the style table from style-sheet text.
    pub fn load_styles(&mut self, source: &str) {
        self.styles = StyleSheet::parse(source);
    }

    /// Destroy a widget, clearing any context references to it or its
    /// descendants.
    pub fn destroy_widget(&mut self, id: WidgetId) {
        self.tree.destroy(id);
        self.prune_stale_refs();
    }

    fn prune_stale_refs(&mut self) {
        let tree = &self.tree;
        self.modal_stack.retain(|&id| tree.contains(id));
        if self.hovered.is_some_and(|id| !tree.contains(id)) {
            self.hovered = None;
        }
        if self.pressed.is_some_and(|id| !tree.contains(id)) {
            self.pressed = None;
        }
    }

    // =========================================================================
    // Modal stack
    // =========================================================================

    /// Push a widget onto the modal stack. While on top it receives all
    /// routed input; presses outside its rectangle are swallowed.
    pub fn push_modal(&mut self, id: WidgetId) {
        if self.tree.contains(id) {
            trace!(target: targets::CONTEXT, widget = ?id, "modal pushed");
            self.modal_stack.push(id);
        }
    }

    /// Pop the top modal, if any.
    pub fn pop_modal(&mut self) -> Option<WidgetId> {
        self.modal_stack.pop()
    }

    /// The widget currently receiving exclusive input, if any.
    pub fn top_modal(&self) -> Option<WidgetId> {
        self.modal_stack.last().copied()
    }

    fn routing_root(&self) -> WidgetId {
        self.top_modal().unwrap_or_else(|| self.tree.root())
    }

    // =========================================================================
    // Input entry points
    // =========================================================================

    /// Route a mouse press. Returns whether any widget consumed it.
    pub fn mouse_press(&mut self, event: MousePressEvent) -> bool {
        self.input.on_button_down(event.button);
        self.last_pointer = event.position;

        // An open dropdown owns the pointer until it closes
        if let Some(combo) = self.tree.open_combo {
            if combo_box::handle_open_press(&mut self.tree, combo, &event) {
                return true;
            }
        }

        if let Some(modal) = self.top_modal() {
            if !self.tree.absolute_rect(modal).contains(event.position) {
                trace!(target: targets::INPUT, ?modal, "press outside modal swallowed");
                return true;
            }
            self.pressed = dispatch::dispatch_mouse_press(&mut self.tree, modal, &event);
            return self.pressed.is_some();
        }

        let root = self.tree.root();
        self.pressed = dispatch::dispatch_mouse_press(&mut self.tree, root, &event);
        self.pressed.is_some()
    }

    /// Route a mouse release to the widget that consumed the press.
    pub fn mouse_release(&mut self, event: MouseReleaseEvent) -> bool {
        self.input.on_button_up(event.button);
        let Some(pressed) = self.pressed.take() else {
            return false;
        };
        dispatch::deliver_mouse_release(&mut self.tree, pressed, &event)
    }

    /// Route a mouse move: drag tracking for the pressed widget, hover
    /// bookkeeping otherwise.
    pub fn mouse_move(&mut self, event: MouseMoveEvent) -> bool {
        self.last_pointer = event.position;

        if let Some(pressed) = self.pressed {
            if self.tree.contains(pressed) {
                return dispatch::deliver_mouse_move(&mut self.tree, pressed, &event);
            }
            self.pressed = None;
        }

        // Hover honors modal exclusivity like the press path: pointing
        // outside the top modal hovers nothing.
        let hit = match self.top_modal() {
            Some(modal) if !self.tree.absolute_rect(modal).contains(event.position) => None,
            Some(modal) => Some(
                self.tree
                    .child_at_pos(modal, event.position)
                    .unwrap_or(modal),
            ),
            None => Some(self.tree.hit_test(event.position)),
        };
        if self.hovered != hit {
            if let Some(previous) = self.hovered.take() {
                if let Some(widget) = self.tree.get_mut(previous) {
                    widget.hovered = false;
                }
            }
            if let Some(hit) = hit {
                if let Some(widget) = self.tree.get_mut(hit) {
                    widget.hovered = true;
                }
            }
            self.hovered = hit;
        }
        false
    }

    /// Route a wheel event toward the widget under the pointer.
    pub fn wheel(&mut self, event: WheelEvent) -> bool {
        if let Some(modal) = self.top_modal() {
            if !self.tree.absolute_rect(modal).contains(event.position) {
                return true;
            }
            return dispatch::dispatch_wheel(&mut self.tree, modal, &event);
        }
        let root = self.tree.root();
        dispatch::dispatch_wheel(&mut self.tree, root, &event)
    }

    /// Route a key press: device state, hotkeys, then the focus chain.
    pub fn key_press(&mut self, event: KeyPressEvent, platform: &mut dyn Platform) -> bool {
        self.input.on_key_down(event.key, event.modifiers, event.repeat);
        let fired = self.hotkeys.handle_key_press(&event);
        let routing_root = self.routing_root();
        let handled = dispatch::dispatch_key_press(&mut self.tree, routing_root, &event, platform);
        fired > 0 || handled
    }

    /// Record a key release in the device state.
    pub fn key_release(&mut self, event: KeyReleaseEvent) {
        self.input.on_key_up(event.key, event.modifiers);
    }

    /// Route committed text to the focused widget chain.
    pub fn text_input(&mut self, event: TextInputEvent) -> bool {
        let routing_root = self.routing_root();
        dispatch::dispatch_text_input(&mut self.tree, routing_root, &event)
    }

    // =========================================================================
    // Frame loop
    // =========================================================================

    /// Advance one frame: clear edge-triggered device state, step the
    /// animation list, drop stale observer references.
    pub fn update(&mut self, dt: f32) {
        self.input.begin_frame();
        crate::animation::step_animations(&mut self.tree, &mut self.animations, dt);
        self.prune_stale_refs();
    }

    /// Paint the tree through the host renderer.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        paint::draw_tree(&self.tree, renderer);
    }

    /// Drain the interaction events widgets emitted since the last call.
    pub fn poll_events(&mut self) -> Vec<UiEvent> {
        self.tree.take_events()
    }

    // =========================================================================
    // Animation helpers
    // =========================================================================

    /// Fade a widget in over `duration` seconds.
    pub fn fade_in(&mut self, id: WidgetId, duration: f32) {
        if self.tree.contains(id) {
            self.animations
                .push(Animation::new(id, AnimationKind::FadeIn, duration));
        }
    }

    /// Fade a widget out over `duration` seconds, hiding it at the end and
    /// destroying it when `destroy` is set.
    pub fn fade_out(&mut self, id: WidgetId, duration: f32, destroy: bool) {
        if self.tree.contains(id) {
            self.animations
                .push(Animation::new(id, AnimationKind::FadeOut { destroy }, duration));
        }
    }

    /// Slide a widget from its current position to `to` over `duration`
    /// seconds.
    pub fn move_to(&mut self, id: WidgetId, to: Point, duration: f32) {
        let Some(from) = self.tree.get(id).map(|w| w.rect.origin) else {
            return;
        };
        self.animations
            .push(Animation::new(id, AnimationKind::MoveTo { from, to }, duration));
    }

    /// Number of animations currently running.
    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Modifiers, MouseButton};
    use cinder_ui_core::Rect;

    fn press(x: i32, y: i32) -> MousePressEvent {
        MousePressEvent {
            position: Point::new(x, y),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        }
    }

    fn context() -> UiContext {
        UiContext::create(Size::new(800, 600))
    }

    #[test]
    fn test_modal_swallows_outside_clicks() {
        let mut ctx = context();
        let root = ctx.root();
        let behind = ctx
            .tree_mut()
            .spawn(root, Widget::button("behind").with_rect(0, 0, 100, 50));
        let dialog = ctx
            .tree_mut()
            .spawn(root, Widget::window("Confirm").with_rect(300, 200, 200, 120));
        ctx.push_modal(dialog);

        // Press on the button behind the modal: swallowed, button untouched
        assert!(ctx.mouse_press(press(10, 10)));
        assert!(!ctx.tree().get(behind).unwrap().pressed);

        // Press inside the modal routes normally
        assert!(ctx.mouse_press(press(320, 260)));

        ctx.pop_modal();
        assert!(ctx.mouse_press(press(10, 10)));
        assert!(ctx.tree().get(behind).unwrap().pressed);
    }

    #[test]
    fn test_modal_confines_hover() {
        let mut ctx = context();
        let root = ctx.root();
        let behind = ctx
            .tree_mut()
            .spawn(root, Widget::button("behind").with_rect(0, 0, 100, 50));
        let dialog = ctx
            .tree_mut()
            .spawn(root, Widget::window("Confirm").with_rect(300, 200, 200, 120));
        ctx.push_modal(dialog);

        let move_event = |x, y| MouseMoveEvent {
            position: Point::new(x, y),
            delta: Point::new(1, 0),
            modifiers: Modifiers::NONE,
        };

        // Pointing at the widget behind the modal hovers nothing
        ctx.mouse_move(move_event(10, 10));
        assert!(!ctx.tree().get(behind).unwrap().hovered);
        assert!(ctx.hovered.is_none());

        // Inside the modal hover works normally
        ctx.mouse_move(move_event(320, 260));
        assert!(ctx.tree().get(dialog).unwrap().hovered);

        // Back outside: the modal loses hover too
        ctx.mouse_move(move_event(10, 10));
        assert!(!ctx.tree().get(dialog).unwrap().hovered);

        ctx.pop_modal();
        ctx.mouse_move(move_event(10, 10));
        assert!(ctx.tree().get(behind).unwrap().hovered);
    }

    #[test]
    fn test_press_release_click_round_trip() {
        let mut ctx = context();
        let root = ctx.root();
        let button = ctx
            .tree_mut()
            .spawn(root, Widget::button("ok").with_rect(10, 10, 80, 24));

        ctx.mouse_press(press(20, 20));
        ctx.mouse_release(MouseReleaseEvent {
            position: Point::new(20, 20),
            button: MouseButton::Left,
            modifiers: Modifiers::NONE,
        });

        let events = ctx.poll_events();
        assert!(events
            .iter()
            .any(|e| e.source == button && e.kind == crate::event::UiEventKind::Clicked));
    }

    #[test]
    fn test_hover_flags_follow_pointer() {
        let mut ctx = context();
        let root = ctx.root();
        let a = ctx
            .tree_mut()
            .spawn(root, Widget::panel().with_rect(0, 0, 100, 100));
        let b = ctx
            .tree_mut()
            .spawn(root, Widget::panel().with_rect(200, 0, 100, 100));

        let move_event = |x| MouseMoveEvent {
            position: Point::new(x, 50),
            delta: Point::new(1, 0),
            modifiers: Modifiers::NONE,
        };
        ctx.mouse_move(move_event(50));
        assert!(ctx.tree().get(a).unwrap().hovered);

        ctx.mouse_move(move_event(250));
        assert!(!ctx.tree().get(a).unwrap().hovered);
        assert!(ctx.tree().get(b).unwrap().hovered);
    }

    #[test]
    fn test_open_combo_gets_first_claim() {
        let mut ctx = context();
        let root = ctx.root();
        let mut widget = Widget::combo_box().with_rect(10, 10, 120, 24);
        if let crate::widget::WidgetKind::ComboBox(state) = &mut widget.kind {
            state.add_option("A");
            state.add_option("B");
        }
        let combo = ctx.tree_mut().spawn(root, widget);
        let other = ctx
            .tree_mut()
            .spawn(root, Widget::button("other").with_rect(400, 10, 80, 24));

        // Open the dropdown
        ctx.mouse_press(press(20, 20));
        assert_eq!(ctx.tree().open_combo, Some(combo));

        // Click a faraway button: dropdown closes, press routes on
        ctx.mouse_press(press(410, 20));
        assert_eq!(ctx.tree().open_combo, None);
        assert!(!ctx.tree().get(combo).unwrap().as_combo_box().unwrap().open);
        assert!(ctx.tree().get(other).unwrap().pressed);
    }

    #[test]
    fn test_destroy_widget_clears_observers() {
        let mut ctx = context();
        let root = ctx.root();
        let dialog = ctx
            .tree_mut()
            .spawn(root, Widget::window("w").with_rect(0, 0, 200, 100));
        ctx.push_modal(dialog);
        ctx.mouse_press(press(100, 50));
        assert!(ctx.pressed.is_some());

        ctx.destroy_widget(dialog);
        assert!(ctx.top_modal().is_none());
        assert!(ctx.pressed.is_none());
    }

    #[test]
    fn test_shutdown_empties_tree() {
        let mut ctx = context();
        let root = ctx.root();
        ctx.load_markup(root, "Panel\n  Button\n    text: hi");
        assert!(!ctx.tree().is_empty());

        ctx.shutdown();
        assert!(ctx.tree().is_empty());
        assert_eq!(ctx.animation_count(), 0);
    }

    #[test]
    fn test_update_steps_animations() {
        let mut ctx = context();
        let root = ctx.root();
        let panel = ctx
            .tree_mut()
            .spawn(root, Widget::panel().with_rect(0, 0, 10, 10));

        ctx.move_to(panel, Point::new(100, 0), 1.0);
        assert_eq!(ctx.animation_count(), 1);
        ctx.update(2.0);
        assert_eq!(ctx.animation_count(), 0);
        assert_eq!(
            ctx.tree().get(panel).unwrap().rect,
            Rect::new(100, 0, 10, 10)
        );
    }
}
