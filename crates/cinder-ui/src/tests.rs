//! End-to-end scenarios exercising markup, routing, focus, and widget
//! behavior together through the public context API.

use crate::backend::NullPlatform;
use crate::event::UiEventKind;
use crate::input::{
    Key, KeyCombination, KeyPressEvent, Modifiers, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, TextInputEvent,
};
use crate::widget::{Widget, WidgetKind};
use crate::UiContext;
use cinder_ui_core::{Point, Size};

fn context() -> UiContext {
    UiContext::create(Size::new(800, 600))
}

fn press(x: i32, y: i32) -> MousePressEvent {
    MousePressEvent {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    }
}

fn release(x: i32, y: i32) -> MouseReleaseEvent {
    MouseReleaseEvent {
        position: Point::new(x, y),
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    }
}

fn drag(ctx: &mut UiContext, from: Point, to: Point) {
    ctx.mouse_press(MousePressEvent {
        position: from,
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    });
    ctx.mouse_move(MouseMoveEvent {
        position: to,
        delta: to - from,
        modifiers: Modifiers::NONE,
    });
    ctx.mouse_release(MouseReleaseEvent {
        position: to,
        button: MouseButton::Left,
        modifiers: Modifiers::NONE,
    });
}

fn key(key: Key, modifiers: Modifiers) -> KeyPressEvent {
    KeyPressEvent {
        key,
        modifiers,
        repeat: false,
    }
}

#[test]
fn test_markup_click_scenario() {
    let mut ctx = context();
    let root = ctx.root();
    let created = ctx.load_markup(
        root,
        "Panel\n  id: toolbar\n  width: 800\n  height: 40\n  Button\n    id: save\n    text: Save\n    x: 10\n    y: 8\n    width: 80\n    height: 24",
    );
    assert_eq!(created.len(), 1);
    let save = ctx.tree().find_by_name(root, "save").unwrap();

    ctx.mouse_press(press(20, 20));
    ctx.mouse_release(release(20, 20));

    let events = ctx.poll_events();
    assert!(events
        .iter()
        .any(|e| e.source == save && e.kind == UiEventKind::Clicked));
}

#[test]
fn test_scroll_bar_drag_to_midpoint_reads_half_range() {
    let mut ctx = context();
    let root = ctx.root();
    let mut widget = Widget::scroll_bar().with_rect(700, 0, 12, 120);
    if let WidgetKind::ScrollBar(state) = &mut widget.kind {
        state.set_range(0, 100);
        state.page_step = 10;
    }
    let bar = ctx.tree_mut().spawn(root, widget);

    // Thumb starts at the top; grab it and drag so its origin lands at
    // mid-travel. Track 120, thumb 12, travel 108.
    drag(&mut ctx, Point::new(706, 2), Point::new(706, 56));

    let value = ctx.tree().get(bar).unwrap().as_scroll_bar().unwrap().value();
    assert!((value - 50).abs() <= 1, "midpoint drag read {value}");
    // The clamped value changed exactly once per move
    assert!(ctx
        .poll_events()
        .iter()
        .any(|e| matches!(e.kind, UiEventKind::ValueChanged(_))));
}

#[test]
fn test_combo_down_down_enter_selects_third() {
    let mut ctx = context();
    let root = ctx.root();
    let mut widget = Widget::combo_box().with_rect(10, 10, 120, 24);
    if let WidgetKind::ComboBox(state) = &mut widget.kind {
        for option in ["A", "B", "C"] {
            state.add_option(option);
        }
    }
    let combo = ctx.tree_mut().spawn(root, widget);

    let mut platform = NullPlatform::default();
    ctx.mouse_press(press(20, 20)); // opens and focuses
    ctx.key_press(key(Key::ArrowDown, Modifiers::NONE), &mut platform);
    ctx.key_press(key(Key::ArrowDown, Modifiers::NONE), &mut platform);
    ctx.key_press(key(Key::Enter, Modifiers::NONE), &mut platform);

    let state = ctx.tree().get(combo).unwrap().as_combo_box().unwrap();
    assert_eq!(state.current_option(), Some("C"));
}

#[test]
fn test_window_resize_never_violates_min_size() {
    let mut ctx = context();
    let root = ctx.root();
    let mut widget = Widget::window("Bag").with_rect(200, 200, 300, 200);
    if let WidgetKind::Window(state) = &mut widget.kind {
        state.min_size = Size::new(100, 50);
    }
    let window = ctx.tree_mut().spawn(root, widget);

    // Drag the top-left corner far past the bottom-right corner
    drag(&mut ctx, Point::new(202, 202), Point::new(3000, 3000));

    let rect = ctx.tree().get(window).unwrap().rect;
    assert!(rect.width() >= 100 && rect.height() >= 50);
    // The bottom-right corner stayed pinned
    assert_eq!(rect.right(), 500);
    assert_eq!(rect.bottom(), 400);
}

#[test]
fn test_text_input_focus_type_select_replace() {
    let mut ctx = context();
    let root = ctx.root();
    let input = ctx
        .tree_mut()
        .spawn(root, Widget::text_input().with_rect(10, 10, 200, 22));

    let mut platform = NullPlatform::default();
    ctx.mouse_press(press(50, 20));
    assert!(ctx.tree().get(input).unwrap().focused);

    ctx.text_input(TextInputEvent {
        text: "hello".to_owned(),
    });
    ctx.key_press(key(Key::A, Modifiers::CTRL), &mut platform);
    ctx.text_input(TextInputEvent {
        text: "bye".to_owned(),
    });

    let state = ctx.tree().get(input).unwrap().as_text_input().unwrap();
    assert_eq!(state.text(), "bye");
    assert_eq!(state.cursor(), 3);
}

#[test]
fn test_hotkeys_require_exact_modifiers_and_skip_repeats() {
    let mut ctx = context();
    let fired = std::rc::Rc::new(std::cell::Cell::new(0));
    let fired_inner = std::rc::Rc::clone(&fired);
    ctx.hotkeys_mut().register(
        "save",
        KeyCombination::new(Key::S, Modifiers::CTRL),
        "Save the current layout",
        Box::new(move || fired_inner.set(fired_inner.get() + 1)),
    );

    let mut platform = NullPlatform::default();
    // Wrong modifiers (extra Shift): exact-match only
    ctx.key_press(key(Key::S, Modifiers::CTRL_SHIFT), &mut platform);
    assert_eq!(fired.get(), 0);

    ctx.key_press(key(Key::S, Modifiers::CTRL), &mut platform);
    assert_eq!(fired.get(), 1);

    // Auto-repeat never re-fires
    ctx.key_press(
        KeyPressEvent {
            key: Key::S,
            modifiers: Modifiers::CTRL,
            repeat: true,
        },
        &mut platform,
    );
    assert_eq!(fired.get(), 1);
}

#[test]
fn test_anchored_layout_tracks_viewport_resize() {
    let mut ctx = context();
    let root = ctx.root();
    ctx.tree_mut().get_mut(root).unwrap().layout = crate::LayoutMode::Anchored;
    let panel = ctx.tree_mut().spawn(
        root,
        Widget::panel()
            .with_rect(0, 0, 100, 40)
            .with_anchor(crate::Anchor::to_parent(
                crate::Edge::Right,
                crate::Edge::Right,
                -10,
            ))
            .with_anchor(crate::Anchor::to_parent(
                crate::Edge::Bottom,
                crate::Edge::Bottom,
                0,
            )),
    );
    assert_eq!(
        ctx.tree().get(panel).unwrap().rect.origin,
        Point::new(690, 560)
    );

    ctx.set_viewport(Size::new(1024, 768));
    assert_eq!(
        ctx.tree().get(panel).unwrap().rect.origin,
        Point::new(914, 728)
    );
}

#[test]
fn test_fade_out_destroys_target_and_retires_animation() {
    let mut ctx = context();
    let root = ctx.root();
    let panel = ctx
        .tree_mut()
        .spawn(root, Widget::panel().with_rect(0, 0, 50, 50));

    ctx.fade_out(panel, 0.1, true);
    ctx.update(0.2);
    assert!(!ctx.tree().contains(panel));
    assert_eq!(ctx.animation_count(), 0);
}

#[test]
fn test_styles_are_looked_up_not_applied() {
    let mut ctx = context();
    ctx.load_styles("Button {\n  background-color: #112233;\n}\n");
    assert_eq!(ctx.styles().get("Button", "background-color"), Some("#112233"));

    // Creating a button afterwards does not auto-apply the rule
    let root = ctx.root();
    let created = ctx.load_markup(root, "Button\n  text: hi");
    let widget = ctx.tree().get(created[0]).unwrap();
    assert!(widget.background.is_transparent());
}
