//! The draw pass.
//!
//! A pure tree walk: nothing is mutated while painting. Each level passes
//! down the accumulated absolute origin and cumulative opacity; a scrollable
//! panel additionally pushes a clip rectangle and shifts its children's
//! origin by the scroll offsets. Widgets with zero opacity or hidden flags
//! prune their whole subtree.

use cinder_ui_core::{Color, Point, Rect};

use crate::backend::Renderer;
use crate::widget::tree::WidgetTree;
use crate::widget::{Widget, WidgetId, WidgetKind};
use crate::widgets::window::WindowState;

// Chrome palette shared by the built-in widgets.
const TRACK_COLOR: Color = Color::new(0.16, 0.16, 0.18, 1.0);
const THUMB_COLOR: Color = Color::new(0.42, 0.42, 0.46, 1.0);
const ACCENT_COLOR: Color = Color::new(0.28, 0.46, 0.72, 1.0);
const CHROME_COLOR: Color = Color::new(0.12, 0.12, 0.14, 1.0);
const TEXT_PAD: i32 = 4;

/// Paint the whole tree through the host renderer.
pub fn draw_tree(tree: &WidgetTree, renderer: &mut dyn Renderer) {
    draw_widget(tree, tree.root(), Point::ZERO, 1.0, renderer);
}

fn draw_widget(
    tree: &WidgetTree,
    id: WidgetId,
    parent_origin: Point,
    parent_opacity: f32,
    renderer: &mut dyn Renderer,
) {
    let Some(widget) = tree.get(id) else {
        return;
    };
    let opacity = parent_opacity * widget.opacity;
    if !widget.visible || opacity <= 0.0 {
        return;
    }

    let origin = parent_origin + widget.rect.origin;
    let rect = Rect::from_origin_size(origin, widget.rect.size);

    draw_base(widget, rect, opacity, renderer);
    draw_kind(tree, widget, rect, opacity, renderer);

    let child_origin = origin + Point::new(widget.padding.left, widget.padding.top);
    match &widget.kind {
        WidgetKind::ScrollPanel(state) => {
            let viewport = state.viewport(widget.content_rect().size);
            renderer.push_clip_rect(viewport.translated(child_origin.x, child_origin.y));
            let scrolled = child_origin - Point::new(state.scroll_x(), state.scroll_y());
            for &child in widget.children() {
                draw_widget(tree, child, scrolled, opacity, renderer);
            }
            renderer.pop_clip_rect();
        }
        _ => {
            for &child in widget.children() {
                draw_widget(tree, child, child_origin, opacity, renderer);
            }
        }
    }
}

/// Background fill, background image, border. Shared by every kind.
fn draw_base(widget: &Widget, rect: Rect, opacity: f32, renderer: &mut dyn Renderer) {
    let background = widget.background.with_alpha_scaled(opacity);
    if !background.is_transparent() {
        renderer.fill_rect(rect, background);
    }
    if let Some(texture) = widget.background_image {
        renderer.draw_texture(texture, rect, opacity);
    }
    let border = widget.border_color.with_alpha_scaled(opacity);
    if widget.border_width > 0 && !border.is_transparent() {
        renderer.stroke_rect(rect, border, widget.border_width);
    }
}

fn draw_kind(
    tree: &WidgetTree,
    widget: &Widget,
    rect: Rect,
    opacity: f32,
    renderer: &mut dyn Renderer,
) {
    match &widget.kind {
        WidgetKind::Panel => {}
        WidgetKind::Label(state) => {
            let color = state.color.with_alpha_scaled(opacity);
            renderer.draw_text(
                &state.text,
                rect.origin + Point::new(TEXT_PAD, TEXT_PAD),
                color,
                state.font_size,
            );
        }
        WidgetKind::Button(state) => {
            // Pressed buttons darken, hovered ones lighten
            let tint = if widget.pressed {
                0.8
            } else if widget.hovered {
                1.0
            } else {
                0.9
            };
            let face = Color::new(
                THUMB_COLOR.r * tint,
                THUMB_COLOR.g * tint,
                THUMB_COLOR.b * tint,
                1.0,
            )
            .with_alpha_scaled(opacity);
            renderer.fill_rect(rect, face);
            let text_size = renderer.measure_text(&state.text, state.font_size);
            let pos = Point::new(
                rect.left() + (rect.width() - text_size.width) / 2,
                rect.top() + (rect.height() - text_size.height) / 2,
            );
            renderer.draw_text(
                &state.text,
                pos,
                state.text_color.with_alpha_scaled(opacity),
                state.font_size,
            );
        }
        WidgetKind::TextInput(state) => {
            renderer.fill_rect(rect, TRACK_COLOR.with_alpha_scaled(opacity));
            let display = state.display_text();
            let font_size = rect.height() - 2 * TEXT_PAD;
            if let Some((start, end)) = state.selection_range() {
                let start = state.display_offset(start);
                let end = state.display_offset(end);
                let lead = renderer.measure_text(&display[..start], font_size).width;
                let span = renderer.measure_text(&display[start..end], font_size).width;
                let highlight = Rect::new(
                    rect.left() + TEXT_PAD + lead,
                    rect.top() + 2,
                    span,
                    rect.height() - 4,
                );
                renderer.fill_rect(highlight, ACCENT_COLOR.with_alpha_scaled(opacity * 0.5));
            }
            renderer.draw_text(
                &display,
                rect.origin + Point::new(TEXT_PAD, TEXT_PAD),
                Color::WHITE.with_alpha_scaled(opacity),
                font_size,
            );
            if widget.focused {
                let lead = renderer
                    .measure_text(&display[..state.display_offset(state.cursor())], font_size)
                    .width;
                let caret = Rect::new(rect.left() + TEXT_PAD + lead, rect.top() + 2, 1, rect.height() - 4);
                renderer.fill_rect(caret, Color::WHITE.with_alpha_scaled(opacity));
            }
        }
        WidgetKind::ProgressBar(state) => {
            renderer.fill_rect(rect, TRACK_COLOR.with_alpha_scaled(opacity));
            let fill_width = (rect.width() as f32 * state.fraction()) as i32;
            if fill_width > 0 {
                let fill = Rect::new(rect.left(), rect.top(), fill_width, rect.height());
                renderer.fill_rect(fill, state.fill_color.with_alpha_scaled(opacity));
            }
            if state.show_text {
                let caption = format!("{}%", (state.fraction() * 100.0).round() as i32);
                let font_size = rect.height() - 2 * TEXT_PAD;
                let text_size = renderer.measure_text(&caption, font_size);
                let pos = Point::new(
                    rect.left() + (rect.width() - text_size.width) / 2,
                    rect.top() + (rect.height() - text_size.height) / 2,
                );
                renderer.draw_text(&caption, pos, Color::WHITE.with_alpha_scaled(opacity), font_size);
            }
        }
        WidgetKind::ScrollBar(state) => {
            renderer.fill_rect(rect, TRACK_COLOR.with_alpha_scaled(opacity));
            let local = Rect::from_origin_size(Point::ZERO, rect.size);
            let thumb = state
                .thumb_rect(local)
                .translated(rect.left(), rect.top());
            renderer.fill_rect(thumb, THUMB_COLOR.with_alpha_scaled(opacity));
        }
        WidgetKind::ScrollPanel(state) => {
            let size = widget.rect.size;
            if state.vertical_needed() {
                let track = state.vertical_track(size).translated(rect.left(), rect.top());
                renderer.fill_rect(track, TRACK_COLOR.with_alpha_scaled(opacity));
                let thumb = state
                    .vertical
                    .thumb_rect(state.vertical_track(size))
                    .translated(rect.left(), rect.top());
                renderer.fill_rect(thumb, THUMB_COLOR.with_alpha_scaled(opacity));
            }
            if state.horizontal_needed() {
                let track = state
                    .horizontal_track(size)
                    .translated(rect.left(), rect.top());
                renderer.fill_rect(track, TRACK_COLOR.with_alpha_scaled(opacity));
                let thumb = state
                    .horizontal
                    .thumb_rect(state.horizontal_track(size))
                    .translated(rect.left(), rect.top());
                renderer.fill_rect(thumb, THUMB_COLOR.with_alpha_scaled(opacity));
            }
        }
        WidgetKind::ComboBox(state) => {
            renderer.fill_rect(rect, TRACK_COLOR.with_alpha_scaled(opacity));
            let font_size = rect.height() - 2 * TEXT_PAD;
            if let Some(current) = state.current_option() {
                renderer.draw_text(
                    current,
                    rect.origin + Point::new(TEXT_PAD, TEXT_PAD),
                    Color::WHITE.with_alpha_scaled(opacity),
                    font_size,
                );
            }
            if state.open {
                let dropdown = state
                    .dropdown_rect(widget.rect.size)
                    .translated(rect.left(), rect.top());
                renderer.fill_rect(dropdown, CHROME_COLOR.with_alpha_scaled(opacity));
                for (index, option) in state.options().iter().enumerate() {
                    let row = Rect::new(
                        dropdown.left(),
                        dropdown.top() + index as i32 * state.row_height,
                        dropdown.width(),
                        state.row_height,
                    );
                    if index as i32 == state.hover_index {
                        renderer.fill_rect(row, ACCENT_COLOR.with_alpha_scaled(opacity));
                    }
                    renderer.draw_text(
                        option,
                        row.origin + Point::new(TEXT_PAD, 2),
                        Color::WHITE.with_alpha_scaled(opacity),
                        state.row_height - 4,
                    );
                }
            }
        }
        WidgetKind::Window(state) => {
            draw_window_chrome(tree, widget, state, rect, opacity, renderer);
        }
    }
}

fn draw_window_chrome(
    _tree: &WidgetTree,
    widget: &Widget,
    state: &WindowState,
    rect: Rect,
    opacity: f32,
    renderer: &mut dyn Renderer,
) {
    // Body behind the children, then the title bar strip on top of it
    renderer.fill_rect(rect, CHROME_COLOR.with_alpha_scaled(opacity));
    let bar = state
        .title_bar_rect(widget.rect.size)
        .translated(rect.left(), rect.top());
    let bar_color = if widget.focused { ACCENT_COLOR } else { TRACK_COLOR };
    renderer.fill_rect(bar, bar_color.with_alpha_scaled(opacity));
    renderer.draw_text(
        &state.title,
        bar.origin + Point::new(TEXT_PAD, TEXT_PAD),
        Color::WHITE.with_alpha_scaled(opacity),
        state.title_bar_height - 2 * TEXT_PAD,
    );
    if state.closeable {
        let close = state
            .close_button_rect(widget.rect.size)
            .translated(rect.left(), rect.top());
        renderer.fill_rect(close, THUMB_COLOR.with_alpha_scaled(opacity));
        renderer.draw_text(
            "x",
            close.origin + Point::new(close.width() / 4, 0),
            Color::WHITE.with_alpha_scaled(opacity),
            close.height(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::TextureHandle;
    use crate::widget::Widget;
    use cinder_ui_core::Size;

    #[derive(Default)]
    struct RecordingRenderer {
        fills: Vec<(Rect, Color)>,
        texts: Vec<(String, Point)>,
        clips: Vec<Rect>,
    }

    impl Renderer for RecordingRenderer {
        fn fill_rect(&mut self, rect: Rect, color: Color) {
            self.fills.push((rect, color));
        }
        fn stroke_rect(&mut self, _rect: Rect, _color: Color, _width: i32) {}
        fn draw_texture(&mut self, _texture: TextureHandle, _rect: Rect, _opacity: f32) {}
        fn draw_text(&mut self, text: &str, pos: Point, _color: Color, _size: i32) {
            self.texts.push((text.to_owned(), pos));
        }
        fn measure_text(&mut self, text: &str, size: i32) -> Size {
            Size::new(text.chars().count() as i32 * size / 2, size)
        }
        fn push_clip_rect(&mut self, rect: Rect) {
            self.clips.push(rect);
        }
        fn pop_clip_rect(&mut self) {}
    }

    #[test]
    fn test_hidden_subtree_draws_nothing() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let panel = tree.spawn(
            root,
            Widget::panel()
                .with_rect(0, 0, 100, 100)
                .with_background(Color::WHITE),
        );
        tree.spawn(panel, Widget::label("hi").with_rect(0, 0, 50, 20));
        tree.set_visible(panel, false);

        let mut renderer = RecordingRenderer::default();
        draw_tree(&tree, &mut renderer);
        assert!(renderer.fills.is_empty());
        assert!(renderer.texts.is_empty());
    }

    #[test]
    fn test_children_positions_accumulate_padding() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let panel = tree.spawn(
            root,
            Widget::panel()
                .with_rect(10, 10, 100, 100)
                .with_padding(cinder_ui_core::Edges::uniform(5)),
        );
        tree.spawn(panel, Widget::label("hi").with_rect(3, 4, 50, 20));

        let mut renderer = RecordingRenderer::default();
        draw_tree(&tree, &mut renderer);
        // 10 (panel) + 5 (padding) + 3 (label x) + 4 text pad
        assert_eq!(renderer.texts[0].1, Point::new(22, 23));
    }

    #[test]
    fn test_scroll_panel_clips_and_offsets() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let panel = tree.spawn(root, Widget::scroll_panel().with_rect(0, 0, 100, 100));
        tree.spawn(
            panel,
            Widget::panel()
                .with_rect(0, 150, 80, 20)
                .with_background(Color::WHITE),
        );
        // Content is 170 tall in a 100-tall viewport: scroll to the bottom
        tree.get_mut(panel)
            .unwrap()
            .as_scroll_panel_mut()
            .unwrap()
            .vertical
            .set_value(70);

        let mut renderer = RecordingRenderer::default();
        draw_tree(&tree, &mut renderer);

        assert!(!renderer.clips.is_empty());
        let child_fill = renderer
            .fills
            .iter()
            .find(|(_, c)| *c == Color::WHITE)
            .expect("child drawn");
        assert_eq!(child_fill.0.origin, Point::new(0, 80));
    }

    #[test]
    fn test_opacity_multiplies_down_the_tree() {
        let mut tree = WidgetTree::new();
        let root = tree.root();
        let outer = tree.spawn(
            root,
            Widget::panel()
                .with_rect(0, 0, 100, 100)
                .with_background(Color::WHITE),
        );
        tree.get_mut(outer).unwrap().opacity = 0.5;
        let inner = tree.spawn(
            outer,
            Widget::panel()
                .with_rect(0, 0, 50, 50)
                .with_background(Color::WHITE),
        );
        tree.get_mut(inner).unwrap().opacity = 0.5;

        let mut renderer = RecordingRenderer::default();
        draw_tree(&tree, &mut renderer);
        assert!((renderer.fills[0].1.a - 0.5).abs() < 1e-6);
        assert!((renderer.fills[1].1.a - 0.25).abs() < 1e-6);
    }
}
