//! Capability traits the toolkit consumes from the host.
//!
//! The core never draws, loads files, or touches the clipboard directly; the
//! game client hands it implementations of these traits. Everything here is
//! deliberately minimal: draw primitives, text measurement, resource loading,
//! and clipboard access. Windowing, GPU batching, and text shaping live on
//! the other side of this boundary.

use cinder_ui_core::{Color, Point, Rect, Size};

/// Opaque handle to a texture owned by the host's renderer.
///
/// A handle is only meaningful to the [`Renderer`] / [`ResourceLoader`] pair
/// that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u64);

/// Draw primitives the widget tree paints through.
///
/// All coordinates are absolute screen pixels; colors arrive already scaled
/// by the cumulative widget opacity.
pub trait Renderer {
    /// Fill a rectangle with a solid color.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Stroke a rectangle outline.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: i32);

    /// Draw a texture stretched into `rect`.
    fn draw_texture(&mut self, texture: TextureHandle, rect: Rect, opacity: f32);

    /// Draw a single line of text with its top-left corner at `pos`.
    fn draw_text(&mut self, text: &str, pos: Point, color: Color, size: i32);

    /// Measure a single line of text at the given font size.
    fn measure_text(&mut self, text: &str, size: i32) -> Size;

    /// Push a clip rectangle. Subsequent draws are clipped to the
    /// intersection of all pushed rectangles.
    fn push_clip_rect(&mut self, rect: Rect);

    /// Pop the most recently pushed clip rectangle.
    fn pop_clip_rect(&mut self);
}

/// Host-side resource loading.
pub trait ResourceLoader {
    /// Load a texture by path. `None` on failure; the widget holding the
    /// handle simply skips that draw step.
    fn load_texture(&mut self, path: &str) -> Option<TextureHandle>;

    /// Read a text file (markup, style sheets). `None` on failure.
    fn read_text_file(&mut self, path: &str) -> Option<String>;
}

/// Platform services outside drawing and resources.
pub trait Platform {
    /// Current clipboard text, if any.
    fn clipboard_text(&mut self) -> Option<String>;

    /// Replace the clipboard contents.
    fn set_clipboard_text(&mut self, text: &str);
}

/// In-memory platform for hosts (and tests) without a system clipboard.
#[derive(Debug, Default)]
pub struct NullPlatform {
    text: Option<String>,
}

impl Platform for NullPlatform {
    fn clipboard_text(&mut self) -> Option<String> {
        self.text.clone()
    }

    fn set_clipboard_text(&mut self, text: &str) {
        self.text = Some(text.to_owned());
    }
}
