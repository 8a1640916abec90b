//! Static text label.

use cinder_ui_core::Color;

/// State for a text label. Labels never take focus or handle input.
#[derive(Debug, Clone)]
pub struct LabelState {
    /// Displayed text.
    pub text: String,
    /// Text color.
    pub color: Color,
    /// Font size in pixels.
    pub font_size: i32,
}

impl Default for LabelState {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Color::WHITE,
            font_size: 14,
        }
    }
}

impl LabelState {
    /// Label with the given text and default style.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}
