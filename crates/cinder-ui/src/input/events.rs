//! Typed input event definitions.
//!
//! The host feeds raw device events into [`InputState`](super::state::InputState)
//! and the [`UiContext`](crate::context::UiContext); these are the normalized
//! forms the widget tree sees.

use cinder_ui_core::Point;

/// Keyboard modifiers that may be held during input events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Modifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held.
    pub control: bool,
    /// The Alt key is held.
    pub alt: bool,
}

impl Modifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
    };

    /// Control + Shift modifiers.
    pub const CTRL_SHIFT: Self = Self {
        shift: true,
        control: true,
        alt: false,
    };

    /// Check if no modifiers are pressed.
    pub fn none(&self) -> bool {
        !self.shift && !self.control && !self.alt
    }
}

/// Mouse buttons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MouseButton {
    /// Primary button (usually left).
    Left = 0,
    /// Secondary button (usually right).
    Right = 1,
    /// Middle button (scroll wheel click).
    Middle = 2,
}

impl MouseButton {
    /// All buttons, for iterating edge state.
    pub const ALL: [MouseButton; 3] = [MouseButton::Left, MouseButton::Right, MouseButton::Middle];
}

/// Logical keys the toolkit understands.
///
/// Printable input arrives separately as text-input events; this enum covers
/// the keys widgets and hotkeys dispatch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Digits (top row)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowLeft, ArrowRight, ArrowUp, ArrowDown,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete, Insert, Enter, Tab, Space, Escape,

    // Function keys
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,

    /// A key the normalization layer could not classify.
    Unknown,
}

impl Key {
    /// Parse a key name as used in hotkey combination strings
    /// (`"S"`, `"Enter"`, `"F5"`). Case-insensitive.
    pub fn from_name(name: &str) -> Option<Key> {
        let upper = name.to_ascii_uppercase();
        let key = match upper.as_str() {
            "A" => Key::A, "B" => Key::B, "C" => Key::C, "D" => Key::D,
            "E" => Key::E, "F" => Key::F, "G" => Key::G, "H" => Key::H,
            "I" => Key::I, "J" => Key::J, "K" => Key::K, "L" => Key::L,
            "M" => Key::M, "N" => Key::N, "O" => Key::O, "P" => Key::P,
            "Q" => Key::Q, "R" => Key::R, "S" => Key::S, "T" => Key::T,
            "U" => Key::U, "V" => Key::V, "W" => Key::W, "X" => Key::X,
            "Y" => Key::Y, "Z" => Key::Z,
            "0" => Key::Digit0, "1" => Key::Digit1, "2" => Key::Digit2,
            "3" => Key::Digit3, "4" => Key::Digit4, "5" => Key::Digit5,
            "6" => Key::Digit6, "7" => Key::Digit7, "8" => Key::Digit8,
            "9" => Key::Digit9,
            "LEFT" => Key::ArrowLeft,
            "RIGHT" => Key::ArrowRight,
            "UP" => Key::ArrowUp,
            "DOWN" => Key::ArrowDown,
            "HOME" => Key::Home,
            "END" => Key::End,
            "PAGEUP" => Key::PageUp,
            "PAGEDOWN" => Key::PageDown,
            "BACKSPACE" => Key::Backspace,
            "DELETE" => Key::Delete,
            "INSERT" => Key::Insert,
            "ENTER" | "RETURN" => Key::Enter,
            "TAB" => Key::Tab,
            "SPACE" => Key::Space,
            "ESCAPE" | "ESC" => Key::Escape,
            "F1" => Key::F1, "F2" => Key::F2, "F3" => Key::F3,
            "F4" => Key::F4, "F5" => Key::F5, "F6" => Key::F6,
            "F7" => Key::F7, "F8" => Key::F8, "F9" => Key::F9,
            "F10" => Key::F10, "F11" => Key::F11, "F12" => Key::F12,
            _ => return None,
        };
        Some(key)
    }
}

/// Mouse button was pressed.
#[derive(Debug, Clone, Copy)]
pub struct MousePressEvent {
    /// Absolute pointer position.
    pub position: Point,
    /// The button that was pressed.
    pub button: MouseButton,
    /// Modifiers held at press time.
    pub modifiers: Modifiers,
}

/// Mouse button was released.
#[derive(Debug, Clone, Copy)]
pub struct MouseReleaseEvent {
    /// Absolute pointer position.
    pub position: Point,
    /// The button that was released.
    pub button: MouseButton,
    /// Modifiers held at release time.
    pub modifiers: Modifiers,
}

/// Mouse cursor moved.
#[derive(Debug, Clone, Copy)]
pub struct MouseMoveEvent {
    /// Absolute pointer position.
    pub position: Point,
    /// Movement since the previous event.
    pub delta: Point,
    /// Modifiers held during the move.
    pub modifiers: Modifiers,
}

/// Mouse wheel was scrolled.
#[derive(Debug, Clone, Copy)]
pub struct WheelEvent {
    /// Absolute pointer position.
    pub position: Point,
    /// Scroll delta in notches; positive scrolls up/away.
    pub delta: i32,
    /// Modifiers held during the scroll.
    pub modifiers: Modifiers,
}

/// A key went down.
#[derive(Debug, Clone, Copy)]
pub struct KeyPressEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held at press time.
    pub modifiers: Modifiers,
    /// Whether this is an auto-repeat of a held key.
    pub repeat: bool,
}

/// A key was released.
#[derive(Debug, Clone, Copy)]
pub struct KeyReleaseEvent {
    /// The logical key.
    pub key: Key,
    /// Modifiers held at release time.
    pub modifiers: Modifiers,
}

/// Committed text from the platform's input method, routed to the focused
/// widget chain. Usually one character, but IME composition can deliver
/// several at once.
#[derive(Debug, Clone)]
pub struct TextInputEvent {
    /// The committed text.
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_from_name() {
        assert_eq!(Key::from_name("s"), Some(Key::S));
        assert_eq!(Key::from_name("Enter"), Some(Key::Enter));
        assert_eq!(Key::from_name("RETURN"), Some(Key::Enter));
        assert_eq!(Key::from_name("F5"), Some(Key::F5));
        assert_eq!(Key::from_name("pageup"), Some(Key::PageUp));
        assert_eq!(Key::from_name("Hyper"), None);
    }

    #[test]
    fn test_modifier_consts() {
        assert!(Modifiers::NONE.none());
        assert!(Modifiers::CTRL.control);
        assert!(!Modifiers::CTRL.shift);
        assert!(Modifiers::CTRL_SHIFT.shift && Modifiers::CTRL_SHIFT.control);
    }
}
