//! Edge-triggered key and button state.
//!
//! For every key and mouse button the input manager tracks a level flag
//! (`pressed`: currently held) and two single-frame edge flags (`down`:
//! transitioned to pressed this frame, `up`: released this frame). The host
//! calls [`InputState::begin_frame`] at the top of each tick, then feeds raw
//! events; frame logic that runs afterwards sees the edges exactly once.

use std::collections::HashSet;

use super::events::{Key, Modifiers, MouseButton};

/// Per-frame keyboard and mouse state.
#[derive(Debug, Default)]
pub struct InputState {
    keys_pressed: HashSet<Key>,
    keys_down: HashSet<Key>,
    keys_up: HashSet<Key>,

    buttons_pressed: HashSet<MouseButton>,
    buttons_down: HashSet<MouseButton>,
    buttons_up: HashSet<MouseButton>,

    modifiers: Modifiers,
}

impl InputState {
    /// Create a new input state with nothing held.
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the single-frame edge flags. Call once at the start of every
    /// frame, before feeding raw events.
    pub fn begin_frame(&mut self) {
        self.keys_down.clear();
        self.keys_up.clear();
        self.buttons_down.clear();
        self.buttons_up.clear();
    }

    /// Record a raw key-down. Repeats update modifiers but do not re-set the
    /// edge flag.
    pub fn on_key_down(&mut self, key: Key, modifiers: Modifiers, repeat: bool) {
        self.modifiers = modifiers;
        if !repeat && self.keys_pressed.insert(key) {
            self.keys_down.insert(key);
        }
    }

    /// Record a raw key-up.
    pub fn on_key_up(&mut self, key: Key, modifiers: Modifiers) {
        self.modifiers = modifiers;
        if self.keys_pressed.remove(&key) {
            self.keys_up.insert(key);
        }
    }

    /// Record a raw mouse button press.
    pub fn on_button_down(&mut self, button: MouseButton) {
        if self.buttons_pressed.insert(button) {
            self.buttons_down.insert(button);
        }
    }

    /// Record a raw mouse button release.
    pub fn on_button_up(&mut self, button: MouseButton) {
        if self.buttons_pressed.remove(&button) {
            self.buttons_up.insert(button);
        }
    }

    /// Whether the key is currently held (level state).
    #[inline]
    pub fn is_key_pressed(&self, key: Key) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Whether the key went down this frame (edge state).
    #[inline]
    pub fn was_key_pressed(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// Whether the key was released this frame (edge state).
    #[inline]
    pub fn was_key_released(&self, key: Key) -> bool {
        self.keys_up.contains(&key)
    }

    /// Whether the button is currently held (level state).
    #[inline]
    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    /// Whether the button went down this frame (edge state).
    #[inline]
    pub fn was_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    /// Whether the button was released this frame (edge state).
    #[inline]
    pub fn was_button_released(&self, button: MouseButton) -> bool {
        self.buttons_up.contains(&button)
    }

    /// Modifiers as of the most recent key event.
    #[inline]
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_flags_last_one_frame() {
        let mut input = InputState::new();

        input.begin_frame();
        input.on_key_down(Key::W, Modifiers::NONE, false);
        assert!(input.is_key_pressed(Key::W));
        assert!(input.was_key_pressed(Key::W));

        // Next frame: still held, but no longer edge-down
        input.begin_frame();
        assert!(input.is_key_pressed(Key::W));
        assert!(!input.was_key_pressed(Key::W));

        input.on_key_up(Key::W, Modifiers::NONE);
        assert!(!input.is_key_pressed(Key::W));
        assert!(input.was_key_released(Key::W));

        input.begin_frame();
        assert!(!input.was_key_released(Key::W));
    }

    #[test]
    fn test_repeat_does_not_retrigger_edge() {
        let mut input = InputState::new();

        input.begin_frame();
        input.on_key_down(Key::A, Modifiers::NONE, false);
        input.begin_frame();
        input.on_key_down(Key::A, Modifiers::NONE, true);
        assert!(input.is_key_pressed(Key::A));
        assert!(!input.was_key_pressed(Key::A));
    }

    #[test]
    fn test_button_edges() {
        let mut input = InputState::new();

        input.begin_frame();
        input.on_button_down(MouseButton::Left);
        assert!(input.was_button_pressed(MouseButton::Left));

        // A second down for a button already held is not a new edge
        input.begin_frame();
        input.on_button_down(MouseButton::Left);
        assert!(!input.was_button_pressed(MouseButton::Left));

        input.on_button_up(MouseButton::Left);
        assert!(input.was_button_released(MouseButton::Left));
        assert!(!input.is_button_pressed(MouseButton::Left));
    }
}
