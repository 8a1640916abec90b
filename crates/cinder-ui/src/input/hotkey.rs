//! Hotkey registry with modifier matching.
//!
//! Hotkeys are registered by identifier and fire on non-repeat key-down
//! events. Matching requires *exact* equality of the Ctrl/Shift/Alt bits
//! between the registered combination and the event's modifiers, not a
//! subset test: `Ctrl+S` does not fire on `Ctrl+Shift+S`. Every matching
//! enabled hotkey fires, not just the first.

use std::collections::HashMap;
use std::fmt;

use cinder_ui_core::logging::targets;
use tracing::debug;

use super::events::{Key, KeyPressEvent, Modifiers};

/// A key plus an exact modifier mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombination {
    /// The main key.
    pub key: Key,
    /// Required modifier state, matched exactly.
    pub modifiers: Modifiers,
}

impl KeyCombination {
    /// Create a new combination.
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    /// A bare key with no modifiers.
    pub fn key_only(key: Key) -> Self {
        Self::new(key, Modifiers::NONE)
    }

    /// Ctrl + key.
    pub fn ctrl(key: Key) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// Check whether the combination matches an event exactly.
    pub fn matches(&self, key: Key, modifiers: Modifiers) -> bool {
        self.key == key
            && self.modifiers.control == modifiers.control
            && self.modifiers.shift == modifiers.shift
            && self.modifiers.alt == modifiers.alt
    }

    /// Parse a combination string like `"Ctrl+Shift+S"` or `"F5"`.
    ///
    /// Modifier tokens (`Ctrl`, `Shift`, `Alt`, case-insensitive) may appear
    /// in any order before the final key name.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = Modifiers::NONE;
        let mut key = None;

        for part in s.split('+') {
            let part = part.trim();
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" => modifiers.control = true,
                "shift" => modifiers.shift = true,
                "alt" => modifiers.alt = true,
                _ => {
                    if key.is_some() {
                        return None; // two non-modifier tokens
                    }
                    key = Some(Key::from_name(part)?);
                }
            }
        }

        key.map(|key| Self { key, modifiers })
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.control {
            write!(f, "Ctrl+")?;
        }
        if self.modifiers.shift {
            write!(f, "Shift+")?;
        }
        if self.modifiers.alt {
            write!(f, "Alt+")?;
        }
        write!(f, "{:?}", self.key)
    }
}

/// Action invoked when a hotkey fires.
pub type HotkeyAction = Box<dyn FnMut()>;

/// A registered hotkey.
pub struct Hotkey {
    /// The key combination that triggers the hotkey.
    pub combination: KeyCombination,
    /// Human-readable action label (for key-binding UIs).
    pub label: String,
    /// Whether the hotkey currently fires.
    pub enabled: bool,
    action: HotkeyAction,
}

impl fmt::Debug for Hotkey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hotkey")
            .field("combination", &self.combination)
            .field("label", &self.label)
            .field("enabled", &self.enabled)
            .finish_non_exhaustive()
    }
}

/// Registry of hotkeys keyed by identifier.
#[derive(Debug, Default)]
pub struct HotkeyRegistry {
    hotkeys: HashMap<String, Hotkey>,
}

impl HotkeyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) a hotkey under an identifier.
    pub fn register(
        &mut self,
        id: impl Into<String>,
        combination: KeyCombination,
        label: impl Into<String>,
        action: HotkeyAction,
    ) {
        let id = id.into();
        debug!(target: targets::INPUT, hotkey = %id, combo = %combination, "registering hotkey");
        self.hotkeys.insert(
            id,
            Hotkey {
                combination,
                label: label.into(),
                enabled: true,
                action,
            },
        );
    }

    /// Remove a hotkey. Returns whether it existed.
    pub fn unregister(&mut self, id: &str) -> bool {
        self.hotkeys.remove(id).is_some()
    }

    /// Enable or disable a hotkey. Unknown ids are ignored.
    pub fn set_enabled(&mut self, id: &str, enabled: bool) {
        if let Some(hotkey) = self.hotkeys.get_mut(id) {
            hotkey.enabled = enabled;
        }
    }

    /// Look up a hotkey by identifier.
    pub fn get(&self, id: &str) -> Option<&Hotkey> {
        self.hotkeys.get(id)
    }

    /// Number of registered hotkeys.
    pub fn len(&self) -> usize {
        self.hotkeys.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.hotkeys.is_empty()
    }

    /// Feed a key-down event through the registry.
    ///
    /// Fires every enabled hotkey whose combination matches exactly; repeats
    /// never fire. Returns the number of hotkeys that fired.
    pub fn handle_key_press(&mut self, event: &KeyPressEvent) -> usize {
        if event.repeat {
            return 0;
        }

        let mut fired = 0;
        for hotkey in self.hotkeys.values_mut() {
            if hotkey.enabled && hotkey.combination.matches(event.key, event.modifiers) {
                (hotkey.action)();
                fired += 1;
            }
        }
        fired
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn press(key: Key, modifiers: Modifiers, repeat: bool) -> KeyPressEvent {
        KeyPressEvent {
            key,
            modifiers,
            repeat,
        }
    }

    #[test]
    fn test_parse_combination() {
        let combo = KeyCombination::parse("Ctrl+Shift+S").unwrap();
        assert_eq!(combo.key, Key::S);
        assert!(combo.modifiers.control && combo.modifiers.shift && !combo.modifiers.alt);

        assert_eq!(
            KeyCombination::parse("F5"),
            Some(KeyCombination::key_only(Key::F5))
        );
        assert!(KeyCombination::parse("Ctrl+").is_none());
        assert!(KeyCombination::parse("Ctrl+S+T").is_none());
    }

    #[test]
    fn test_exact_modifier_match() {
        let combo = KeyCombination::ctrl(Key::S);
        assert!(combo.matches(Key::S, Modifiers::CTRL));
        // Extra shift must NOT match: equality, not subset
        assert!(!combo.matches(Key::S, Modifiers::CTRL_SHIFT));
        assert!(!combo.matches(Key::S, Modifiers::NONE));
    }

    #[test]
    fn test_all_matching_hotkeys_fire() {
        let mut registry = HotkeyRegistry::new();
        let count = Rc::new(Cell::new(0));

        for id in ["first", "second"] {
            let count = Rc::clone(&count);
            registry.register(
                id,
                KeyCombination::ctrl(Key::S),
                "Save",
                Box::new(move || count.set(count.get() + 1)),
            );
        }

        let fired = registry.handle_key_press(&press(Key::S, Modifiers::CTRL, false));
        assert_eq!(fired, 2);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_repeat_and_disabled_do_not_fire() {
        let mut registry = HotkeyRegistry::new();
        let count = Rc::new(Cell::new(0));
        let c = Rc::clone(&count);
        registry.register(
            "save",
            KeyCombination::ctrl(Key::S),
            "Save",
            Box::new(move || c.set(c.get() + 1)),
        );

        assert_eq!(registry.handle_key_press(&press(Key::S, Modifiers::CTRL, true)), 0);

        registry.set_enabled("save", false);
        assert_eq!(registry.handle_key_press(&press(Key::S, Modifiers::CTRL, false)), 0);

        registry.set_enabled("save", true);
        assert_eq!(registry.handle_key_press(&press(Key::S, Modifiers::CTRL, false)), 1);
        assert_eq!(count.get(), 1);

        assert!(registry.unregister("save"));
        assert!(!registry.unregister("save"));
    }
}
