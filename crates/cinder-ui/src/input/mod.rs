//! Input normalization: typed events, edge-triggered state, hotkeys.

pub mod events;
pub mod hotkey;
pub mod state;

pub use events::{
    Key, KeyPressEvent, KeyReleaseEvent, Modifiers, MouseButton, MouseMoveEvent, MousePressEvent,
    MouseReleaseEvent, TextInputEvent, WheelEvent,
};
pub use hotkey::{Hotkey, HotkeyAction, HotkeyRegistry, KeyCombination};
pub use state::InputState;
