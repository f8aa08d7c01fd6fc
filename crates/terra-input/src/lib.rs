//! Keyboard input for the terrain toggle hotkey: keybinding text form,
//! modifier tracking, and key-consumption state.

pub mod hotkey;
pub mod keybind;
pub mod modifiers;

pub use hotkey::{HotkeyListener, KeyOutcome};
pub use keybind::{Keybind, KeybindError};
pub use modifiers::{ModifierState, Modifiers, RawKeyEvent};
