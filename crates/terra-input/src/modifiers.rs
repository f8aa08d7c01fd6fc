//! Modifier bitflags and held-modifier tracking.
//!
//! Physical key codes are used throughout so that bindings behave the same
//! regardless of keyboard layout.

use serde::{Deserialize, Serialize};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

impl RawKeyEvent {
    /// Converts a winit [`KeyEvent`].
    #[must_use]
    pub fn from_winit(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }

    /// A non-repeat press of `code`.
    #[must_use]
    pub fn press(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Pressed,
            repeat: false,
        }
    }

    /// A release of `code`.
    #[must_use]
    pub fn release(code: KeyCode) -> Self {
        Self {
            key: PhysicalKey::Code(code),
            state: ElementState::Released,
            repeat: false,
        }
    }
}

/// Modifier key bitflags. Combines via bitwise OR.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Modifiers(pub u8);

impl Modifiers {
    /// No modifiers.
    pub const NONE: Self = Self(0);
    /// Shift key.
    pub const SHIFT: Self = Self(1 << 0);
    /// Control key.
    pub const CTRL: Self = Self(1 << 1);
    /// Alt key.
    pub const ALT: Self = Self(1 << 2);
    /// Super/Meta/Win key.
    pub const SUPER: Self = Self(1 << 3);

    /// Returns true if `self` contains all bits in `other`.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns true if no modifier bits are set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `self` with the bits of `other` cleared.
    #[must_use]
    pub fn without(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }

    /// The modifier a physical key contributes while held, if any.
    #[must_use]
    pub fn for_key(code: KeyCode) -> Self {
        match code {
            KeyCode::ShiftLeft | KeyCode::ShiftRight => Self::SHIFT,
            KeyCode::ControlLeft | KeyCode::ControlRight => Self::CTRL,
            KeyCode::AltLeft | KeyCode::AltRight => Self::ALT,
            KeyCode::SuperLeft | KeyCode::SuperRight => Self::SUPER,
            _ => Self::NONE,
        }
    }
}

impl std::ops::BitOr for Modifiers {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for Modifiers {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl std::ops::BitAnd for Modifiers {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

/// Tracks which modifier keys are currently held.
///
/// Left and right variants are tracked separately so that releasing one
/// Shift while the other is still down keeps [`Modifiers::SHIFT`] active.
#[derive(Debug, Clone, Default)]
pub struct ModifierState {
    held: Vec<KeyCode>,
}

impl ModifierState {
    /// Creates a state with no modifiers held.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates held modifiers from a raw event. Non-modifier keys are ignored.
    pub fn process_raw(&mut self, event: RawKeyEvent) {
        let PhysicalKey::Code(code) = event.key else {
            return;
        };
        if Modifiers::for_key(code).is_empty() {
            return;
        }
        match event.state {
            ElementState::Pressed => {
                if !self.held.contains(&code) {
                    self.held.push(code);
                }
            }
            ElementState::Released => self.held.retain(|held| *held != code),
        }
    }

    /// The union of all held modifiers.
    #[must_use]
    pub fn current(&self) -> Modifiers {
        self.held
            .iter()
            .fold(Modifiers::NONE, |acc, code| acc | Modifiers::for_key(*code))
    }

    /// Returns `true` while either Shift key is held.
    #[must_use]
    pub fn shift_held(&self) -> bool {
        self.current().contains(Modifiers::SHIFT)
    }

    /// Forget all held modifiers (e.g. on focus loss).
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_combine() {
        let both = Modifiers::CTRL | Modifiers::SHIFT;
        assert!(both.contains(Modifiers::CTRL));
        assert!(both.contains(Modifiers::SHIFT));
        assert!(!both.contains(Modifiers::ALT));
        assert_eq!(both.without(Modifiers::CTRL), Modifiers::SHIFT);
        assert!(Modifiers::NONE.is_empty());
    }

    #[test]
    fn test_for_key() {
        assert_eq!(Modifiers::for_key(KeyCode::ShiftRight), Modifiers::SHIFT);
        assert_eq!(Modifiers::for_key(KeyCode::ControlLeft), Modifiers::CTRL);
        assert_eq!(Modifiers::for_key(KeyCode::KeyT), Modifiers::NONE);
    }

    #[test]
    fn test_state_tracks_press_and_release() {
        let mut state = ModifierState::new();
        state.process_raw(RawKeyEvent::press(KeyCode::ControlLeft));
        state.process_raw(RawKeyEvent::press(KeyCode::KeyT));
        assert_eq!(state.current(), Modifiers::CTRL);

        state.process_raw(RawKeyEvent::release(KeyCode::ControlLeft));
        assert!(state.current().is_empty());
    }

    #[test]
    fn test_left_and_right_shift_overlap() {
        let mut state = ModifierState::new();
        state.process_raw(RawKeyEvent::press(KeyCode::ShiftLeft));
        state.process_raw(RawKeyEvent::press(KeyCode::ShiftRight));
        state.process_raw(RawKeyEvent::release(KeyCode::ShiftLeft));
        assert!(state.shift_held());

        state.process_raw(RawKeyEvent::release(KeyCode::ShiftRight));
        assert!(!state.shift_held());
    }

    #[test]
    fn test_clear_drops_everything() {
        let mut state = ModifierState::new();
        state.process_raw(RawKeyEvent::press(KeyCode::AltLeft));
        state.clear();
        assert!(state.current().is_empty());
    }
}
