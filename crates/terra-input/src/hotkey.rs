//! Toggle-hotkey detection with key consumption.
//!
//! A matching press toggles and is consumed; the release of that press and
//! any characters typed while it is held are consumed too, so the keystroke
//! never reaches other listeners (e.g. a chat box).

use tracing::debug;
use winit::event::ElementState;
use winit::keyboard::PhysicalKey;

use crate::keybind::Keybind;
use crate::modifiers::{ModifierState, RawKeyEvent};

/// Result of feeding one key event to the listener.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyOutcome {
    /// The toggle hotkey fired.
    pub toggled: bool,
    /// The event must not be forwarded to other listeners.
    pub consumed: bool,
}

/// Watches raw key events for the configured toggle hotkey.
#[derive(Debug, Clone, Default)]
pub struct HotkeyListener {
    enabled: bool,
    binding: Option<Keybind>,
    modifiers: ModifierState,
    consuming: bool,
}

impl HotkeyListener {
    /// Creates a listener. A `None` binding never matches.
    #[must_use]
    pub fn new(enabled: bool, binding: Option<Keybind>) -> Self {
        Self {
            enabled,
            binding,
            ..Self::default()
        }
    }

    /// Replace the enable flag and binding after a settings change.
    pub fn reconfigure(&mut self, enabled: bool, binding: Option<Keybind>) {
        debug!(enabled, binding = ?binding, "Hotkey reconfigured");
        self.enabled = enabled;
        self.binding = binding;
        if !enabled {
            self.consuming = false;
        }
    }

    /// The active binding, if set.
    #[must_use]
    pub fn binding(&self) -> Option<Keybind> {
        self.binding
    }

    /// Held modifiers as seen by the listener.
    #[must_use]
    pub fn modifiers(&self) -> &ModifierState {
        &self.modifiers
    }

    /// Process one key press or release.
    pub fn process(&mut self, event: RawKeyEvent) -> KeyOutcome {
        self.modifiers.process_raw(event);

        match event.state {
            ElementState::Pressed => {
                if !self.enabled {
                    return KeyOutcome::default();
                }
                let PhysicalKey::Code(code) = event.key else {
                    return KeyOutcome::default();
                };
                let Some(binding) = self.binding else {
                    return KeyOutcome::default();
                };
                if !binding.matches(code, self.modifiers.current()) {
                    return KeyOutcome::default();
                }
                self.consuming = true;
                KeyOutcome {
                    toggled: !event.repeat,
                    consumed: true,
                }
            }
            ElementState::Released => {
                let consumed = std::mem::take(&mut self.consuming);
                KeyOutcome {
                    toggled: false,
                    consumed,
                }
            }
        }
    }

    /// Track modifiers without matching or consuming anything.
    pub fn observe(&mut self, event: RawKeyEvent) {
        self.modifiers.process_raw(event);
    }

    /// Stop consuming the in-flight hotkey keystroke.
    pub fn reset(&mut self) {
        self.consuming = false;
    }

    /// Process a typed-character event; returns `true` if it is consumed.
    #[must_use]
    pub fn process_typed(&self) -> bool {
        self.consuming
    }
}
