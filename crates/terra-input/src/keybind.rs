//! Keybinding text form (`"Ctrl+Shift+KeyT"`) and matching.
//!
//! Key names follow the `Debug` output of winit's [`KeyCode`] so the stored
//! text stays stable across layouts.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use winit::keyboard::KeyCode;

use crate::modifiers::Modifiers;

/// Errors produced when parsing keybinding text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum KeybindError {
    /// The text was blank.
    #[error("keybinding is empty")]
    Empty,
    /// The final token is not a known key name.
    #[error("unknown key: {0}")]
    UnknownKey(String),
    /// A leading token is not a known modifier name.
    #[error("unknown modifier: {0}")]
    UnknownModifier(String),
}

/// A physical key plus the exact set of modifiers that must be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Keybind {
    /// The non-modifier key (or a modifier key bound on its own).
    pub key: KeyCode,
    /// Modifiers that must be held, excluding any contributed by `key` itself.
    pub modifiers: Modifiers,
}

impl Keybind {
    /// Creates a keybind.
    #[must_use]
    pub fn new(key: KeyCode, modifiers: Modifiers) -> Self {
        Self {
            key,
            modifiers: modifiers.without(Modifiers::for_key(key)),
        }
    }

    /// Parse the configured text form. Blank text means "unset" and yields
    /// `Ok(None)`.
    pub fn parse_optional(text: &str) -> Result<Option<Self>, KeybindError> {
        match text.parse() {
            Ok(bind) => Ok(Some(bind)),
            Err(KeybindError::Empty) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Returns `true` if pressing `key` with `held` modifiers triggers this
    /// binding. Modifiers must match exactly; the modifier contributed by the
    /// pressed key itself is ignored.
    #[must_use]
    pub fn matches(&self, key: KeyCode, held: Modifiers) -> bool {
        key == self.key && held.without(Modifiers::for_key(key)) == self.modifiers
    }
}

impl FromStr for Keybind {
    type Err = KeybindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(KeybindError::Empty);
        }

        let mut tokens: Vec<&str> = trimmed.split('+').map(str::trim).collect();
        let key_name = tokens.pop().unwrap_or_default();
        let key = keycode_from_name(key_name)
            .ok_or_else(|| KeybindError::UnknownKey(key_name.to_string()))?;

        let mut modifiers = Modifiers::NONE;
        for token in tokens {
            modifiers |= modifier_from_name(token)
                .ok_or_else(|| KeybindError::UnknownModifier(token.to_string()))?;
        }

        Ok(Self::new(key, modifiers))
    }
}

impl fmt::Display for Keybind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (flag, name) in [
            (Modifiers::CTRL, "Ctrl"),
            (Modifiers::ALT, "Alt"),
            (Modifiers::SHIFT, "Shift"),
            (Modifiers::SUPER, "Super"),
        ] {
            if self.modifiers.contains(flag) {
                write!(f, "{name}+")?;
            }
        }
        write!(f, "{:?}", self.key)
    }
}

impl TryFrom<String> for Keybind {
    type Error = KeybindError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Keybind> for String {
    fn from(bind: Keybind) -> Self {
        bind.to_string()
    }
}

fn modifier_from_name(name: &str) -> Option<Modifiers> {
    Some(match name.to_ascii_lowercase().as_str() {
        "ctrl" | "control" => Modifiers::CTRL,
        "shift" => Modifiers::SHIFT,
        "alt" => Modifiers::ALT,
        "super" | "meta" | "cmd" => Modifiers::SUPER,
        _ => return None,
    })
}

fn keycode_from_name(s: &str) -> Option<KeyCode> {
    Some(match s {
        "KeyA" => KeyCode::KeyA,
        "KeyB" => KeyCode::KeyB,
        "KeyC" => KeyCode::KeyC,
        "KeyD" => KeyCode::KeyD,
        "KeyE" => KeyCode::KeyE,
        "KeyF" => KeyCode::KeyF,
        "KeyG" => KeyCode::KeyG,
        "KeyH" => KeyCode::KeyH,
        "KeyI" => KeyCode::KeyI,
        "KeyJ" => KeyCode::KeyJ,
        "KeyK" => KeyCode::KeyK,
        "KeyL" => KeyCode::KeyL,
        "KeyM" => KeyCode::KeyM,
        "KeyN" => KeyCode::KeyN,
        "KeyO" => KeyCode::KeyO,
        "KeyP" => KeyCode::KeyP,
        "KeyQ" => KeyCode::KeyQ,
        "KeyR" => KeyCode::KeyR,
        "KeyS" => KeyCode::KeyS,
        "KeyT" => KeyCode::KeyT,
        "KeyU" => KeyCode::KeyU,
        "KeyV" => KeyCode::KeyV,
        "KeyW" => KeyCode::KeyW,
        "KeyX" => KeyCode::KeyX,
        "KeyY" => KeyCode::KeyY,
        "KeyZ" => KeyCode::KeyZ,
        "Digit0" => KeyCode::Digit0,
        "Digit1" => KeyCode::Digit1,
        "Digit2" => KeyCode::Digit2,
        "Digit3" => KeyCode::Digit3,
        "Digit4" => KeyCode::Digit4,
        "Digit5" => KeyCode::Digit5,
        "Digit6" => KeyCode::Digit6,
        "Digit7" => KeyCode::Digit7,
        "Digit8" => KeyCode::Digit8,
        "Digit9" => KeyCode::Digit9,
        "F1" => KeyCode::F1,
        "F2" => KeyCode::F2,
        "F3" => KeyCode::F3,
        "F4" => KeyCode::F4,
        "F5" => KeyCode::F5,
        "F6" => KeyCode::F6,
        "F7" => KeyCode::F7,
        "F8" => KeyCode::F8,
        "F9" => KeyCode::F9,
        "F10" => KeyCode::F10,
        "F11" => KeyCode::F11,
        "F12" => KeyCode::F12,
        "Space" => KeyCode::Space,
        "Enter" => KeyCode::Enter,
        "Escape" => KeyCode::Escape,
        "Tab" => KeyCode::Tab,
        "Backquote" => KeyCode::Backquote,
        "Insert" => KeyCode::Insert,
        "Delete" => KeyCode::Delete,
        "Home" => KeyCode::Home,
        "End" => KeyCode::End,
        "PageUp" => KeyCode::PageUp,
        "PageDown" => KeyCode::PageDown,
        "ShiftLeft" => KeyCode::ShiftLeft,
        "ShiftRight" => KeyCode::ShiftRight,
        "ControlLeft" => KeyCode::ControlLeft,
        "ControlRight" => KeyCode::ControlRight,
        "AltLeft" => KeyCode::AltLeft,
        "AltRight" => KeyCode::AltRight,
        "ArrowUp" => KeyCode::ArrowUp,
        "ArrowDown" => KeyCode::ArrowDown,
        "ArrowLeft" => KeyCode::ArrowLeft,
        "ArrowRight" => KeyCode::ArrowRight,
        _ => return None,
    })
}
