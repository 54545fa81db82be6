//! Listening toggle hotkey
//!
//! Ctrl+Space (or Meta+Space on macOS keyboards) toggles listening.

use std::str::FromStr;

use crate::Error;

/// Key of a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Enter,
    Escape,
    Char(char),
}

/// A key press with its modifier state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct KeyEvent {
    pub key: Key,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
    pub shift: bool,
}

impl KeyEvent {
    /// A key press without modifiers
    #[must_use]
    pub const fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            meta: false,
            alt: false,
            shift: false,
        }
    }
}

/// Check whether a key press toggles listening
#[must_use]
pub const fn is_listen_toggle(event: &KeyEvent) -> bool {
    matches!(event.key, Key::Space) && (event.ctrl || event.meta)
}

impl FromStr for KeyEvent {
    type Err = Error;

    /// Parse chords such as `ctrl+space` or `meta+shift+a`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts: Vec<String> = s
            .split('+')
            .map(|p| p.trim().to_lowercase())
            .collect();
        let key_name = parts
            .pop()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| Error::InvalidInput(format!("no key in chord {s:?}")))?;

        let key = match key_name.as_str() {
            "space" => Key::Space,
            "enter" | "return" => Key::Enter,
            "esc" | "escape" => Key::Escape,
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Key::Char(c),
                    _ => return Err(Error::InvalidInput(format!("unknown key {other:?}"))),
                }
            }
        };

        let mut event = Self::plain(key);
        for modifier in &parts {
            match modifier.as_str() {
                "ctrl" | "control" => event.ctrl = true,
                "meta" | "cmd" | "super" => event.meta = true,
                "alt" | "option" => event.alt = true,
                "shift" => event.shift = true,
                other => {
                    return Err(Error::InvalidInput(format!("unknown modifier {other:?}")));
                }
            }
        }

        Ok(event)
    }
}
