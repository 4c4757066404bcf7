//! Key event value types shared by the capture and replay sides.
//!
//! A [`KeyEvent`] identifies one physical key action. The key itself is either
//! *printable* (it produced a character) or *special* (a named/control key such
//! as an arrow, a modifier, or a function key, identified by its virtual key
//! code). The two cases are variants of [`Key`], so a special key without a
//! code cannot be constructed.

use std::fmt;

use crate::keymap::NamedKey;

/// Whether a key went down or came up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
}

/// Classification of a key: did it produce a character or not?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeySource {
    /// A named/control key carried as a virtual key code.
    Special,
    /// A key that produced a character.
    Printable,
}

/// Platform-level virtual key code (Windows Virtual-Key numbering).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VirtualKeyCode(pub u32);

impl VirtualKeyCode {
    /// Returns the named key for this code, if the code is in the table.
    pub fn named(self) -> Option<NamedKey> {
        NamedKey::from_vk(self)
    }
}

impl From<NamedKey> for VirtualKeyCode {
    fn from(key: NamedKey) -> Self {
        key.vk()
    }
}

impl fmt::Display for VirtualKeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.named() {
            Some(named) => write!(f, "{named:?} (0x{:02X})", self.0),
            None => write!(f, "vk 0x{:02X}", self.0),
        }
    }
}

/// A classified key: either the character it produced or its virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Printable(char),
    Special(VirtualKeyCode),
}

impl Key {
    /// Shorthand for a special key from the named-key table.
    pub fn named(key: NamedKey) -> Self {
        Key::Special(key.vk())
    }

    pub fn source(&self) -> KeySource {
        match self {
            Key::Printable(_) => KeySource::Printable,
            Key::Special(_) => KeySource::Special,
        }
    }

    /// The character this key produced, if it is printable.
    pub fn char(&self) -> Option<char> {
        match self {
            Key::Printable(c) => Some(*c),
            Key::Special(_) => None,
        }
    }

    /// The virtual key code, if this is a special key.
    pub fn vk(&self) -> Option<VirtualKeyCode> {
        match self {
            Key::Printable(_) => None,
            Key::Special(vk) => Some(*vk),
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Printable(c) => write!(f, "{c:?}"),
            Key::Special(vk) => write!(f, "{vk}"),
        }
    }
}

/// One key action: a [`Key`] going down or coming up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key: Key,
}

impl KeyEvent {
    pub fn press(key: Key) -> Self {
        Self {
            action: KeyAction::Press,
            key,
        }
    }

    pub fn release(key: Key) -> Self {
        Self {
            action: KeyAction::Release,
            key,
        }
    }

    pub fn source(&self) -> KeySource {
        self.key.source()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_key_exposes_char_but_no_vk() {
        let key = Key::Printable('q');

        assert_eq!(key.source(), KeySource::Printable);
        assert_eq!(key.char(), Some('q'));
        assert_eq!(key.vk(), None);
    }

    #[test]
    fn test_special_key_exposes_vk_but_no_char() {
        let key = Key::Special(VirtualKeyCode(0x24));

        assert_eq!(key.source(), KeySource::Special);
        assert_eq!(key.char(), None);
        assert_eq!(key.vk(), Some(VirtualKeyCode(0x24)));
    }

    #[test]
    fn test_key_named_uses_table_code() {
        assert_eq!(Key::named(NamedKey::F13), Key::Special(VirtualKeyCode(0x7C)));
    }

    #[test]
    fn test_key_event_constructors_set_action() {
        let key = Key::Printable('x');

        assert_eq!(KeyEvent::press(key).action, KeyAction::Press);
        assert_eq!(KeyEvent::release(key).action, KeyAction::Release);
        assert_eq!(KeyEvent::release(key).source(), KeySource::Printable);
    }

    #[test]
    fn test_display_names_known_virtual_key() {
        let shown = VirtualKeyCode(0x7C).to_string();
        assert!(shown.contains("F13"), "got {shown}");
    }

    #[test]
    fn test_display_unknown_virtual_key_as_hex() {
        assert_eq!(VirtualKeyCode(0xE8).to_string(), "vk 0xE8");
    }
}
