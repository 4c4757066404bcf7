//! Wrong-keyboard-layout detection.
//!
//! While redirecting, the server's own OS layout decides which character a
//! physical key produces. If the server is switched to a layout the client is
//! not expecting, the keystrokes arrive on the client as characters from the
//! wrong alphabet. The [`LayoutDetector`] recognises that situation from a
//! single keystroke, and [`layout_switch_shortcut`] names the chord that cycles
//! the server's layout back.
//!
//! Only one alphabet is detected: lowercase Russian (ЙЦУКЕН). With more than
//! two installed layouts the switch shortcut may land on the wrong one.

use std::collections::HashSet;

use crate::domain::key::Key;
use crate::keymap::NamedKey;

/// Letters of the Russian ЙЦУКЕН layout, row by row.
pub const RUSSIAN_CHARS: &str = "йцукенгшщзхъфывапролджэячсмитьбю";

/// Decides whether a keystroke was typed in the expected keyboard layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutDetector {
    invalid_chars: HashSet<char>,
}

impl LayoutDetector {
    /// Creates a detector that flags every character in `invalid_chars`.
    pub fn new(invalid_chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            invalid_chars: invalid_chars.into_iter().collect(),
        }
    }

    /// Returns `false` only for a printable key whose character is in the
    /// invalid set. Special keys are always valid.
    pub fn is_valid(&self, key: &Key) -> bool {
        match key {
            Key::Printable(c) => self.is_valid_char(*c),
            Key::Special(_) => true,
        }
    }

    pub fn is_valid_char(&self, c: char) -> bool {
        !self.invalid_chars.contains(&c)
    }
}

impl Default for LayoutDetector {
    fn default() -> Self {
        Self::new(RUSSIAN_CHARS.chars())
    }
}

/// The chord that cycles the OS keyboard layout on the current platform.
///
/// Empty when the platform has no known shortcut.
pub fn layout_switch_shortcut() -> Vec<Key> {
    shortcut_for(std::env::consts::OS)
}

/// The layout switch chord for the platform named `os`
/// (as in [`std::env::consts::OS`]).
pub fn shortcut_for(os: &str) -> Vec<Key> {
    match os {
        // Cmd+Space is the default, but users can rebind it.
        "macos" => vec![Key::named(NamedKey::MetaLeft), Key::named(NamedKey::Space)],
        _ => Vec::new(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
