//! Key injection backed by the `enigo` crate.
//!
//! Printable keys are typed as Unicode characters, so they come out right
//! regardless of the client's active layout. Special keys are resolved
//! through the virtual-key table:
//!
//! - navigation, editing, modifier and function keys map to named `enigo` keys;
//! - letter, digit, keypad and OEM punctuation codes map to the character
//!   they produce on a US layout;
//! - on Windows anything else is passed through as a raw virtual key code.
//!
//! Elsewhere, codes with no mapping are reported as unmappable.

use enigo::{Direction, Enigo, Key as EnigoKey, Keyboard, Settings};
use keyfwd_core::{InjectionError, Key, KeyInjector, NamedKey, VirtualKeyCode};

/// [`KeyInjector`] backed by an `enigo` connection.
pub struct EnigoKeyInjector {
    enigo: Enigo,
}

impl EnigoKeyInjector {
    /// Opens the platform input connection.
    ///
    /// # Errors
    ///
    /// Returns [`InjectionError::Platform`] if the connection cannot be
    /// established (no display, missing permission).
    pub fn new() -> Result<Self, InjectionError> {
        let enigo = Enigo::new(&Settings::default()).map_err(|e| {
            InjectionError::Platform(format!("failed to create keyboard simulator: {e}"))
        })?;
        Ok(Self { enigo })
    }

    fn send(&mut self, key: &Key, direction: Direction) -> Result<(), InjectionError> {
        let enigo_key = to_enigo_key(key).ok_or(InjectionError::UnmappableKey(*key))?;
        self.enigo
            .key(enigo_key, direction)
            .map_err(|e| InjectionError::Platform(format!("failed to inject {key}: {e}")))
    }
}

impl KeyInjector for EnigoKeyInjector {
    fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError> {
        self.send(key, Direction::Press)
    }

    fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError> {
        self.send(key, Direction::Release)
    }
}

/// Resolves a [`Key`] to the `enigo` key that reproduces it.
pub fn to_enigo_key(key: &Key) -> Option<EnigoKey> {
    match key {
        Key::Printable(c) => Some(EnigoKey::Unicode(*c)),
        Key::Special(vk) => special_to_enigo(*vk),
    }
}

fn special_to_enigo(vk: VirtualKeyCode) -> Option<EnigoKey> {
    let mapped = vk.named().and_then(|named| {
        named_to_enigo(named).or_else(|| us_layout_char(named).map(EnigoKey::Unicode))
    });
    if mapped.is_some() {
        return mapped;
    }

    if cfg!(target_os = "windows") {
        // enigo takes raw virtual key codes on Windows.
        Some(EnigoKey::Other(vk.0))
    } else {
        None
    }
}

fn named_to_enigo(named: NamedKey) -> Option<EnigoKey> {
    let key = match named {
        NamedKey::Backspace => EnigoKey::Backspace,
        NamedKey::Tab => EnigoKey::Tab,
        NamedKey::Return => EnigoKey::Return,
        NamedKey::CapsLock => EnigoKey::CapsLock,
        NamedKey::Escape => EnigoKey::Escape,
        NamedKey::Space => EnigoKey::Space,
        NamedKey::PageUp => EnigoKey::PageUp,
        NamedKey::PageDown => EnigoKey::PageDown,
        NamedKey::End => EnigoKey::End,
        NamedKey::Home => EnigoKey::Home,
        NamedKey::LeftArrow => EnigoKey::LeftArrow,
        NamedKey::UpArrow => EnigoKey::UpArrow,
        NamedKey::RightArrow => EnigoKey::RightArrow,
        NamedKey::DownArrow => EnigoKey::DownArrow,
        NamedKey::Delete => EnigoKey::Delete,

        NamedKey::ShiftLeft | NamedKey::ShiftRight => EnigoKey::Shift,
        NamedKey::ControlLeft | NamedKey::ControlRight => EnigoKey::Control,
        NamedKey::AltLeft | NamedKey::AltRight => EnigoKey::Alt,
        NamedKey::MetaLeft | NamedKey::MetaRight => EnigoKey::Meta,

        NamedKey::F1 => EnigoKey::F1,
        NamedKey::F2 => EnigoKey::F2,
        NamedKey::F3 => EnigoKey::F3,
        NamedKey::F4 => EnigoKey::F4,
        NamedKey::F5 => EnigoKey::F5,
        NamedKey::F6 => EnigoKey::F6,
        NamedKey::F7 => EnigoKey::F7,
        NamedKey::F8 => EnigoKey::F8,
        NamedKey::F9 => EnigoKey::F9,
        NamedKey::F10 => EnigoKey::F10,
        NamedKey::F11 => EnigoKey::F11,
        NamedKey::F12 => EnigoKey::F12,
        NamedKey::F13 => EnigoKey::F13,
        NamedKey::F14 => EnigoKey::F14,
        NamedKey::F15 => EnigoKey::F15,
        NamedKey::F16 => EnigoKey::F16,
        NamedKey::F17 => EnigoKey::F17,
        NamedKey::F18 => EnigoKey::F18,
        NamedKey::F19 => EnigoKey::F19,
        NamedKey::F20 => EnigoKey::F20,

        _ => return None,
    };
    Some(key)
}

/// The character a character-producing key types on a US layout.
fn us_layout_char(named: NamedKey) -> Option<char> {
    let vk = named.vk().0;
    let c = match named {
        NamedKey::Num0
        | NamedKey::Num1
        | NamedKey::Num2
        | NamedKey::Num3
        | NamedKey::Num4
        | NamedKey::Num5
        | NamedKey::Num6
        | NamedKey::Num7
        | NamedKey::Num8
        | NamedKey::Num9 => char::from_u32(vk)?,
        // VK_A..VK_Z equal the uppercase ASCII letters.
        _ if (0x41..=0x5A).contains(&vk) => char::from_u32(vk)?.to_ascii_lowercase(),
        // VK_NUMPAD0..VK_NUMPAD9 are 0x60..0x69.
        _ if (0x60..=0x69).contains(&vk) => char::from_digit(vk - 0x60, 10)?,
        NamedKey::KpMultiply => '*',
        NamedKey::KpPlus => '+',
        NamedKey::KpMinus => '-',
        NamedKey::KpDecimal => '.',
        NamedKey::KpDivide => '/',
        NamedKey::SemiColon => ';',
        NamedKey::Equal => '=',
        NamedKey::Comma => ',',
        NamedKey::Minus => '-',
        NamedKey::Dot => '.',
        NamedKey::Slash => '/',
        NamedKey::BackQuote => '`',
        NamedKey::LeftBracket => '[',
        NamedKey::BackSlash => '\\',
        NamedKey::RightBracket => ']',
        NamedKey::Quote => '\'',
        _ => return None,
    };
    Some(c)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_printable_keys_are_typed_as_unicode() {
        assert_eq!(to_enigo_key(&Key::Printable('ж')), Some(EnigoKey::Unicode('ж')));
        assert_eq!(to_enigo_key(&Key::Printable('X')), Some(EnigoKey::Unicode('X')));
    }

    #[test]
    fn test_navigation_keys_map_to_named_enigo_keys() {
        assert_eq!(to_enigo_key(&Key::named(NamedKey::Home)), Some(EnigoKey::Home));
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::Return)),
            Some(EnigoKey::Return)
        );
        assert_eq!(to_enigo_key(&Key::named(NamedKey::F13)), Some(EnigoKey::F13));
    }

    #[test]
    fn test_both_shift_keys_map_to_shift() {
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::ShiftLeft)),
            Some(EnigoKey::Shift)
        );
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::ShiftRight)),
            Some(EnigoKey::Shift)
        );
    }

    #[test]
    fn test_letter_and_digit_codes_map_to_us_characters() {
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::KeyQ)),
            Some(EnigoKey::Unicode('q'))
        );
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::Num7)),
            Some(EnigoKey::Unicode('7'))
        );
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::Kp3)),
            Some(EnigoKey::Unicode('3'))
        );
        assert_eq!(
            to_enigo_key(&Key::named(NamedKey::Quote)),
            Some(EnigoKey::Unicode('\''))
        );
    }

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn test_unnamed_code_is_unmappable_off_windows() {
        assert_eq!(to_enigo_key(&Key::Special(VirtualKeyCode(0xE8))), None);
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_unnamed_code_passes_through_on_windows() {
        assert_eq!(
            to_enigo_key(&Key::Special(VirtualKeyCode(0xE8))),
            Some(EnigoKey::Other(0xE8))
        );
    }
}
