//! `rdev::Key` ↔ [`NamedKey`] translation.
//!
//! `rdev` has no variants for F13 and above; those keys arrive as
//! `Key::Unknown(code)` carrying the platform's native code:
//!
//! - Windows: the Virtual-Key code itself (`VK_F13 = 0x7C`).
//! - macOS: the CGKeyCode (`kVK_F13 = 0x69`), not in numeric order.
//! - Linux: the X11 keycode (evdev code + 8, `F13 = 191`).

use keyfwd_core::NamedKey;
use rdev::Key as RdevKey;

/// Translates an `rdev` key to a [`NamedKey`].
///
/// Returns `None` for keys with no entry in the virtual-key table
/// (e.g. `Function`, `IntlBackslash`, unknown platform codes).
pub fn rdev_to_named(key: RdevKey) -> Option<NamedKey> {
    let named = match key {
        RdevKey::Backspace => NamedKey::Backspace,
        RdevKey::Tab => NamedKey::Tab,
        RdevKey::Return | RdevKey::KpReturn => NamedKey::Return,
        RdevKey::Pause => NamedKey::Pause,
        RdevKey::CapsLock => NamedKey::CapsLock,
        RdevKey::Escape => NamedKey::Escape,
        RdevKey::Space => NamedKey::Space,
        RdevKey::PageUp => NamedKey::PageUp,
        RdevKey::PageDown => NamedKey::PageDown,
        RdevKey::End => NamedKey::End,
        RdevKey::Home => NamedKey::Home,
        RdevKey::LeftArrow => NamedKey::LeftArrow,
        RdevKey::UpArrow => NamedKey::UpArrow,
        RdevKey::RightArrow => NamedKey::RightArrow,
        RdevKey::DownArrow => NamedKey::DownArrow,
        RdevKey::PrintScreen => NamedKey::PrintScreen,
        RdevKey::Insert => NamedKey::Insert,
        RdevKey::Delete => NamedKey::Delete,

        RdevKey::Num0 => NamedKey::Num0,
        RdevKey::Num1 => NamedKey::Num1,
        RdevKey::Num2 => NamedKey::Num2,
        RdevKey::Num3 => NamedKey::Num3,
        RdevKey::Num4 => NamedKey::Num4,
        RdevKey::Num5 => NamedKey::Num5,
        RdevKey::Num6 => NamedKey::Num6,
        RdevKey::Num7 => NamedKey::Num7,
        RdevKey::Num8 => NamedKey::Num8,
        RdevKey::Num9 => NamedKey::Num9,

        RdevKey::KeyA => NamedKey::KeyA,
        RdevKey::KeyB => NamedKey::KeyB,
        RdevKey::KeyC => NamedKey::KeyC,
        RdevKey::KeyD => NamedKey::KeyD,
        RdevKey::KeyE => NamedKey::KeyE,
        RdevKey::KeyF => NamedKey::KeyF,
        RdevKey::KeyG => NamedKey::KeyG,
        RdevKey::KeyH => NamedKey::KeyH,
        RdevKey::KeyI => NamedKey::KeyI,
        RdevKey::KeyJ => NamedKey::KeyJ,
        RdevKey::KeyK => NamedKey::KeyK,
        RdevKey::KeyL => NamedKey::KeyL,
        RdevKey::KeyM => NamedKey::KeyM,
        RdevKey::KeyN => NamedKey::KeyN,
        RdevKey::KeyO => NamedKey::KeyO,
        RdevKey::KeyP => NamedKey::KeyP,
        RdevKey::KeyQ => NamedKey::KeyQ,
        RdevKey::KeyR => NamedKey::KeyR,
        RdevKey::KeyS => NamedKey::KeyS,
        RdevKey::KeyT => NamedKey::KeyT,
        RdevKey::KeyU => NamedKey::KeyU,
        RdevKey::KeyV => NamedKey::KeyV,
        RdevKey::KeyW => NamedKey::KeyW,
        RdevKey::KeyX => NamedKey::KeyX,
        RdevKey::KeyY => NamedKey::KeyY,
        RdevKey::KeyZ => NamedKey::KeyZ,

        RdevKey::MetaLeft => NamedKey::MetaLeft,
        RdevKey::MetaRight => NamedKey::MetaRight,
        RdevKey::ShiftLeft => NamedKey::ShiftLeft,
        RdevKey::ShiftRight => NamedKey::ShiftRight,
        RdevKey::ControlLeft => NamedKey::ControlLeft,
        RdevKey::ControlRight => NamedKey::ControlRight,
        RdevKey::Alt => NamedKey::AltLeft,
        RdevKey::AltGr => NamedKey::AltRight,

        RdevKey::Kp0 => NamedKey::Kp0,
        RdevKey::Kp1 => NamedKey::Kp1,
        RdevKey::Kp2 => NamedKey::Kp2,
        RdevKey::Kp3 => NamedKey::Kp3,
        RdevKey::Kp4 => NamedKey::Kp4,
        RdevKey::Kp5 => NamedKey::Kp5,
        RdevKey::Kp6 => NamedKey::Kp6,
        RdevKey::Kp7 => NamedKey::Kp7,
        RdevKey::Kp8 => NamedKey::Kp8,
        RdevKey::Kp9 => NamedKey::Kp9,
        RdevKey::KpMultiply => NamedKey::KpMultiply,
        RdevKey::KpPlus => NamedKey::KpPlus,
        RdevKey::KpMinus => NamedKey::KpMinus,
        RdevKey::KpDelete => NamedKey::KpDecimal,
        RdevKey::KpDivide => NamedKey::KpDivide,

        RdevKey::F1 => NamedKey::F1,
        RdevKey::F2 => NamedKey::F2,
        RdevKey::F3 => NamedKey::F3,
        RdevKey::F4 => NamedKey::F4,
        RdevKey::F5 => NamedKey::F5,
        RdevKey::F6 => NamedKey::F6,
        RdevKey::F7 => NamedKey::F7,
        RdevKey::F8 => NamedKey::F8,
        RdevKey::F9 => NamedKey::F9,
        RdevKey::F10 => NamedKey::F10,
        RdevKey::F11 => NamedKey::F11,
        RdevKey::F12 => NamedKey::F12,
        RdevKey::NumLock => NamedKey::NumLock,
        RdevKey::ScrollLock => NamedKey::ScrollLock,

        RdevKey::SemiColon => NamedKey::SemiColon,
        RdevKey::Equal => NamedKey::Equal,
        RdevKey::Comma => NamedKey::Comma,
        RdevKey::Minus => NamedKey::Minus,
        RdevKey::Dot => NamedKey::Dot,
        RdevKey::Slash => NamedKey::Slash,
        RdevKey::BackQuote => NamedKey::BackQuote,
        RdevKey::LeftBracket => NamedKey::LeftBracket,
        RdevKey::BackSlash => NamedKey::BackSlash,
        RdevKey::RightBracket => NamedKey::RightBracket,
        RdevKey::Quote => NamedKey::Quote,

        RdevKey::Unknown(code) => return unknown_to_named(code),
        _ => return None,
    };
    Some(named)
}

/// Translates a [`NamedKey`] to the `rdev` key used for synthesis.
///
/// Returns `None` when `rdev` cannot express the key on this platform.
pub fn named_to_rdev(named: NamedKey) -> Option<RdevKey> {
    let key = match named {
        NamedKey::Backspace => RdevKey::Backspace,
        NamedKey::Tab => RdevKey::Tab,
        NamedKey::Return => RdevKey::Return,
        NamedKey::Pause => RdevKey::Pause,
        NamedKey::CapsLock => RdevKey::CapsLock,
        NamedKey::Escape => RdevKey::Escape,
        NamedKey::Space => RdevKey::Space,
        NamedKey::PageUp => RdevKey::PageUp,
        NamedKey::PageDown => RdevKey::PageDown,
        NamedKey::End => RdevKey::End,
        NamedKey::Home => RdevKey::Home,
        NamedKey::LeftArrow => RdevKey::LeftArrow,
        NamedKey::UpArrow => RdevKey::UpArrow,
        NamedKey::RightArrow => RdevKey::RightArrow,
        NamedKey::DownArrow => RdevKey::DownArrow,
        NamedKey::PrintScreen => RdevKey::PrintScreen,
        NamedKey::Insert => RdevKey::Insert,
        NamedKey::Delete => RdevKey::Delete,

        NamedKey::Num0 => RdevKey::Num0,
        NamedKey::Num1 => RdevKey::Num1,
        NamedKey::Num2 => RdevKey::Num2,
        NamedKey::Num3 => RdevKey::Num3,
        NamedKey::Num4 => RdevKey::Num4,
        NamedKey::Num5 => RdevKey::Num5,
        NamedKey::Num6 => RdevKey::Num6,
        NamedKey::Num7 => RdevKey::Num7,
        NamedKey::Num8 => RdevKey::Num8,
        NamedKey::Num9 => RdevKey::Num9,

        NamedKey::KeyA => RdevKey::KeyA,
        NamedKey::KeyB => RdevKey::KeyB,
        NamedKey::KeyC => RdevKey::KeyC,
        NamedKey::KeyD => RdevKey::KeyD,
        NamedKey::KeyE => RdevKey::KeyE,
        NamedKey::KeyF => RdevKey::KeyF,
        NamedKey::KeyG => RdevKey::KeyG,
        NamedKey::KeyH => RdevKey::KeyH,
        NamedKey::KeyI => RdevKey::KeyI,
        NamedKey::KeyJ => RdevKey::KeyJ,
        NamedKey::KeyK => RdevKey::KeyK,
        NamedKey::KeyL => RdevKey::KeyL,
        NamedKey::KeyM => RdevKey::KeyM,
        NamedKey::KeyN => RdevKey::KeyN,
        NamedKey::KeyO => RdevKey::KeyO,
        NamedKey::KeyP => RdevKey::KeyP,
        NamedKey::KeyQ => RdevKey::KeyQ,
        NamedKey::KeyR => RdevKey::KeyR,
        NamedKey::KeyS => RdevKey::KeyS,
        NamedKey::KeyT => RdevKey::KeyT,
        NamedKey::KeyU => RdevKey::KeyU,
        NamedKey::KeyV => RdevKey::KeyV,
        NamedKey::KeyW => RdevKey::KeyW,
        NamedKey::KeyX => RdevKey::KeyX,
        NamedKey::KeyY => RdevKey::KeyY,
        NamedKey::KeyZ => RdevKey::KeyZ,

        NamedKey::MetaLeft => RdevKey::MetaLeft,
        NamedKey::MetaRight => RdevKey::MetaRight,
        NamedKey::ShiftLeft => RdevKey::ShiftLeft,
        NamedKey::ShiftRight => RdevKey::ShiftRight,
        NamedKey::ControlLeft => RdevKey::ControlLeft,
        NamedKey::ControlRight => RdevKey::ControlRight,
        NamedKey::AltLeft => RdevKey::Alt,
        NamedKey::AltRight => RdevKey::AltGr,

        NamedKey::Kp0 => RdevKey::Kp0,
        NamedKey::Kp1 => RdevKey::Kp1,
        NamedKey::Kp2 => RdevKey::Kp2,
        NamedKey::Kp3 => RdevKey::Kp3,
        NamedKey::Kp4 => RdevKey::Kp4,
        NamedKey::Kp5 => RdevKey::Kp5,
        NamedKey::Kp6 => RdevKey::Kp6,
        NamedKey::Kp7 => RdevKey::Kp7,
        NamedKey::Kp8 => RdevKey::Kp8,
        NamedKey::Kp9 => RdevKey::Kp9,
        NamedKey::KpMultiply => RdevKey::KpMultiply,
        NamedKey::KpPlus => RdevKey::KpPlus,
        NamedKey::KpMinus => RdevKey::KpMinus,
        NamedKey::KpDecimal => RdevKey::KpDelete,
        NamedKey::KpDivide => RdevKey::KpDivide,

        NamedKey::F1 => RdevKey::F1,
        NamedKey::F2 => RdevKey::F2,
        NamedKey::F3 => RdevKey::F3,
        NamedKey::F4 => RdevKey::F4,
        NamedKey::F5 => RdevKey::F5,
        NamedKey::F6 => RdevKey::F6,
        NamedKey::F7 => RdevKey::F7,
        NamedKey::F8 => RdevKey::F8,
        NamedKey::F9 => RdevKey::F9,
        NamedKey::F10 => RdevKey::F10,
        NamedKey::F11 => RdevKey::F11,
        NamedKey::F12 => RdevKey::F12,
        NamedKey::NumLock => RdevKey::NumLock,
        NamedKey::ScrollLock => RdevKey::ScrollLock,

        NamedKey::SemiColon => RdevKey::SemiColon,
        NamedKey::Equal => RdevKey::Equal,
        NamedKey::Comma => RdevKey::Comma,
        NamedKey::Minus => RdevKey::Minus,
        NamedKey::Dot => RdevKey::Dot,
        NamedKey::Slash => RdevKey::Slash,
        NamedKey::BackQuote => RdevKey::BackQuote,
        NamedKey::LeftBracket => RdevKey::LeftBracket,
        NamedKey::BackSlash => RdevKey::BackSlash,
        NamedKey::RightBracket => RdevKey::RightBracket,
        NamedKey::Quote => RdevKey::Quote,

        other => return named_to_unknown(other).map(RdevKey::Unknown),
    };
    Some(key)
}

/// Whether `rdev::grab` reports `named` to its callback on this platform.
///
/// The Linux grab reads evdev and only knows keys that have a named `rdev`
/// variant, so anything `rdev` carries as `Unknown` (F13 to F20, Menu)
/// bypasses the hook there. The Windows and macOS hooks report every key.
pub fn grab_delivers(named: NamedKey) -> bool {
    match named_to_rdev(named) {
        Some(RdevKey::Unknown(_)) => !cfg!(target_os = "linux"),
        Some(_) => true,
        None => false,
    }
}

// ── Platform codes for keys rdev does not name ────────────────────────────────

/// (named key, native code) pairs for keys that `rdev` reports as `Unknown`.
#[cfg(target_os = "macos")]
const UNKNOWN_CODES: &[(NamedKey, u32)] = &[
    (NamedKey::F13, 0x69),
    (NamedKey::F14, 0x6B),
    (NamedKey::F15, 0x71),
    (NamedKey::F16, 0x6A),
    (NamedKey::F17, 0x40),
    (NamedKey::F18, 0x4F),
    (NamedKey::F19, 0x50),
    (NamedKey::F20, 0x5A),
    (NamedKey::Menu, 0x6E),
];

#[cfg(target_os = "linux")]
const UNKNOWN_CODES: &[(NamedKey, u32)] = &[
    (NamedKey::F13, 191),
    (NamedKey::F14, 192),
    (NamedKey::F15, 193),
    (NamedKey::F16, 194),
    (NamedKey::F17, 195),
    (NamedKey::F18, 196),
    (NamedKey::F19, 197),
    (NamedKey::F20, 198),
    (NamedKey::Menu, 135),
];

#[cfg(not(any(target_os = "macos", target_os = "linux")))]
const UNKNOWN_CODES: &[(NamedKey, u32)] = &[];

fn unknown_to_named(code: u32) -> Option<NamedKey> {
    if cfg!(target_os = "windows") {
        return NamedKey::from_vk(keyfwd_core::VirtualKeyCode(code));
    }
    UNKNOWN_CODES
        .iter()
        .find(|(_, native)| *native == code)
        .map(|(named, _)| *named)
}

fn named_to_unknown(named: NamedKey) -> Option<u32> {
    if cfg!(target_os = "windows") {
        return Some(named.vk().0);
    }
    UNKNOWN_CODES
        .iter()
        .find(|(key, _)| *key == named)
        .map(|(_, native)| *native)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::redirect_input::default_activation_key;
    use keyfwd_core::VirtualKeyCode;

    #[test]
    fn test_every_named_key_round_trips_through_rdev_when_expressible() {
        for named in NamedKey::all() {
            if let Some(rdev_key) = named_to_rdev(named) {
                assert_eq!(rdev_to_named(rdev_key), Some(named), "{named:?}");
            }
        }
    }

    #[test]
    fn test_all_letter_keys_have_rdev_mappings() {
        for (named, rdev_key) in [
            (NamedKey::KeyA, RdevKey::KeyA),
            (NamedKey::KeyM, RdevKey::KeyM),
            (NamedKey::KeyZ, RdevKey::KeyZ),
        ] {
            assert_eq!(named_to_rdev(named), Some(rdev_key));
        }
    }

    #[test]
    fn test_keypad_enter_captures_as_return() {
        assert_eq!(rdev_to_named(RdevKey::KpReturn), Some(NamedKey::Return));
    }

    #[test]
    fn test_shortcut_keys_are_expressible() {
        assert_eq!(named_to_rdev(NamedKey::MetaLeft), Some(RdevKey::MetaLeft));
        assert_eq!(named_to_rdev(NamedKey::Space), Some(RdevKey::Space));
    }

    #[test]
    fn test_function_key_has_no_named_key() {
        assert_eq!(rdev_to_named(RdevKey::Function), None);
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_f13_arrives_as_x11_keycode() {
        assert_eq!(rdev_to_named(RdevKey::Unknown(191)), Some(NamedKey::F13));
        assert_eq!(named_to_rdev(NamedKey::F13), Some(RdevKey::Unknown(191)));
    }

    #[cfg(target_os = "windows")]
    #[test]
    fn test_windows_f13_arrives_as_virtual_key() {
        assert_eq!(rdev_to_named(RdevKey::Unknown(0x7C)), Some(NamedKey::F13));
    }

    #[test]
    fn test_activation_key_reaches_the_grab_callback() {
        let named = default_activation_key()
            .vk()
            .and_then(VirtualKeyCode::named)
            .expect("activation key is in the table");

        assert!(grab_delivers(named), "{named:?}");
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_linux_grab_skips_keys_beyond_f12() {
        assert!(!grab_delivers(NamedKey::F13));
        assert!(!grab_delivers(NamedKey::F20));
        assert!(grab_delivers(NamedKey::ScrollLock));
        assert!(grab_delivers(NamedKey::Pause));
    }

    #[cfg(not(target_os = "linux"))]
    #[test]
    fn test_grab_reports_f13_outside_linux() {
        assert!(grab_delivers(NamedKey::F13));
    }

    #[test]
    fn test_unassigned_unknown_code_has_no_named_key() {
        assert_eq!(rdev_to_named(RdevKey::Unknown(0xFFFF)), None);
    }
}
