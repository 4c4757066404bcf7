//! Named keys and their virtual key codes.
//!
//! Special (non-printable) keys travel on the wire as Windows Virtual-Key
//! codes. Capture and injection backends do not speak VK natively, so each
//! translates its own key handles to and from [`NamedKey`], and this table
//! supplies the VK number.
//!
//! Reference: <https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes>

use crate::domain::key::VirtualKeyCode;

/// A key with a well-known virtual key code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamedKey {
    // Editing and navigation
    Backspace,
    Tab,
    Return,
    Pause,
    CapsLock,
    Escape,
    Space,
    PageUp,
    PageDown,
    End,
    Home,
    LeftArrow,
    UpArrow,
    RightArrow,
    DownArrow,
    PrintScreen,
    Insert,
    Delete,
    // Digits row
    Num0,
    Num1,
    Num2,
    Num3,
    Num4,
    Num5,
    Num6,
    Num7,
    Num8,
    Num9,
    // Letters
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    // Modifiers
    MetaLeft,
    MetaRight,
    Menu,
    ShiftLeft,
    ShiftRight,
    ControlLeft,
    ControlRight,
    AltLeft,
    AltRight,
    // Keypad
    Kp0,
    Kp1,
    Kp2,
    Kp3,
    Kp4,
    Kp5,
    Kp6,
    Kp7,
    Kp8,
    Kp9,
    KpMultiply,
    KpPlus,
    KpMinus,
    KpDecimal,
    KpDivide,
    // Function keys
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    F13,
    F14,
    F15,
    F16,
    F17,
    F18,
    F19,
    F20,
    NumLock,
    ScrollLock,
    // OEM punctuation (US layout positions)
    SemiColon,
    Equal,
    Comma,
    Minus,
    Dot,
    Slash,
    BackQuote,
    LeftBracket,
    BackSlash,
    RightBracket,
    Quote,
}

impl NamedKey {
    /// The virtual key code for this key.
    pub fn vk(self) -> VirtualKeyCode {
        // Every variant has a row in NAMED_KEY_TABLE.
        let code = NAMED_KEY_TABLE
            .iter()
            .find(|(named, _)| *named == self)
            .map(|(_, vk)| *vk)
            .unwrap_or(0);
        VirtualKeyCode(u32::from(code))
    }

    /// Looks up the named key for a virtual key code.
    ///
    /// Returns `None` for codes with no entry in the table.
    pub fn from_vk(vk: VirtualKeyCode) -> Option<Self> {
        let code = u8::try_from(vk.0).ok()?;
        NAMED_KEY_TABLE
            .iter()
            .find(|(_, table_vk)| *table_vk == code)
            .map(|(named, _)| *named)
    }

    /// Every named key, in table order.
    pub fn all() -> impl Iterator<Item = NamedKey> {
        NAMED_KEY_TABLE.iter().map(|(named, _)| *named)
    }
}

/// NamedKey → VK code. Linear scans are fine: lookups happen once per
/// keystroke and the table has about a hundred rows.
const NAMED_KEY_TABLE: &[(NamedKey, u8)] = {
    use NamedKey::*;
    &[
        (Backspace, 0x08),
        (Tab, 0x09),
        (Return, 0x0D),
        (Pause, 0x13),
        (CapsLock, 0x14),
        (Escape, 0x1B),
        (Space, 0x20),
        (PageUp, 0x21),
        (PageDown, 0x22),
        (End, 0x23),
        (Home, 0x24),
        (LeftArrow, 0x25),
        (UpArrow, 0x26),
        (RightArrow, 0x27),
        (DownArrow, 0x28),
        (PrintScreen, 0x2C),
        (Insert, 0x2D),
        (Delete, 0x2E),
        // ── Digits (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
        (Num0, 0x30),
        (Num1, 0x31),
        (Num2, 0x32),
        (Num3, 0x33),
        (Num4, 0x34),
        (Num5, 0x35),
        (Num6, 0x36),
        (Num7, 0x37),
        (Num8, 0x38),
        (Num9, 0x39),
        // ── Letters (VK_A=0x41 … VK_Z=0x5A) ──────────────────────────────────
        (KeyA, 0x41),
        (KeyB, 0x42),
        (KeyC, 0x43),
        (KeyD, 0x44),
        (KeyE, 0x45),
        (KeyF, 0x46),
        (KeyG, 0x47),
        (KeyH, 0x48),
        (KeyI, 0x49),
        (KeyJ, 0x4A),
        (KeyK, 0x4B),
        (KeyL, 0x4C),
        (KeyM, 0x4D),
        (KeyN, 0x4E),
        (KeyO, 0x4F),
        (KeyP, 0x50),
        (KeyQ, 0x51),
        (KeyR, 0x52),
        (KeyS, 0x53),
        (KeyT, 0x54),
        (KeyU, 0x55),
        (KeyV, 0x56),
        (KeyW, 0x57),
        (KeyX, 0x58),
        (KeyY, 0x59),
        (KeyZ, 0x5A),
        // ── Windows / menu keys ──────────────────────────────────────────────
        (MetaLeft, 0x5B),
        (MetaRight, 0x5C),
        (Menu, 0x5D),
        // ── Keypad ───────────────────────────────────────────────────────────
        (Kp0, 0x60),
        (Kp1, 0x61),
        (Kp2, 0x62),
        (Kp3, 0x63),
        (Kp4, 0x64),
        (Kp5, 0x65),
        (Kp6, 0x66),
        (Kp7, 0x67),
        (Kp8, 0x68),
        (Kp9, 0x69),
        (KpMultiply, 0x6A),
        (KpPlus, 0x6B),
        (KpMinus, 0x6D),
        (KpDecimal, 0x6E),
        (KpDivide, 0x6F),
        // ── Function keys (VK_F1=0x70 … VK_F20=0x83) ─────────────────────────
        (F1, 0x70),
        (F2, 0x71),
        (F3, 0x72),
        (F4, 0x73),
        (F5, 0x74),
        (F6, 0x75),
        (F7, 0x76),
        (F8, 0x77),
        (F9, 0x78),
        (F10, 0x79),
        (F11, 0x7A),
        (F12, 0x7B),
        (F13, 0x7C),
        (F14, 0x7D),
        (F15, 0x7E),
        (F16, 0x7F),
        (F17, 0x80),
        (F18, 0x81),
        (F19, 0x82),
        (F20, 0x83),
        (NumLock, 0x90),
        (ScrollLock, 0x91),
        // ── Left/right modifiers ─────────────────────────────────────────────
        (ShiftLeft, 0xA0),
        (ShiftRight, 0xA1),
        (ControlLeft, 0xA2),
        (ControlRight, 0xA3),
        (AltLeft, 0xA4),
        (AltRight, 0xA5),
        // ── OEM punctuation ──────────────────────────────────────────────────
        (SemiColon, 0xBA),
        (Equal, 0xBB),
        (Comma, 0xBC),
        (Minus, 0xBD),
        (Dot, 0xBE),
        (Slash, 0xBF),
        (BackQuote, 0xC0),
        (LeftBracket, 0xDB),
        (BackSlash, 0xDC),
        (RightBracket, 0xDD),
        (Quote, 0xDE),
    ]
};

// ── Tests ─────────────────────────────────────────────────────────────────────
