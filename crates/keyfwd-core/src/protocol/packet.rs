//! The wire packet: one key event per UDP datagram.
//!
//! Wire format (one JSON object, no framing):
//! ```text
//! {"key_action_type": 0|1, "key_type": 0|1, "key_value": "<char>" | <vk code>}
//! ```
//!
//! Note the numbering: `key_action_type = 0` is a *press*, but `key_type = 0`
//! is a *special* key (carried as a code), not a printable one. Both sides
//! must keep these exact values to stay wire-compatible.

use serde::{Deserialize, Serialize};

use crate::domain::key::{Key, KeyAction, KeyEvent, VirtualKeyCode};

// ── Field values ──────────────────────────────────────────────────────────────

pub const KEY_ACTION_TYPE_PRESS: u8 = 0;
pub const KEY_ACTION_TYPE_RELEASE: u8 = 1;

/// Special key; `key_value` is an integer virtual key code.
pub const KEY_TYPE_CODE: u8 = 0;
/// Printable key; `key_value` is a one-character string.
pub const KEY_TYPE_CHAR: u8 = 1;

/// The `key_value` field: a character string or an integer code.
///
/// Decoding is lenient so that a structurally valid packet with a nonsensical
/// value (null, negative, a float) still parses; the semantic check happens in
/// [`crate::protocol::codec::DecodeError::UnrepresentableKey`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum KeyValue {
    Code(u32),
    Char(String),
    Other(serde_json::Value),
}

/// The serialized form of exactly one [`KeyEvent`].
///
/// `key_action_type` and `key_type` are kept as raw integers so that unknown
/// values surface as decode errors instead of parse failures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Packet {
    pub key_action_type: i64,
    pub key_type: i64,
    pub key_value: KeyValue,
}

impl From<&KeyEvent> for Packet {
    fn from(event: &KeyEvent) -> Self {
        let key_action_type = match event.action {
            KeyAction::Press => KEY_ACTION_TYPE_PRESS,
            KeyAction::Release => KEY_ACTION_TYPE_RELEASE,
        };
        let (key_type, key_value) = match event.key {
            Key::Printable(c) => (KEY_TYPE_CHAR, KeyValue::Char(c.to_string())),
            Key::Special(VirtualKeyCode(code)) => (KEY_TYPE_CODE, KeyValue::Code(code)),
        };
        Self {
            key_action_type: i64::from(key_action_type),
            key_type: i64::from(key_type),
            key_value,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_maps_to_action_type_zero() {
        let packet = Packet::from(&KeyEvent::press(Key::Printable('x')));
        assert_eq!(packet.key_action_type, 0);
    }

    #[test]
    fn test_release_maps_to_action_type_one() {
        let packet = Packet::from(&KeyEvent::release(Key::Printable('x')));
        assert_eq!(packet.key_action_type, 1);
    }

    #[test]
    fn test_special_key_maps_to_key_type_zero_with_code() {
        let packet = Packet::from(&KeyEvent::press(Key::Special(VirtualKeyCode(36))));

        assert_eq!(packet.key_type, 0);
        assert_eq!(packet.key_value, KeyValue::Code(36));
    }

    #[test]
    fn test_printable_key_maps_to_key_type_one_with_string() {
        let packet = Packet::from(&KeyEvent::press(Key::Printable('я')));

        assert_eq!(packet.key_type, 1);
        assert_eq!(packet.key_value, KeyValue::Char("я".to_string()));
    }

    #[test]
    fn test_key_value_parses_null_as_other() {
        let value: KeyValue = serde_json::from_str("null").unwrap();
        assert_eq!(value, KeyValue::Other(serde_json::Value::Null));
    }

    #[test]
    fn test_key_value_parses_negative_number_as_other() {
        let value: KeyValue = serde_json::from_str("-5").unwrap();
        assert!(matches!(value, KeyValue::Other(_)));
    }
}
