//! JSON codec for the key event wire packet.
//!
//! Decoding runs in two stages: [`decode_packet`] checks the structure
//! (well-formed JSON with all three fields), then [`Packet::to_key_event`]
//! maps the raw field values to a [`KeyEvent`]. [`decode_key_event`] composes
//! both.

use thiserror::Error;

use crate::domain::key::{Key, KeyAction, KeyEvent, VirtualKeyCode};
use crate::protocol::packet::{
    KeyValue, Packet, KEY_ACTION_TYPE_PRESS, KEY_ACTION_TYPE_RELEASE, KEY_TYPE_CHAR, KEY_TYPE_CODE,
};

/// Errors that can occur while encoding a key event.
#[derive(Debug, Error)]
#[error("failed to serialize packet: {0}")]
pub struct EncodeError(#[from] serde_json::Error);

/// Errors that can occur while decoding a datagram into a key event.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    /// Not valid JSON, or a required field is missing or has the wrong shape.
    #[error("malformed packet: {0}")]
    Malformed(String),

    /// `key_action_type` is neither press nor release.
    #[error("unknown key action type: {0}")]
    UnknownActionType(i64),

    /// `key_type` is neither special nor printable.
    #[error("unknown key type: {0}")]
    UnknownKeyType(i64),

    /// `key_value` cannot be represented as a key of the declared type.
    #[error("key value {value} cannot be represented as key type {key_type}")]
    UnrepresentableKey { key_type: i64, value: String },
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Encodes a [`KeyEvent`] as the JSON bytes of one datagram.
///
/// # Examples
///
/// ```rust
/// use keyfwd_core::{decode_key_event, encode_key_event, Key, KeyEvent};
///
/// let event = KeyEvent::press(Key::Printable('x'));
/// let bytes = encode_key_event(&event).unwrap();
/// assert_eq!(decode_key_event(&bytes).unwrap(), event);
/// ```
pub fn encode_key_event(event: &KeyEvent) -> Result<Vec<u8>, EncodeError> {
    Ok(serde_json::to_vec(&Packet::from(event))?)
}

/// Parses datagram bytes into a [`Packet`] without interpreting its values.
///
/// # Errors
///
/// [`DecodeError::Malformed`] if the bytes are not a JSON object carrying
/// `key_action_type`, `key_type` and `key_value`.
pub fn decode_packet(bytes: &[u8]) -> Result<Packet, DecodeError> {
    serde_json::from_slice(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))
}

/// Decodes datagram bytes into a [`KeyEvent`].
pub fn decode_key_event(bytes: &[u8]) -> Result<KeyEvent, DecodeError> {
    decode_packet(bytes)?.to_key_event()
}

impl Packet {
    /// Maps the raw packet fields to a [`KeyEvent`].
    ///
    /// # Errors
    ///
    /// - [`DecodeError::UnknownActionType`] / [`DecodeError::UnknownKeyType`]
    ///   for field values outside the protocol's numbering.
    /// - [`DecodeError::UnrepresentableKey`] when a special key's value is not
    ///   a non-negative 32-bit integer, or a printable key's value is not
    ///   exactly one character.
    pub fn to_key_event(&self) -> Result<KeyEvent, DecodeError> {
        let action = match self.key_action_type {
            t if t == i64::from(KEY_ACTION_TYPE_PRESS) => KeyAction::Press,
            t if t == i64::from(KEY_ACTION_TYPE_RELEASE) => KeyAction::Release,
            other => return Err(DecodeError::UnknownActionType(other)),
        };
        let key = self.key()?;
        Ok(KeyEvent { action, key })
    }

    fn key(&self) -> Result<Key, DecodeError> {
        let unrepresentable = || DecodeError::UnrepresentableKey {
            key_type: self.key_type,
            value: self.key_value_text(),
        };

        match self.key_type {
            t if t == i64::from(KEY_TYPE_CODE) => match &self.key_value {
                KeyValue::Code(code) => Ok(Key::Special(VirtualKeyCode(*code))),
                _ => Err(unrepresentable()),
            },
            t if t == i64::from(KEY_TYPE_CHAR) => match &self.key_value {
                KeyValue::Char(s) => {
                    let mut chars = s.chars();
                    match (chars.next(), chars.next()) {
                        (Some(c), None) => Ok(Key::Printable(c)),
                        _ => Err(unrepresentable()),
                    }
                }
                _ => Err(unrepresentable()),
            },
            other => Err(DecodeError::UnknownKeyType(other)),
        }
    }

    fn key_value_text(&self) -> String {
        match &self.key_value {
            KeyValue::Code(code) => code.to_string(),
            KeyValue::Char(s) => format!("{s:?}"),
            KeyValue::Other(value) => value.to_string(),
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
