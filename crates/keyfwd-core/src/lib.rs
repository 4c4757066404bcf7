//! # keyfwd-core
//!
//! Shared library for keyfwd containing the key event model, the layout
//! detector, the virtual-key table, and the wire codec.
//!
//! This crate is used by both the server (capture/redirect) and the client
//! (replay) applications. It has no dependencies on OS input APIs or sockets.
//!
//! # Architecture overview
//!
//! keyfwd captures keyboard events on one machine (the *server*) and replays
//! them on another (the *client*). Pressing and releasing the activation key
//! on the server toggles redirection; while redirecting, local keystrokes are
//! suppressed and sent to the client as one UDP datagram per event.
//!
//! - **`domain`** – The [`KeyEvent`] value type, the [`KeyInjector`]
//!   capability trait, and the [`LayoutDetector`] used to spot keystrokes typed
//!   in the wrong keyboard layout.
//!
//! - **`keymap`** – The [`NamedKey`] table mapping named keys to the Windows
//!   Virtual-Key numbering used for special keys on the wire.
//!
//! - **`protocol`** – The JSON wire packet and its encode/decode functions.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::inject::{InjectionError, KeyInjector};
pub use domain::key::{Key, KeyAction, KeyEvent, KeySource, VirtualKeyCode};
pub use domain::layout::{layout_switch_shortcut, LayoutDetector};
pub use keymap::NamedKey;
pub use protocol::codec::{
    decode_key_event, decode_packet, encode_key_event, DecodeError, EncodeError,
};
pub use protocol::packet::Packet;
