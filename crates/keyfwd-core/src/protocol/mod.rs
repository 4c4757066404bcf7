//! Protocol module containing the wire packet and its JSON codec.

pub mod codec;
pub mod packet;

pub use codec::{decode_key_event, decode_packet, encode_key_event, DecodeError, EncodeError};
pub use packet::{KeyValue, Packet};
