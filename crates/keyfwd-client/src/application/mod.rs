//! Application layer use cases for the client.
//!
//! - **`replay_input`** – Decodes one datagram and injects the key event it
//!   carries. Bad datagrams and unmappable keys are logged and dropped so a
//!   single bad packet never stops the client.

pub mod replay_input;
