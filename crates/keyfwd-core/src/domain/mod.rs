//! Domain layer: pure key event types and layout rules.
//!
//! Nothing in here touches the OS. The capture and injection adapters in the
//! server and client crates translate native key handles into these types.

pub mod inject;
pub mod key;
pub mod layout;
