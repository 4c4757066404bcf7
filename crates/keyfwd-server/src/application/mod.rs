//! Application layer use cases for the server.
//!
//! Use cases here depend on traits ([`redirect_input::KeyTransmitter`],
//! [`keyfwd_core::KeyInjector`], the input source) rather than on concrete
//! OS bindings, so every decision can be exercised with test doubles.
//!
//! # Sub-modules
//!
//! - **`redirect_input`** – The redirect state machine. Decides, per captured
//!   event, whether to forward it, toggle redirection, or start layout
//!   recovery.
//!
//! - **`switch_layout`** – Types the OS layout switch shortcut with the
//!   recovery timings.
//!
//! - **`capture_loop`** – Drives the state machine from an input source and
//!   carries out the subscription restarts it asks for.

pub mod capture_loop;
pub mod redirect_input;
pub mod switch_layout;
