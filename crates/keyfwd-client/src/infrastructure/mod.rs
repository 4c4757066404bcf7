//! Infrastructure layer for the client application.
//!
//! Contains OS-facing adapters: key injection, the UDP receive loop, and
//! config file storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keyfwd_core`, but MUST NOT be imported by the domain layer.

pub mod input_emulation;
pub mod network;
pub mod storage;
