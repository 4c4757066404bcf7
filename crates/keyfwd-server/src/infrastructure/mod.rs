//! Infrastructure layer for the server application.
//!
//! Contains OS-facing adapters: the global keyboard hook, key synthesis for
//! the layout switch shortcut, the UDP transmitter, and config file storage.
//!
//! **Dependency rule**: this layer may depend on `application` and
//! `keyfwd_core`, but MUST NOT be imported by the domain layer.

pub mod input_capture;
pub mod input_injection;
pub mod keymap;
pub mod network;
pub mod storage;
