//! Key injection implementations for the client.
//!
//! - [`enigo_backend::EnigoKeyInjector`] synthesizes keys through the `enigo` crate on
//!   Windows, macOS and Linux (X11).
//! - [`mock::MockKeyInjector`] records calls for tests.

pub mod enigo_backend;
pub mod mock;
