//! Key injection capability.
//!
//! Both sides of keyfwd synthesize keystrokes: the client replays forwarded
//! events, and the server types the layout switch shortcut during layout
//! recovery. Each platform binding implements [`KeyInjector`]; the application
//! layers depend only on this trait.

use thiserror::Error;

use crate::domain::key::{Key, KeyAction};

/// Error type for key injection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InjectionError {
    /// The backend has no injectable handle for this key.
    #[error("no injectable key for {0}")]
    UnmappableKey(Key),
    /// The OS rejected or failed the synthesized event.
    #[error("platform error: {0}")]
    Platform(String),
}

/// Synthesizes key presses and releases on the local machine.
///
/// Methods take `&mut self` because native injection handles (display
/// connections, event sources) are stateful and usually not `Sync`.
pub trait KeyInjector {
    /// Synthesizes a key-down for `key`.
    fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError>;

    /// Synthesizes a key-up for `key`.
    fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError>;

    /// Dispatches to [`inject_press`](Self::inject_press) or
    /// [`inject_release`](Self::inject_release) according to `action`.
    fn inject(&mut self, action: KeyAction, key: &Key) -> Result<(), InjectionError> {
        match action {
            KeyAction::Press => self.inject_press(key),
            KeyAction::Release => self.inject_release(key),
        }
    }
}

impl<T: KeyInjector + ?Sized> KeyInjector for Box<T> {
    fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError> {
        (**self).inject_press(key)
    }

    fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError> {
        (**self).inject_release(key)
    }
}
