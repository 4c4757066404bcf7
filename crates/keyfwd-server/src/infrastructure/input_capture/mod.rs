//! Input capture infrastructure for the server application.
//!
//! The production source installs a global keyboard hook on a dedicated
//! thread. Each key event is classified into a [`Key`] inside the hook
//! callback and handed to the capture loop through an `mpsc` channel; the
//! callback itself never blocks on the network or on recovery sleeps.
//!
//! # Subscriptions
//!
//! A subscription is opened with [`InputSource::start`] in one of two modes:
//!
//! - `suppress = false`: events are observed and still delivered to local
//!   applications (pass-through).
//! - `suppress = true`: events are observed and swallowed locally.
//!
//! [`InputSource::stop`] closes the subscription. Keys pressed while no
//! subscription is open reach local applications and are not captured.
//!
//! # Testability
//!
//! The [`InputSource`] trait allows tests to feed synthetic events through
//! [`mock::MockInputSource`] without touching OS hooks.

use std::sync::mpsc;

use keyfwd_core::{Key, KeyAction};

pub mod mock;
pub mod rdev_hook;

/// A classified key event produced by an input source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RawKeyEvent {
    /// A key went down.
    Press(Key),
    /// A key came up.
    Release(Key),
}

impl RawKeyEvent {
    pub fn key(&self) -> Key {
        match self {
            RawKeyEvent::Press(key) | RawKeyEvent::Release(key) => *key,
        }
    }

    pub fn action(&self) -> KeyAction {
        match self {
            RawKeyEvent::Press(_) => KeyAction::Press,
            RawKeyEvent::Release(_) => KeyAction::Release,
        }
    }
}

/// Error type for input capture operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to install keyboard hook: {0}")]
    HookInstallFailed(String),
    #[error("keyboard hook stopped: {0}")]
    HookFailed(String),
    #[error("input source state lock poisoned")]
    LockPoisoned,
}

/// Trait abstracting the keyboard subscription.
///
/// The production implementation is [`rdev_hook::RdevInputSource`]; tests use
/// [`mock::MockInputSource`].
pub trait InputSource: Send + Sync {
    /// Opens a subscription and returns a receiver for captured events.
    ///
    /// Any previous subscription is replaced.
    fn start(&self, suppress: bool) -> Result<mpsc::Receiver<RawKeyEvent>, CaptureError>;

    /// Closes the current subscription. The receiver returned by the last
    /// [`start`](Self::start) disconnects once its buffered events are drained.
    fn stop(&self);

    /// The error that shut the source down, if any.
    ///
    /// A subscription whose receiver disconnects without [`stop`](Self::stop)
    /// being called has either run out of events or failed; this tells the
    /// two apart.
    fn failure(&self) -> Option<CaptureError> {
        None
    }
}
