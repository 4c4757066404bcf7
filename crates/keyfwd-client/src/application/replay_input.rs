//! ReplayInputUseCase: turns received datagrams into local key events.
//!
//! One datagram carries one key event. The use case decodes it and calls the
//! injector's press or release primitive. Every failure is confined to the
//! datagram that caused it:
//!
//! | Failure                              | Log level | Outcome   |
//! |--------------------------------------|-----------|-----------|
//! | Not JSON / missing field / bad enum  | `debug`   | discarded |
//! | Special key without a code, etc.     | `warn`    | discarded |
//! | Injector has no handle for the key   | `warn`    | discarded |
//! | OS rejected the synthesized event    | `error`   | discarded |

use keyfwd_core::{decode_key_event, DecodeError, InjectionError, KeyEvent, KeyInjector};
use thiserror::Error;
use tracing::{debug, error, warn};

/// Error type for replaying one datagram. None of these are fatal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ReplayError {
    #[error("undecodable datagram: {0}")]
    Decode(#[from] DecodeError),
    #[error("injection failed: {0}")]
    Injection(#[from] InjectionError),
}

/// The Replay Input use case.
pub struct ReplayInputUseCase {
    injector: Box<dyn KeyInjector>,
}

impl ReplayInputUseCase {
    /// Creates a new use case with the given injector.
    pub fn new(injector: Box<dyn KeyInjector>) -> Self {
        Self { injector }
    }

    /// Decodes `datagram` and injects the event it carries.
    ///
    /// Failures are logged here at the level matching their severity and
    /// returned so callers can count them; callers should keep receiving.
    ///
    /// # Errors
    ///
    /// - [`ReplayError::Decode`] if the datagram does not hold a valid event.
    /// - [`ReplayError::Injection`] if the key cannot be injected.
    pub fn handle_datagram(&mut self, datagram: &[u8]) -> Result<KeyEvent, ReplayError> {
        let result = self.replay(datagram);
        if let Err(e) = &result {
            log_discard(e);
        }
        result
    }

    fn replay(&mut self, datagram: &[u8]) -> Result<KeyEvent, ReplayError> {
        let event = decode_key_event(datagram)?;
        self.injector.inject(event.action, &event.key)?;
        debug!(action = ?event.action, key = %event.key, "replayed key event");
        Ok(event)
    }
}

fn log_discard(error: &ReplayError) {
    match error {
        ReplayError::Decode(DecodeError::UnrepresentableKey { .. })
        | ReplayError::Injection(InjectionError::UnmappableKey(_)) => {
            warn!("discarding key event: {error}");
        }
        ReplayError::Decode(_) => debug!("discarding datagram: {error}"),
        ReplayError::Injection(InjectionError::Platform(_)) => {
            error!("discarding key event: {error}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
