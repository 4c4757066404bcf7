//! RedirectInputUseCase: the capture/redirect state machine.
//!
//! Two states: idle (initial) and redirecting. Per captured event:
//!
//! 1. Press while redirecting: with layout correction on and a key from the
//!    invalid alphabet, nothing is sent and layout recovery is requested.
//!    Otherwise a Press event is sent.
//! 2. Press while idle: nothing happens; the key reaches local applications.
//! 3. Release while redirecting: a Release event is sent.
//! 4. Release of the activation key, in either state: redirection flips and
//!    the subscription must be restarted in the matching suppress mode.
//!
//! Rule 3 runs before rule 4, so the activation release that ends
//! redirection is forwarded while the one that starts it is not. The
//! activation key therefore cannot be typed on the client.
//!
//! The use case never touches the input source itself. Restarts and recovery
//! are returned as a [`CaptureAction`] for the capture loop to execute.

use std::sync::Arc;

use keyfwd_core::{Key, KeyEvent, LayoutDetector, NamedKey};
use thiserror::Error;
use tracing::{debug, info};

use crate::infrastructure::input_capture::RawKeyEvent;
use crate::infrastructure::network::TransmitError;

/// Error type for the redirect use case.
#[derive(Debug, Error)]
pub enum RedirectError {
    #[error("transmitter error: {0}")]
    Transmit(#[from] TransmitError),
}

/// Trait for sending key events to the remote client.
///
/// The infrastructure implementation sends UDP datagrams; tests record calls.
pub trait KeyTransmitter: Send + Sync {
    /// Sends one key event.
    fn send(&self, event: &KeyEvent) -> Result<(), TransmitError>;
}

/// What the capture loop must do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureAction {
    /// Keep reading from the current subscription.
    Continue,
    /// Tear the subscription down and reopen it in the given suppress mode.
    Resubscribe { suppress: bool },
    /// Run the layout recovery sequence, then reopen the subscription in the
    /// current mode.
    RecoverLayout,
}

/// The key whose release toggles redirection on this platform.
pub fn default_activation_key() -> Key {
    activation_key_for(std::env::consts::OS)
}

/// The activation key for the platform named `os`
/// (as in [`std::env::consts::OS`]).
///
/// F13 everywhere except Linux, where the evdev grab only reports keys up to
/// F12; Scroll Lock is used there instead.
pub fn activation_key_for(os: &str) -> Key {
    match os {
        "linux" => Key::named(NamedKey::ScrollLock),
        _ => Key::named(NamedKey::F13),
    }
}

/// The Redirect Input use case.
pub struct RedirectInputUseCase {
    redirecting: bool,
    correct_invalid_layout: bool,
    activation_key: Key,
    detector: LayoutDetector,
    transmitter: Arc<dyn KeyTransmitter>,
}

impl RedirectInputUseCase {
    /// Creates an idle use case with the default activation key and the
    /// default invalid-layout alphabet.
    pub fn new(transmitter: Arc<dyn KeyTransmitter>, correct_invalid_layout: bool) -> Self {
        Self {
            redirecting: false,
            correct_invalid_layout,
            activation_key: default_activation_key(),
            detector: LayoutDetector::default(),
            transmitter,
        }
    }

    /// Replaces the layout detector.
    pub fn with_detector(mut self, detector: LayoutDetector) -> Self {
        self.detector = detector;
        self
    }

    /// Replaces the activation key.
    pub fn with_activation_key(mut self, key: Key) -> Self {
        self.activation_key = key;
        self
    }

    /// Returns whether captured keys are currently redirected.
    pub fn is_redirecting(&self) -> bool {
        self.redirecting
    }

    pub fn activation_key(&self) -> Key {
        self.activation_key
    }

    /// Handles one classified event from the input source.
    ///
    /// # Errors
    ///
    /// Returns [`RedirectError::Transmit`] if the transmitter fails to send.
    pub fn handle_event(&mut self, event: RawKeyEvent) -> Result<CaptureAction, RedirectError> {
        match event {
            RawKeyEvent::Press(key) => self.handle_press(key),
            RawKeyEvent::Release(key) => self.handle_release(key),
        }
    }

    // ── Private event handlers ────────────────────────────────────────────────

    fn handle_press(&mut self, key: Key) -> Result<CaptureAction, RedirectError> {
        if !self.redirecting {
            return Ok(CaptureAction::Continue);
        }

        if self.correct_invalid_layout && !self.detector.is_valid(&key) {
            info!(%key, "key typed in unexpected layout; requesting layout recovery");
            return Ok(CaptureAction::RecoverLayout);
        }

        self.transmitter.send(&KeyEvent::press(key))?;
        Ok(CaptureAction::Continue)
    }

    fn handle_release(&mut self, key: Key) -> Result<CaptureAction, RedirectError> {
        if self.redirecting {
            self.transmitter.send(&KeyEvent::release(key))?;
        }

        if key != self.activation_key {
            return Ok(CaptureAction::Continue);
        }

        self.redirecting = !self.redirecting;
        if self.redirecting {
            info!("redirect on");
        } else {
            info!("redirect off");
        }
        debug!(suppress = self.redirecting, "subscription restart requested");
        Ok(CaptureAction::Resubscribe {
            suppress: self.redirecting,
        })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
