//! Global keyboard hook backed by `rdev::grab`.
//!
//! `rdev::grab` blocks its thread for the life of the process and offers no
//! way to uninstall the hook, so the hook thread is started once on the first
//! [`start`](InputSource::start) and kept running. Subscriptions are modelled
//! on top of it:
//!
//! - an open subscription holds the channel [`Sender`] and a suppress flag;
//! - with no subscription open, every event is passed through untouched.
//!
//! If `grab` returns (it only does so on failure), the error is recorded and
//! the open subscription is disconnected; [`InputSource::failure`] then
//! reports it and later `start` calls fail with it.
//!
//! Requires accessibility permission on macOS and read access to
//! `/dev/input` on Linux.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    mpsc::{self, Sender},
    Arc, Mutex,
};
use std::thread;

use keyfwd_core::Key;
use rdev::{Event, EventType, Key as RdevKey};
use tracing::{debug, error, info};

use super::{CaptureError, InputSource, RawKeyEvent};
use crate::infrastructure::keymap::rdev_to_named;

/// [`InputSource`] backed by a persistent `rdev` grab hook.
pub struct RdevInputSource {
    shared: Arc<HookShared>,
    hook_running: Arc<AtomicBool>,
}

/// State shared between the hook callback and the capture side.
#[derive(Default)]
struct HookShared {
    sender: Mutex<Option<Sender<RawKeyEvent>>>,
    suppress: AtomicBool,
    /// Characters produced by keys that are currently held down. Release
    /// events carry no text, so a release is classified by its press.
    held_chars: Mutex<Vec<(RdevKey, char)>>,
    failure: Mutex<Option<CaptureError>>,
}

impl RdevInputSource {
    pub fn new() -> Self {
        Self {
            shared: Arc::new(HookShared::default()),
            hook_running: Arc::new(AtomicBool::new(false)),
        }
    }

    fn ensure_hook_thread(&self) -> Result<(), CaptureError> {
        if self.hook_running.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        let shared = Arc::clone(&self.shared);
        let running = Arc::clone(&self.hook_running);
        let spawned = thread::Builder::new()
            .name("keyfwd-hook".to_string())
            .spawn(move || {
                let callback_state = Arc::clone(&shared);
                // rdev::grab blocks until the hook fails.
                let reason = match rdev::grab(move |event| callback_state.on_event(event)) {
                    Err(e) => format!("{e:?}"),
                    Ok(()) => "hook returned unexpectedly".to_string(),
                };
                error!("keyboard hook failed: {reason}");
                running.store(false, Ordering::SeqCst);
                shared.fail(CaptureError::HookFailed(reason));
            });

        match spawned {
            Ok(_) => {
                info!("keyboard hook thread started");
                Ok(())
            }
            Err(e) => {
                self.hook_running.store(false, Ordering::SeqCst);
                Err(CaptureError::HookInstallFailed(e.to_string()))
            }
        }
    }
}

impl Default for RdevInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for RdevInputSource {
    fn start(&self, suppress: bool) -> Result<mpsc::Receiver<RawKeyEvent>, CaptureError> {
        if let Some(e) = self.failure() {
            return Err(e);
        }
        let (tx, rx) = mpsc::channel();
        self.shared.suppress.store(suppress, Ordering::SeqCst);
        *self
            .shared
            .sender
            .lock()
            .map_err(|_| CaptureError::LockPoisoned)? = Some(tx);
        self.ensure_hook_thread()?;
        debug!(suppress, "subscription opened");
        Ok(rx)
    }

    fn stop(&self) {
        if let Ok(mut sender) = self.shared.sender.lock() {
            *sender = None;
        }
        self.shared.suppress.store(false, Ordering::SeqCst);
        debug!("subscription closed");
    }

    fn failure(&self) -> Option<CaptureError> {
        self.shared.failure()
    }
}

impl HookShared {
    /// Records why the hook stopped, then disconnects the open subscription.
    /// The order matters: a capture loop woken by the disconnect must find
    /// the error already stored.
    fn fail(&self, error: CaptureError) {
        if let Ok(mut failure) = self.failure.lock() {
            *failure = Some(error);
        }
        if let Ok(mut sender) = self.sender.lock() {
            *sender = None;
        }
    }

    fn failure(&self) -> Option<CaptureError> {
        match self.failure.lock() {
            Ok(failure) => failure.clone(),
            Err(_) => Some(CaptureError::LockPoisoned),
        }
    }

    /// Hook callback: returns `None` to swallow the event locally.
    fn on_event(&self, event: Event) -> Option<Event> {
        let raw = match event.event_type {
            EventType::KeyPress(key) => self
                .classify_press(key, event.name.as_deref())
                .map(RawKeyEvent::Press),
            EventType::KeyRelease(key) => self.classify_release(key).map(RawKeyEvent::Release),
            _ => return Some(event),
        };

        let Ok(guard) = self.sender.lock() else {
            return Some(event);
        };
        let Some(sender) = guard.as_ref() else {
            return Some(event);
        };

        match raw {
            Some(raw) => {
                // A send error means the capture loop has gone away.
                let _ = sender.send(raw);
            }
            None => debug!(event_type = ?event.event_type, "unclassifiable key ignored"),
        }

        if self.suppress.load(Ordering::SeqCst) {
            None
        } else {
            Some(event)
        }
    }

    fn classify_press(&self, key: RdevKey, name: Option<&str>) -> Option<Key> {
        if let Some(c) = name.and_then(printable_char) {
            if let Ok(mut held) = self.held_chars.lock() {
                held.retain(|(k, _)| *k != key);
                held.push((key, c));
            }
            return Some(Key::Printable(c));
        }
        rdev_to_named(key).map(Key::named)
    }

    fn classify_release(&self, key: RdevKey) -> Option<Key> {
        if let Ok(mut held) = self.held_chars.lock() {
            if let Some(pos) = held.iter().position(|(k, _)| *k == key) {
                let (_, c) = held.swap_remove(pos);
                return Some(Key::Printable(c));
            }
        }
        rdev_to_named(key).map(Key::named)
    }
}

/// The character a key produced, if its text is exactly one visible character.
///
/// Control characters (Return, Backspace, Escape) and whitespace (Space, Tab)
/// are classified as special keys instead.
fn printable_char(text: &str) -> Option<char> {
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_control() && !c.is_whitespace() => Some(c),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
