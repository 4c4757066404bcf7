//! CaptureService: drives the redirect state machine from an input source.
//!
//! Runs on its own thread. Each received event goes through
//! [`RedirectInputUseCase::handle_event`], and the returned [`CaptureAction`]
//! is carried out against the source:
//!
//! - `Resubscribe { suppress }`: stop, then start in the new mode.
//! - `RecoverLayout`: stop, sleep for the settle delay, type the layout
//!   switch shortcut, then start again in the unchanged mode. Keys pressed
//!   meanwhile reach local applications and are not captured.
//!
//! The hook runs ahead of this loop, so a stopped subscription may still hold
//! events. Those received in pass-through mode already reached local
//! applications and are discarded. Those received in suppress mode were
//! swallowed, so they are handled before anything newer: through the state
//! machine while redirecting, or typed back locally once redirection is off.
//!
//! The loop ends when the source's channel closes. If the source reports a
//! failure at that point, the loop returns it.

use std::collections::VecDeque;
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::thread;

use keyfwd_core::{Key, KeyInjector};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::application::redirect_input::{CaptureAction, RedirectError, RedirectInputUseCase};
use crate::application::switch_layout::{switch_layout, RecoveryTiming};
use crate::infrastructure::input_capture::{CaptureError, InputSource, RawKeyEvent};

/// Error type for the capture loop.
#[derive(Debug, Error)]
pub enum CaptureLoopError {
    #[error("input capture failed: {0}")]
    Capture(#[from] CaptureError),
    #[error(transparent)]
    Redirect(#[from] RedirectError),
}

/// Owns the state machine and the collaborators it needs during recovery.
pub struct CaptureService {
    source: Arc<dyn InputSource>,
    use_case: RedirectInputUseCase,
    injector: Box<dyn KeyInjector + Send>,
    shortcut: Vec<Key>,
    timing: RecoveryTiming,
}

impl CaptureService {
    pub fn new(
        source: Arc<dyn InputSource>,
        use_case: RedirectInputUseCase,
        injector: Box<dyn KeyInjector + Send>,
        shortcut: Vec<Key>,
        timing: RecoveryTiming,
    ) -> Self {
        Self {
            source,
            use_case,
            injector,
            shortcut,
            timing,
        }
    }

    pub fn use_case(&self) -> &RedirectInputUseCase {
        &self.use_case
    }

    /// Runs until the input source closes its channel.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureLoopError::Capture`] if a subscription cannot be
    /// opened or the source failed, and [`CaptureLoopError::Redirect`] if
    /// sending fails.
    pub fn run(&mut self) -> Result<(), CaptureLoopError> {
        let mut suppress = self.use_case.is_redirecting();
        let mut events = self.subscribe(suppress)?;
        let mut swallowed = VecDeque::new();

        loop {
            let action = match swallowed.pop_front() {
                Some(event) => self.handle_swallowed(event)?,
                None => match events.recv() {
                    Ok(event) => {
                        debug!(?event, "captured");
                        self.use_case.handle_event(event)?
                    }
                    Err(_) => break,
                },
            };

            match action {
                CaptureAction::Continue => {}
                CaptureAction::Resubscribe { suppress: next } => {
                    self.source.stop();
                    collect_leftovers(&events, suppress, &mut swallowed);
                    suppress = next;
                    events = self.subscribe(suppress)?;
                }
                CaptureAction::RecoverLayout => {
                    self.source.stop();
                    collect_leftovers(&events, suppress, &mut swallowed);
                    self.recover_layout();
                    suppress = self.use_case.is_redirecting();
                    events = self.subscribe(suppress)?;
                }
            }
        }

        self.source.stop();
        if let Some(e) = self.source.failure() {
            error!("input source failed: {e}");
            return Err(e.into());
        }
        info!("input source closed; capture loop finished");
        Ok(())
    }

    fn subscribe(&self, suppress: bool) -> Result<Receiver<RawKeyEvent>, CaptureError> {
        let rx = self.source.start(suppress)?;
        info!(suppress, "listening for keys");
        Ok(rx)
    }

    /// Handles an event that a suppressing subscription kept from local
    /// applications.
    fn handle_swallowed(&mut self, event: RawKeyEvent) -> Result<CaptureAction, CaptureLoopError> {
        debug!(?event, "handling swallowed event");
        let key = event.key();
        if self.use_case.is_redirecting() || key == self.use_case.activation_key() {
            return Ok(self.use_case.handle_event(event)?);
        }

        if let Err(e) = self.injector.inject(event.action(), &key) {
            warn!(%key, "could not return swallowed key to local input: {e}");
        }
        Ok(CaptureAction::Continue)
    }

    fn recover_layout(&mut self) {
        info!(settle_ms = self.timing.settle.as_millis() as u64, "layout recovery started");
        thread::sleep(self.timing.settle);
        match switch_layout(self.injector.as_mut(), &self.shortcut, self.timing) {
            Ok(outcome) => info!(?outcome, "layout recovery finished"),
            Err(e) => error!("layout switch failed: {e}"),
        }
    }
}

/// Drains a stopped subscription. Only events it swallowed are kept.
fn collect_leftovers(
    events: &Receiver<RawKeyEvent>,
    was_suppressing: bool,
    swallowed: &mut VecDeque<RawKeyEvent>,
) {
    let before = swallowed.len();
    for event in events.try_iter() {
        if was_suppressing {
            swallowed.push_back(event);
        } else {
            debug!(?event, "delivered locally during restart; not captured");
        }
    }
    if swallowed.len() > before {
        debug!(count = swallowed.len() - before, "queued swallowed events");
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::redirect_input::{default_activation_key, KeyTransmitter};
    use crate::infrastructure::input_capture::mock::MockInputSource;
    use crate::infrastructure::network::TransmitError;
    use keyfwd_core::{InjectionError, KeyAction, KeyEvent, LayoutDetector, NamedKey};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingTransmitter {
        events: Mutex<Vec<KeyEvent>>,
    }

    impl KeyTransmitter for RecordingTransmitter {
        fn send(&self, event: &KeyEvent) -> Result<(), TransmitError> {
            self.events.lock().unwrap().push(*event);
            Ok(())
        }
    }

    #[derive(Default, Clone)]
    struct SharedInjector {
        calls: Arc<Mutex<Vec<(KeyAction, Key)>>>,
    }

    impl KeyInjector for SharedInjector {
        fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError> {
            self.calls.lock().unwrap().push((KeyAction::Press, *key));
            Ok(())
        }

        fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError> {
            self.calls.lock().unwrap().push((KeyAction::Release, *key));
            Ok(())
        }
    }

    fn make_service(
        batches: Vec<Vec<RawKeyEvent>>,
        shortcut: Vec<Key>,
    ) -> (
        CaptureService,
        Arc<MockInputSource>,
        Arc<RecordingTransmitter>,
        SharedInjector,
    ) {
        make_service_with_source(MockInputSource::scripted(batches), shortcut)
    }

    fn make_service_with_source(
        source: MockInputSource,
        shortcut: Vec<Key>,
    ) -> (
        CaptureService,
        Arc<MockInputSource>,
        Arc<RecordingTransmitter>,
        SharedInjector,
    ) {
        let source = Arc::new(source);
        let transmitter = Arc::new(RecordingTransmitter::default());
        let injector = SharedInjector::default();
        let use_case = RedirectInputUseCase::new(
            Arc::clone(&transmitter) as Arc<dyn KeyTransmitter>,
            true,
        )
        .with_detector(LayoutDetector::new(['a']));
        let service = CaptureService::new(
            Arc::clone(&source) as Arc<dyn InputSource>,
            use_case,
            Box::new(injector.clone()),
            shortcut,
            RecoveryTiming::ZERO,
        );
        (service, source, transmitter, injector)
    }

    #[test]
    fn test_first_subscription_passes_keys_through() {
        let (mut service, source, _, _) = make_service(vec![], vec![]);

        service.run().unwrap();

        assert_eq!(source.starts(), vec![false]);
    }

    #[test]
    fn test_activation_release_resubscribes_with_suppression() {
        // Arrange
        let (mut service, source, tx, _) = make_service(
            vec![vec![RawKeyEvent::Release(default_activation_key())]],
            vec![],
        );

        // Act
        service.run().unwrap();

        // Assert
        assert_eq!(source.starts(), vec![false, true]);
        assert!(service.use_case().is_redirecting());
        assert!(tx.events.lock().unwrap().is_empty());
    }

    #[test]
    fn test_recovery_restarts_in_same_mode_and_types_shortcut() {
        // Arrange
        let shortcut = vec![Key::named(NamedKey::MetaLeft), Key::named(NamedKey::Space)];
        let (mut service, source, tx, injector) = make_service(
            vec![
                vec![RawKeyEvent::Release(default_activation_key())],
                vec![RawKeyEvent::Press(Key::Printable('a'))],
            ],
            shortcut.clone(),
        );

        // Act
        service.run().unwrap();

        // Assert
        assert_eq!(source.starts(), vec![false, true, true]);
        assert!(tx.events.lock().unwrap().is_empty());
        let calls = injector.calls.lock().unwrap();
        assert_eq!(calls.len(), 4);
        assert_eq!(calls[0], (KeyAction::Press, shortcut[0]));
        assert_eq!(calls[3], (KeyAction::Release, shortcut[0]));
    }

    #[test]
    fn test_recovery_without_shortcut_keeps_redirecting() {
        let (mut service, source, _, injector) = make_service(
            vec![
                vec![RawKeyEvent::Release(default_activation_key())],
                vec![RawKeyEvent::Press(Key::Printable('a'))],
            ],
            vec![],
        );

        service.run().unwrap();

        assert_eq!(source.starts(), vec![false, true, true]);
        assert!(service.use_case().is_redirecting());
        assert!(injector.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_each_restart_stops_the_previous_subscription() {
        let (mut service, source, _, _) = make_service(
            vec![
                vec![RawKeyEvent::Release(default_activation_key())],
                vec![RawKeyEvent::Release(default_activation_key())],
            ],
            vec![],
        );

        service.run().unwrap();

        assert_eq!(source.starts(), vec![false, true, false]);
        // Two restarts plus the final stop when the source closes.
        assert_eq!(source.stop_count(), 3);
    }

    #[test]
    fn test_keys_queued_behind_recovery_are_forwarded() {
        // Arrange: 'b' was swallowed while the recovery trigger was handled.
        let (mut service, source, tx, _) = make_service(
            vec![
                vec![RawKeyEvent::Release(default_activation_key())],
                vec![
                    RawKeyEvent::Press(Key::Printable('a')),
                    RawKeyEvent::Press(Key::Printable('b')),
                    RawKeyEvent::Release(Key::Printable('b')),
                ],
            ],
            vec![],
        );

        // Act
        service.run().unwrap();

        // Assert
        assert_eq!(source.starts(), vec![false, true, true]);
        assert_eq!(
            *tx.events.lock().unwrap(),
            vec![
                KeyEvent::press(Key::Printable('b')),
                KeyEvent::release(Key::Printable('b')),
            ]
        );
    }

    #[test]
    fn test_keys_queued_behind_toggle_off_are_typed_locally() {
        // Arrange
        let (mut service, source, tx, injector) = make_service(
            vec![
                vec![RawKeyEvent::Release(default_activation_key())],
                vec![
                    RawKeyEvent::Release(default_activation_key()),
                    RawKeyEvent::Press(Key::Printable('x')),
                    RawKeyEvent::Release(Key::Printable('x')),
                ],
            ],
            vec![],
        );

        // Act
        service.run().unwrap();

        // Assert
        assert_eq!(source.starts(), vec![false, true, false]);
        assert_eq!(
            *tx.events.lock().unwrap(),
            vec![KeyEvent::release(default_activation_key())]
        );
        assert_eq!(
            *injector.calls.lock().unwrap(),
            vec![
                (KeyAction::Press, Key::Printable('x')),
                (KeyAction::Release, Key::Printable('x')),
            ]
        );
    }

    #[test]
    fn test_keys_queued_behind_toggle_on_are_not_captured() {
        // They were delivered locally by the pass-through subscription.
        let (mut service, source, tx, injector) = make_service(
            vec![vec![
                RawKeyEvent::Release(default_activation_key()),
                RawKeyEvent::Press(Key::Printable('q')),
                RawKeyEvent::Release(Key::Printable('q')),
            ]],
            vec![],
        );

        service.run().unwrap();

        assert_eq!(source.starts(), vec![false, true]);
        assert!(tx.events.lock().unwrap().is_empty());
        assert!(injector.calls.lock().unwrap().is_empty());
    }

    #[test]
    fn test_source_failure_ends_loop_with_error() {
        // Arrange
        let source = MockInputSource::scripted(vec![vec![RawKeyEvent::Release(
            default_activation_key(),
        )]])
        .fail_after(CaptureError::HookFailed("PermissionDenied".to_string()));
        let (mut service, _, _, _) = make_service_with_source(source, vec![]);

        // Act
        let result = service.run();

        // Assert
        assert!(matches!(
            result,
            Err(CaptureLoopError::Capture(CaptureError::HookFailed(_)))
        ));
    }

    #[test]
    fn test_exhausted_source_without_failure_ends_cleanly() {
        let (mut service, _, _, _) = make_service(vec![vec![]], vec![]);

        assert!(service.run().is_ok());
    }
}
