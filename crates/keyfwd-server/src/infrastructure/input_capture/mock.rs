//! Mock input source for testing.
//!
//! Supports two modes:
//!
//! - **Live**: [`MockInputSource::new`] keeps the sender of the current
//!   subscription so tests can push events with
//!   [`inject_event`](MockInputSource::inject_event).
//! - **Scripted**: [`MockInputSource::scripted`] takes one batch of events per
//!   subscription. Each [`start`](InputSource::start) delivers the next batch
//!   and then closes the channel, so a capture loop driven by the mock
//!   terminates once the script runs out.
//!
//! Every `start` records its suppress mode and every `stop` is counted.
//! [`fail_after`](MockInputSource::fail_after) makes a scripted source report
//! a hook failure once its script is exhausted.

use std::collections::VecDeque;
use std::sync::{
    mpsc::{self, Sender},
    Arc, Mutex,
};

use super::{CaptureError, InputSource, RawKeyEvent};

/// A mock implementation of [`InputSource`].
pub struct MockInputSource {
    sender: Arc<Mutex<Option<Sender<RawKeyEvent>>>>,
    script: Option<Mutex<VecDeque<Vec<RawKeyEvent>>>>,
    starts: Mutex<Vec<bool>>,
    stop_count: Mutex<u32>,
    failure: Option<CaptureError>,
}

impl MockInputSource {
    /// Creates a live mock input source.
    pub fn new() -> Self {
        Self {
            sender: Arc::new(Mutex::new(None)),
            script: None,
            starts: Mutex::new(Vec::new()),
            stop_count: Mutex::new(0),
            failure: None,
        }
    }

    /// Creates a scripted mock that serves one batch per subscription.
    pub fn scripted(batches: Vec<Vec<RawKeyEvent>>) -> Self {
        Self {
            script: Some(Mutex::new(batches.into())),
            ..Self::new()
        }
    }

    /// Reports `error` from [`failure`](InputSource::failure) once every
    /// scripted batch has been served.
    pub fn fail_after(mut self, error: CaptureError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Injects a synthetic event into the current live subscription.
    ///
    /// Panics if no subscription is open.
    pub fn inject_event(&self, event: RawKeyEvent) {
        let guard = self.sender.lock().expect("lock poisoned");
        if let Some(ref sender) = *guard {
            sender
                .send(event)
                .expect("receiver has been dropped; call start() first");
        } else {
            panic!("MockInputSource::inject_event called without an open subscription");
        }
    }

    /// Suppress mode of every `start` call, in order.
    pub fn starts(&self) -> Vec<bool> {
        self.starts.lock().expect("lock poisoned").clone()
    }

    /// Number of `stop` calls.
    pub fn stop_count(&self) -> u32 {
        *self.stop_count.lock().expect("lock poisoned")
    }

    /// Whether a live subscription is currently open.
    pub fn is_subscribed(&self) -> bool {
        self.sender.lock().expect("lock poisoned").is_some()
    }
}

impl Default for MockInputSource {
    fn default() -> Self {
        Self::new()
    }
}

impl InputSource for MockInputSource {
    fn start(&self, suppress: bool) -> Result<mpsc::Receiver<RawKeyEvent>, CaptureError> {
        self.starts
            .lock()
            .map_err(|_| CaptureError::LockPoisoned)?
            .push(suppress);

        let (tx, rx) = mpsc::channel();
        match &self.script {
            Some(script) => {
                let batch = script
                    .lock()
                    .map_err(|_| CaptureError::LockPoisoned)?
                    .pop_front()
                    .unwrap_or_default();
                for event in batch {
                    // The receiver is still in scope, so this cannot fail.
                    let _ = tx.send(event);
                }
                // Dropping `tx` closes the channel after the batch.
            }
            None => {
                *self.sender.lock().map_err(|_| CaptureError::LockPoisoned)? = Some(tx);
            }
        }
        Ok(rx)
    }

    fn stop(&self) {
        if let Ok(mut count) = self.stop_count.lock() {
            *count += 1;
        }
        if let Ok(mut sender) = self.sender.lock() {
            *sender = None;
        }
    }

    fn failure(&self) -> Option<CaptureError> {
        let exhausted = match &self.script {
            Some(script) => script.lock().map(|s| s.is_empty()).unwrap_or(true),
            None => true,
        };
        if exhausted {
            self.failure.clone()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use keyfwd_core::Key;

    #[test]
    fn test_mock_input_source_starts_and_receives_events() {
        // Arrange
        let source = MockInputSource::new();
        let rx = source.start(false).expect("start should succeed");

        // Act
        source.inject_event(RawKeyEvent::Press(Key::Printable('a')));

        // Assert
        let event = rx.recv().expect("should receive event");
        assert_eq!(event, RawKeyEvent::Press(Key::Printable('a')));
    }

    #[test]
    fn test_mock_input_source_stop_closes_channel() {
        // Arrange
        let source = MockInputSource::new();
        let rx = source.start(true).expect("start should succeed");

        // Act
        source.stop();

        // Assert – channel should be disconnected
        assert!(rx.recv().is_err(), "channel should be closed after stop()");
        assert!(!source.is_subscribed());
        assert_eq!(source.stop_count(), 1);
    }

    #[test]
    fn test_mock_input_source_records_suppress_modes() {
        let source = MockInputSource::new();

        source.start(false).unwrap();
        source.start(true).unwrap();

        assert_eq!(source.starts(), vec![false, true]);
    }

    #[test]
    fn test_scripted_source_serves_one_batch_per_start() {
        // Arrange
        let source = MockInputSource::scripted(vec![
            vec![RawKeyEvent::Press(Key::Printable('a'))],
            vec![
                RawKeyEvent::Press(Key::Printable('b')),
                RawKeyEvent::Release(Key::Printable('b')),
            ],
        ]);

        // Act
        let first: Vec<_> = source.start(false).unwrap().iter().collect();
        let second: Vec<_> = source.start(true).unwrap().iter().collect();
        let third: Vec<_> = source.start(false).unwrap().iter().collect();

        // Assert
        assert_eq!(first, vec![RawKeyEvent::Press(Key::Printable('a'))]);
        assert_eq!(second.len(), 2);
        assert!(third.is_empty(), "exhausted script yields a closed channel");
    }

    #[test]
    fn test_failure_is_reported_once_script_runs_out() {
        // Arrange
        let source = MockInputSource::scripted(vec![vec![]])
            .fail_after(CaptureError::HookFailed("gone".to_string()));

        // Act
        let before = source.failure();
        source.start(false).unwrap();
        let after = source.failure();

        // Assert
        assert_eq!(before, None);
        assert_eq!(after, Some(CaptureError::HookFailed("gone".to_string())));
    }
}
