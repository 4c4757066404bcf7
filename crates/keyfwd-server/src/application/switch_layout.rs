//! Typing the OS keyboard layout switch shortcut.
//!
//! The shortcut is a chord: every key is pressed in order, the chord is held,
//! then the keys are released in reverse order. The pauses between steps give
//! the OS time to register each modifier before the next key arrives.

use std::thread;
use std::time::Duration;

use keyfwd_core::{InjectionError, Key, KeyInjector};
use tracing::{info, warn};

/// Delays of the layout recovery sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecoveryTiming {
    /// Pause after the subscription is torn down, before typing the shortcut.
    pub settle: Duration,
    /// Pause after each press and after each release.
    pub step: Duration,
    /// Pause between the last press and the first release.
    pub hold: Duration,
}

impl RecoveryTiming {
    /// No delays at all.
    pub const ZERO: Self = Self {
        settle: Duration::ZERO,
        step: Duration::ZERO,
        hold: Duration::ZERO,
    };
}

/// The fixed delays used by the server.
impl Default for RecoveryTiming {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1000),
            step: Duration::from_millis(100),
            hold: Duration::from_millis(500),
        }
    }
}

/// Result of [`switch_layout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutSwitchOutcome {
    /// The shortcut was typed.
    Switched,
    /// No shortcut is known for this platform; nothing was typed.
    Skipped,
}

/// Types `shortcut` as a chord through `injector`.
///
/// # Errors
///
/// Returns the first [`InjectionError`]. Keys already pressed are released
/// (best effort) before returning so no modifier is left stuck.
pub fn switch_layout<I: KeyInjector + ?Sized>(
    injector: &mut I,
    shortcut: &[Key],
    timing: RecoveryTiming,
) -> Result<LayoutSwitchOutcome, InjectionError> {
    if shortcut.is_empty() {
        warn!("no layout switch shortcut known for this platform; layout not corrected");
        return Ok(LayoutSwitchOutcome::Skipped);
    }

    info!(keys = shortcut.len(), "typing layout switch shortcut");

    for (pressed, key) in shortcut.iter().enumerate() {
        if let Err(e) = injector.inject_press(key) {
            release_all(injector, &shortcut[..pressed]);
            return Err(e);
        }
        thread::sleep(timing.step);
    }

    thread::sleep(timing.hold);

    let mut first_error = None;
    for key in shortcut.iter().rev() {
        if let Err(e) = injector.inject_release(key) {
            first_error.get_or_insert(e);
        }
        thread::sleep(timing.step);
    }

    match first_error {
        Some(e) => Err(e),
        None => Ok(LayoutSwitchOutcome::Switched),
    }
}

fn release_all<I: KeyInjector + ?Sized>(injector: &mut I, pressed: &[Key]) {
    for key in pressed.iter().rev() {
        if let Err(e) = injector.inject_release(key) {
            warn!(%key, "failed to release key after aborted shortcut: {e}");
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use keyfwd_core::{KeyAction, NamedKey};

    #[derive(Default)]
    struct RecordingInjector {
        calls: Vec<(KeyAction, Key)>,
        fail_on_press: Option<Key>,
    }

    impl KeyInjector for RecordingInjector {
        fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError> {
            if self.fail_on_press == Some(*key) {
                return Err(InjectionError::Platform("injected failure".to_string()));
            }
            self.calls.push((KeyAction::Press, *key));
            Ok(())
        }

        fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError> {
            self.calls.push((KeyAction::Release, *key));
            Ok(())
        }
    }

    fn cmd_space() -> Vec<Key> {
        vec![Key::named(NamedKey::MetaLeft), Key::named(NamedKey::Space)]
    }

    #[test]
    fn test_chord_presses_in_order_and_releases_in_reverse() {
        // Arrange
        let mut injector = RecordingInjector::default();
        let shortcut = cmd_space();

        // Act
        let outcome = switch_layout(&mut injector, &shortcut, RecoveryTiming::ZERO).unwrap();

        // Assert
        assert_eq!(outcome, LayoutSwitchOutcome::Switched);
        assert_eq!(
            injector.calls,
            vec![
                (KeyAction::Press, shortcut[0]),
                (KeyAction::Press, shortcut[1]),
                (KeyAction::Release, shortcut[1]),
                (KeyAction::Release, shortcut[0]),
            ]
        );
    }

    #[test]
    fn test_empty_shortcut_is_skipped() {
        let mut injector = RecordingInjector::default();

        let outcome = switch_layout(&mut injector, &[], RecoveryTiming::ZERO).unwrap();

        assert_eq!(outcome, LayoutSwitchOutcome::Skipped);
        assert!(injector.calls.is_empty());
    }

    #[test]
    fn test_failed_press_releases_already_pressed_keys() {
        // Arrange
        let mut injector = RecordingInjector {
            fail_on_press: Some(Key::named(NamedKey::Space)),
            ..Default::default()
        };

        // Act
        let result = switch_layout(&mut injector, &cmd_space(), RecoveryTiming::ZERO);

        // Assert
        assert!(result.is_err());
        assert_eq!(
            injector.calls,
            vec![
                (KeyAction::Press, Key::named(NamedKey::MetaLeft)),
                (KeyAction::Release, Key::named(NamedKey::MetaLeft)),
            ]
        );
    }

    #[test]
    fn test_default_timing_matches_documented_delays() {
        let timing = RecoveryTiming::default();

        assert_eq!(timing.settle, Duration::from_millis(1000));
        assert_eq!(timing.step, Duration::from_millis(100));
        assert_eq!(timing.hold, Duration::from_millis(500));
    }
}
