//! Mock key injector for testing.
//!
//! The real injector synthesizes OS input, which needs a desktop session and
//! actually types on the test machine. `MockKeyInjector` records each call
//! instead. Clones share their records, so a test can hand one clone to the
//! use case and inspect the other.
//!
//! # Failure injection
//!
//! - [`failing`](MockKeyInjector::failing) /
//!   [`set_should_fail`](MockKeyInjector::set_should_fail): every call returns
//!   `InjectionError::Platform`.
//! - [`with_unmappable`](MockKeyInjector::with_unmappable): that key returns
//!   `InjectionError::UnmappableKey`.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc, Mutex,
};

use keyfwd_core::{InjectionError, Key, KeyAction, KeyInjector};

/// A mock injector that records all calls without performing OS calls.
#[derive(Debug, Clone, Default)]
pub struct MockKeyInjector {
    calls: Arc<Mutex<Vec<(KeyAction, Key)>>>,
    should_fail: Arc<AtomicBool>,
    unmappable: Vec<Key>,
}

impl MockKeyInjector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a mock whose calls all fail with a platform error.
    pub fn failing() -> Self {
        let mock = Self::default();
        mock.set_should_fail(true);
        mock
    }

    /// Marks `key` as having no injectable handle.
    pub fn with_unmappable(mut self, key: Key) -> Self {
        self.unmappable.push(key);
        self
    }

    pub fn set_should_fail(&self, fail: bool) {
        self.should_fail.store(fail, Ordering::SeqCst);
    }

    /// Every successful call so far, in order.
    pub fn calls(&self) -> Vec<(KeyAction, Key)> {
        self.calls.lock().expect("lock poisoned").clone()
    }

    fn record(&mut self, action: KeyAction, key: &Key) -> Result<(), InjectionError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(InjectionError::Platform("injected failure".to_string()));
        }
        if self.unmappable.contains(key) {
            return Err(InjectionError::UnmappableKey(*key));
        }
        self.calls.lock().expect("lock poisoned").push((action, *key));
        Ok(())
    }
}

impl KeyInjector for MockKeyInjector {
    fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError> {
        self.record(KeyAction::Press, key)
    }

    fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError> {
        self.record(KeyAction::Release, key)
    }
}
