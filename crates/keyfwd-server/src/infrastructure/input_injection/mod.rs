//! Key synthesis on the server, used to type the layout switch shortcut.
//!
//! [`RdevKeyInjector`] implements the core [`KeyInjector`] capability with
//! `rdev::simulate`. Special keys go through the virtual-key table; printable
//! keys are limited to ASCII letters and digits, which have a fixed physical
//! key on every layout.

use std::thread;
use std::time::Duration;

use keyfwd_core::{InjectionError, Key, KeyInjector, NamedKey, VirtualKeyCode};
use rdev::{EventType, Key as RdevKey};
use tracing::debug;

use crate::infrastructure::keymap::named_to_rdev;

/// Pause after each synthesized event so the OS event queue keeps up.
/// macOS in particular drops events posted back-to-back.
const SIMULATE_SETTLE: Duration = Duration::from_millis(20);

/// [`KeyInjector`] backed by `rdev::simulate`.
#[derive(Debug, Default)]
pub struct RdevKeyInjector;

impl RdevKeyInjector {
    pub fn new() -> Self {
        Self
    }

    fn simulate(&self, event_type: EventType) -> Result<(), InjectionError> {
        debug!(?event_type, "simulating key event");
        rdev::simulate(&event_type)
            .map_err(|e| InjectionError::Platform(format!("rdev simulate failed: {e:?}")))?;
        thread::sleep(SIMULATE_SETTLE);
        Ok(())
    }
}

impl KeyInjector for RdevKeyInjector {
    fn inject_press(&mut self, key: &Key) -> Result<(), InjectionError> {
        let rdev_key = to_rdev_key(key).ok_or(InjectionError::UnmappableKey(*key))?;
        self.simulate(EventType::KeyPress(rdev_key))
    }

    fn inject_release(&mut self, key: &Key) -> Result<(), InjectionError> {
        let rdev_key = to_rdev_key(key).ok_or(InjectionError::UnmappableKey(*key))?;
        self.simulate(EventType::KeyRelease(rdev_key))
    }
}

/// Resolves a [`Key`] to the physical `rdev` key that produces it.
fn to_rdev_key(key: &Key) -> Option<RdevKey> {
    let named = match key {
        Key::Special(vk) => vk.named()?,
        Key::Printable(c) => ascii_named_key(*c)?,
    };
    named_to_rdev(named)
}

/// ASCII letters and digits share their VK code with their uppercase
/// character (`VK_A = 'A'`, `VK_0 = '0'`).
fn ascii_named_key(c: char) -> Option<NamedKey> {
    if !c.is_ascii_alphanumeric() {
        return None;
    }
    NamedKey::from_vk(VirtualKeyCode(u32::from(c.to_ascii_uppercase())))
}
