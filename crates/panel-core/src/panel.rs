//! Panel state store.
//!
//! The store maintains the current value of every signal slot and provides
//! methods for reading and writing them by join id. Writes notify any
//! registered signal-change callbacks so panel-side collaborators (UI
//! logic, feedback wiring) can react without event-multicast inheritance.

use std::collections::HashMap;

use crate::signal::{Join, SignalChange, SignalValue};

/// Trait for panel state storage implementations.
///
/// Unset joins read as their kind's default (false / 0 / empty string);
/// out-of-layout join ids are the caller's responsibility.
pub trait PanelStore: Send + Sync {
    /// Read a digital join.
    fn boolean(&self, join: Join) -> bool;

    /// Write a digital join.
    fn set_boolean(&mut self, join: Join, value: bool);

    /// Read an analog join.
    fn ushort(&self, join: Join) -> u16;

    /// Write an analog join.
    fn set_ushort(&mut self, join: Join, value: u16);

    /// Read a serial join.
    fn string(&self, join: Join) -> String;

    /// Write a serial join.
    fn set_string(&mut self, join: Join, value: &str);
}

/// Callback invoked for every signal write.
pub type ChangeCallback = Box<dyn Fn(&SignalChange) + Send + Sync>;

/// In-memory panel store implementation.
///
/// Backs each signal kind with its own join-keyed map. Single-threaded
/// panel event delivery is assumed by convention; share it behind a lock
/// when the HTTP layer needs concurrent access.
#[derive(Default)]
pub struct MemoryPanel {
    booleans: HashMap<Join, bool>,
    ushorts: HashMap<Join, u16>,
    strings: HashMap<Join, String>,
    callbacks: Vec<ChangeCallback>,
}

impl MemoryPanel {
    /// Create a new empty panel with all joins at their defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback invoked on every signal write.
    ///
    /// Callbacks run synchronously on the writing thread, in registration
    /// order, after the slot has been updated.
    pub fn subscribe(&mut self, callback: ChangeCallback) {
        self.callbacks.push(callback);
    }

    /// Number of joins that have been written at least once.
    pub fn join_count(&self) -> usize {
        self.booleans.len() + self.ushorts.len() + self.strings.len()
    }

    fn notify(&self, join: Join, value: SignalValue) {
        let change = SignalChange { join, value };
        for callback in &self.callbacks {
            callback(&change);
        }
    }
}

impl std::fmt::Debug for MemoryPanel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryPanel")
            .field("booleans", &self.booleans)
            .field("ushorts", &self.ushorts)
            .field("strings", &self.strings)
            .field("callbacks", &self.callbacks.len())
            .finish()
    }
}

impl PanelStore for MemoryPanel {
    fn boolean(&self, join: Join) -> bool {
        self.booleans.get(&join).copied().unwrap_or(false)
    }

    fn set_boolean(&mut self, join: Join, value: bool) {
        self.booleans.insert(join, value);
        self.notify(join, SignalValue::Boolean(value));
    }

    fn ushort(&self, join: Join) -> u16 {
        self.ushorts.get(&join).copied().unwrap_or(0)
    }

    fn set_ushort(&mut self, join: Join, value: u16) {
        self.ushorts.insert(join, value);
        self.notify(join, SignalValue::UShort(value));
    }

    fn string(&self, join: Join) -> String {
        self.strings.get(&join).cloned().unwrap_or_default()
    }

    fn set_string(&mut self, join: Join, value: &str) {
        self.strings.insert(join, value.to_string());
        self.notify(join, SignalValue::String(value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::joins;
    use pretty_assertions::assert_eq;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_unset_joins_read_defaults() {
        let panel = MemoryPanel::new();
        assert_eq!(panel.boolean(joins::ECHO_BUTTON), false);
        assert_eq!(panel.ushort(joins::SLIDER_LEVEL), 0);
        assert_eq!(panel.string(joins::MESSAGE_TEXT), "");
        assert_eq!(panel.join_count(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let mut panel = MemoryPanel::new();
        panel.set_boolean(22, true);
        panel.set_ushort(joins::SLIDER_LEVEL, 32768);
        panel.set_string(joins::MESSAGE_TEXT, "hello");

        assert_eq!(panel.boolean(22), true);
        assert_eq!(panel.ushort(joins::SLIDER_LEVEL), 32768);
        assert_eq!(panel.string(joins::MESSAGE_TEXT), "hello");
        assert_eq!(panel.join_count(), 3);
    }

    #[test]
    fn test_overwrite_same_join() {
        let mut panel = MemoryPanel::new();
        panel.set_ushort(31, 100);
        panel.set_ushort(31, 200);
        assert_eq!(panel.ushort(31), 200);
        assert_eq!(panel.join_count(), 1);
    }

    #[test]
    fn test_same_id_different_kinds_are_distinct_slots() {
        // Digital 21 and analog 21 are different joins on the panel.
        let mut panel = MemoryPanel::new();
        panel.set_boolean(21, true);
        panel.set_ushort(21, 7);
        assert_eq!(panel.boolean(21), true);
        assert_eq!(panel.ushort(21), 7);
    }

    #[test]
    fn test_subscribe_receives_changes() {
        let seen: Arc<Mutex<Vec<SignalChange>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut panel = MemoryPanel::new();
        panel.subscribe(Box::new(move |change| {
            sink.lock().unwrap().push(change.clone());
        }));

        panel.set_boolean(22, true);
        panel.set_string(11, "hi");

        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert_eq!(
            seen[0],
            SignalChange {
                join: 22,
                value: SignalValue::Boolean(true)
            }
        );
        assert_eq!(
            seen[1],
            SignalChange {
                join: 11,
                value: SignalValue::String("hi".to_string())
            }
        );
    }

    #[test]
    fn test_callback_sees_updated_slot() {
        let seen = Arc::new(Mutex::new(0u16));
        let sink = seen.clone();

        let mut panel = MemoryPanel::new();
        panel.subscribe(Box::new(move |change| {
            if let SignalValue::UShort(v) = change.value {
                *sink.lock().unwrap() = v;
            }
        }));

        panel.set_ushort(31, 4242);
        assert_eq!(*seen.lock().unwrap(), 4242);
        assert_eq!(panel.ushort(31), 4242);
    }
}
