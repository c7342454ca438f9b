//! Panel signal types.
//!
//! A panel exposes its runtime state as numbered, typed signal slots
//! ("joins"). Each join carries exactly one kind of value: boolean
//! (buttons, interlocks), unsigned 16-bit (sliders, gauges) or string
//! (text fields). Join numbers are opaque identifiers assigned by the
//! panel layout; this crate does not validate them.

use serde::{Deserialize, Serialize};

/// A join id identifying one signal slot on the panel.
pub type Join = u32;

/// Raw full-scale value of a numeric (analog) join.
pub const RAW_FULL_SCALE: u16 = u16::MAX;

/// The kind of value a signal slot carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignalKind {
    /// Digital join (button / LED state).
    Boolean,
    /// Analog join (slider / gauge level, 0..=65535).
    UShort,
    /// Serial join (text field).
    String,
}

/// A typed signal value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SignalValue {
    Boolean(bool),
    UShort(u16),
    String(String),
}

impl SignalValue {
    /// The kind of this value.
    pub fn kind(&self) -> SignalKind {
        match self {
            SignalValue::Boolean(_) => SignalKind::Boolean,
            SignalValue::UShort(_) => SignalKind::UShort,
            SignalValue::String(_) => SignalKind::String,
        }
    }
}

/// A signal-change event delivered to subscribers when a slot is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalChange {
    /// The join that changed.
    pub join: Join,
    /// The new value.
    pub value: SignalValue,
}

/// Join ids used by the HTTP bridge, fixed by the panel layout.
pub mod joins {
    use super::Join;

    /// Serial join receiving the helloworld message text.
    pub const MESSAGE_TEXT: Join = 11;
    /// Digital join echoed back by the holamundo route.
    pub const ECHO_BUTTON: Join = 21;
    /// Digital joins forming the interlock group, reported in order.
    pub const INTERLOCK: [Join; 3] = [22, 23, 24];
    /// Analog join holding the slider level.
    pub const SLIDER_LEVEL: Join = 31;
}

/// Scale a raw 16-bit analog level to an integer percentage.
///
/// Truncating: `0 -> 0`, `65535 -> 100`, `32768 -> 50`.
pub fn percent_from_raw(raw: u16) -> u16 {
    (u32::from(raw) * 100 / u32::from(RAW_FULL_SCALE)) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_percent_boundaries() {
        assert_eq!(percent_from_raw(0), 0);
        assert_eq!(percent_from_raw(RAW_FULL_SCALE), 100);
    }

    #[test]
    fn test_percent_midpoint() {
        // 32768 * 100 / 65535 = 50.0007... truncates to 50
        assert_eq!(percent_from_raw(32768), 50);
    }

    #[test]
    fn test_percent_truncates() {
        assert_eq!(percent_from_raw(655), 0);
        assert_eq!(percent_from_raw(656), 1);
        assert_eq!(percent_from_raw(65534), 99);
    }

    #[test]
    fn test_percent_monotonic() {
        let mut last = 0;
        for raw in (0..=u16::MAX).step_by(257) {
            let p = percent_from_raw(raw);
            assert!(p >= last);
            assert!(p <= 100);
            last = p;
        }
    }

    #[test]
    fn test_change_event_serializes() {
        let change = SignalChange {
            join: 11,
            value: SignalValue::String("hi".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            serde_json::json!({"join": 11, "value": {"String": "hi"}})
        );
    }

    #[test]
    fn test_value_kind() {
        assert_eq!(SignalValue::Boolean(true).kind(), SignalKind::Boolean);
        assert_eq!(SignalValue::UShort(42).kind(), SignalKind::UShort);
        assert_eq!(
            SignalValue::String("hi".to_string()).kind(),
            SignalKind::String
        );
    }
}
