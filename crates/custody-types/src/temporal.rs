use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Wall-clock timestamp with a logical counter.
///
/// Two events read from the system clock within the same millisecond would
/// otherwise carry identical timestamps; [`Timestamp::after`] bumps the
/// logical counter so that a sequence of timestamps stays strictly increasing.
///
/// Ordering: `physical_ms` → `logical` (total order).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Timestamp {
    /// Wall-clock milliseconds since UNIX epoch.
    pub physical_ms: u64,
    /// Logical counter for events at the same physical time.
    pub logical: u32,
}

impl Timestamp {
    /// Create a timestamp with explicit values.
    pub const fn new(physical_ms: u64, logical: u32) -> Self {
        Self {
            physical_ms,
            logical,
        }
    }

    /// Timestamp for the current wall-clock time.
    pub fn now() -> Self {
        let physical_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self {
            physical_ms,
            logical: 0,
        }
    }

    /// The zero timestamp.
    pub const fn zero() -> Self {
        Self {
            physical_ms: 0,
            logical: 0,
        }
    }

    /// Current time, guaranteed strictly after `previous`.
    ///
    /// If the wall clock has not moved past `previous` (same millisecond, or
    /// the clock stepped backwards), the logical counter is advanced instead.
    pub fn after(previous: &Self) -> Self {
        let now = Self::now();
        if now.physical_ms > previous.physical_ms {
            now
        } else {
            Self {
                physical_ms: previous.physical_ms,
                logical: previous.logical.saturating_add(1),
            }
        }
    }

    /// Fixed-width big-endian encoding used by the commitment function.
    pub fn to_be_bytes(&self) -> [u8; 12] {
        let mut out = [0u8; 12];
        out[..8].copy_from_slice(&self.physical_ms.to_be_bytes());
        out[8..].copy_from_slice(&self.logical.to_be_bytes());
        out
    }

    /// Returns `true` if this timestamp is after `other`.
    pub fn is_after(&self, other: &Self) -> bool {
        self > other
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.physical_ms
            .cmp(&other.physical_ms)
            .then(self.logical.cmp(&other.logical))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({}ms.{})", self.physical_ms, self.logical)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.physical_ms, self.logical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_physical_first() {
        let a = Timestamp::new(100, 5);
        let b = Timestamp::new(200, 0);
        assert!(a < b);
    }

    #[test]
    fn ordering_logical_second() {
        let a = Timestamp::new(100, 1);
        let b = Timestamp::new(100, 2);
        assert!(a < b);
        assert!(b.is_after(&a));
    }

    #[test]
    fn now_produces_reasonable_timestamp() {
        let ts = Timestamp::now();
        // after 2020-01-01
        assert!(ts.physical_ms > 1_577_836_800_000);
        assert_eq!(ts.logical, 0);
    }

    #[test]
    fn after_is_strictly_later_than_future_previous() {
        let future = Timestamp::new(u64::MAX - 1, 3);
        let next = Timestamp::after(&future);
        assert_eq!(next, Timestamp::new(u64::MAX - 1, 4));
    }

    #[test]
    fn after_past_uses_wall_clock() {
        let past = Timestamp::new(1, 9);
        let next = Timestamp::after(&past);
        assert!(next.is_after(&past));
        assert_eq!(next.logical, 0);
    }

    #[test]
    fn successive_timestamps_increase() {
        let mut prev = Timestamp::now();
        for _ in 0..1000 {
            let next = Timestamp::after(&prev);
            assert!(next > prev);
            prev = next;
        }
    }

    #[test]
    fn byte_encoding_distinguishes_components() {
        let a = Timestamp::new(1, 0).to_be_bytes();
        let b = Timestamp::new(0, 1).to_be_bytes();
        assert_ne!(a, b);
        assert_eq!(a.len(), 12);
    }

    #[test]
    fn display_format() {
        assert_eq!(format!("{}", Timestamp::new(1000, 5)), "1000.5");
        assert_eq!(Timestamp::zero(), Timestamp::new(0, 0));
    }

    #[test]
    fn serde_roundtrip() {
        let ts = Timestamp::new(1_234_567_890, 42);
        let json = serde_json::to_string(&ts).unwrap();
        let parsed: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(ts, parsed);
    }
}
