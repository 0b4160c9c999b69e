use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Wall-clock creation time of a ball, in milliseconds since the UNIX epoch.
///
/// Advisory only: bowling order is the position in the ledger, never the
/// timestamp. Two balls tapped in the same millisecond carry equal values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordedAt(u64);

impl RecordedAt {
    /// Create from explicit milliseconds since epoch.
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// The current wall-clock time.
    pub fn now() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;
        Self(millis)
    }

    /// The epoch itself.
    pub const fn zero() -> Self {
        Self(0)
    }

    pub fn as_millis(&self) -> u64 {
        self.0
    }

    /// UTC calendar time, or `None` if the value is out of chrono's range.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::<Utc>::from_timestamp_millis(i64::try_from(self.0).ok()?)
    }
}

impl fmt::Debug for RecordedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordedAt({}ms)", self.0)
    }
}

impl fmt::Display for RecordedAt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_utc() {
            Some(dt) => write!(f, "{}", dt.format("%H:%M:%S")),
            None => write!(f, "{}ms", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_produces_reasonable_timestamp() {
        let at = RecordedAt::now();
        // Should be after 2020-01-01 (1577836800000 ms)
        assert!(at.as_millis() > 1_577_836_800_000);
    }

    #[test]
    fn zero_is_smallest() {
        assert!(RecordedAt::zero() < RecordedAt::from_millis(1));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let at = RecordedAt::from_millis(1_700_000_000_123);
        let json = serde_json::to_string(&at).unwrap();
        assert_eq!(json, "1700000000123");
        let parsed: RecordedAt = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, at);
    }

    #[test]
    fn display_uses_wall_clock() {
        // 1970-01-01T01:02:03Z
        let at = RecordedAt::from_millis(3_723_000);
        assert_eq!(at.to_string(), "01:02:03");
    }

    #[test]
    fn out_of_range_falls_back_to_millis() {
        let at = RecordedAt::from_millis(u64::MAX);
        assert!(at.to_utc().is_none());
        assert_eq!(at.to_string(), format!("{}ms", u64::MAX));
    }
}
