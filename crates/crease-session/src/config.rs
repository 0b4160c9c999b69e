use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for a scoring session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// How long an armed reset waits for the confirming press, in milliseconds.
    pub reset_window_ms: u64,
    /// Whether to emit haptic pulses at all.
    pub haptics: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            reset_window_ms: 3_000,
            haptics: true,
        }
    }
}

impl SessionConfig {
    pub fn reset_window(&self) -> Duration {
        Duration::from_millis(self.reset_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = SessionConfig::default();
        assert_eq!(c.reset_window(), Duration::from_secs(3));
        assert!(c.haptics);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: SessionConfig = serde_json::from_str(r#"{"haptics":false}"#).unwrap();
        assert!(!c.haptics);
        assert_eq!(c.reset_window_ms, 3_000);
    }
}
