use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Configuration for insight generation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    /// Whether to call the external generator at all. When `false` the
    /// analyst answers every request with the fallback sentence.
    pub enabled: bool,
    /// Base URL of the generator API.
    pub endpoint: String,
    /// Model name placed in the `models/<model>:generateContent` path.
    pub model: String,
    /// Environment variable holding the API key.
    pub api_key_env: String,
    /// Upper bound on a single request, in milliseconds.
    pub timeout_ms: u64,
    /// Fewest balls for which a request is meaningful.
    pub min_balls: usize,
    /// Fewest balls before the analyst is offered to the user at all.
    pub visible_from: usize,
    /// Drop results that arrive after the ledger changed mid-request.
    pub discard_stale: bool,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-3-flash-preview".into(),
            api_key_env: "API_KEY".into(),
            timeout_ms: 15_000,
            min_balls: 3,
            visible_from: 6,
            discard_stale: true,
        }
    }
}

impl InsightConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// A configuration that never leaves the process.
    pub fn offline() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }
}
