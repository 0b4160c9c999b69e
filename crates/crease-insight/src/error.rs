use std::time::Duration;

/// Errors from insight providers.
///
/// None of these reach the user: [`MatchAnalyst`](crate::MatchAnalyst)
/// swaps any of them for a fixed fallback sentence.
#[derive(Debug, thiserror::Error)]
pub enum InsightError {
    /// The provider is missing required configuration (e.g. an API key).
    #[error("insight provider not configured: {0}")]
    NotConfigured(String),

    /// Transport-level failure talking to the generator.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The generator answered with a non-success status.
    #[error("generator returned status {status}: {body}")]
    Status { status: u16, body: String },

    /// The generator did not answer within the configured bound.
    #[error("insight request timed out after {0:?}")]
    Timeout(Duration),

    /// The provider failed for a reason of its own.
    #[error("provider error: {0}")]
    Provider(String),
}

/// Result alias for insight operations.
pub type InsightResult<T> = Result<T, InsightError>;
