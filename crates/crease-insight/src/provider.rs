use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use crease_ledger::LedgerSnapshot;

use crate::error::{InsightError, InsightResult};
use crate::prompt::build_prompt;

/// One request for an insight: the ledger as it was when the user asked.
#[derive(Clone, Debug)]
pub struct InsightRequest {
    pub snapshot: LedgerSnapshot,
    pub prompt: String,
}

impl InsightRequest {
    pub fn new(snapshot: LedgerSnapshot) -> Self {
        let prompt = build_prompt(&snapshot);
        Self { snapshot, prompt }
    }

    /// Ledger revision the request was built from.
    pub fn revision(&self) -> u64 {
        self.snapshot.revision()
    }
}

/// External text generator producing a tactical sentence.
#[async_trait]
pub trait InsightProvider: Send + Sync {
    /// Produce a sentence for `request`. An empty string means the
    /// generator answered without text.
    async fn generate(&self, request: &InsightRequest) -> InsightResult<String>;
}

/// Provider that always answers with the same sentence.
#[derive(Clone, Debug)]
pub struct StaticInsightProvider {
    sentence: String,
}

impl StaticInsightProvider {
    pub fn new(sentence: impl Into<String>) -> Self {
        Self {
            sentence: sentence.into(),
        }
    }
}

#[async_trait]
impl InsightProvider for StaticInsightProvider {
    async fn generate(&self, _request: &InsightRequest) -> InsightResult<String> {
        Ok(self.sentence.clone())
    }
}

/// Provider replaying a queue of canned replies, optionally after a delay.
///
/// Once the queue is drained every call fails.
#[derive(Debug, Default)]
pub struct ScriptedInsightProvider {
    replies: Mutex<VecDeque<InsightResult<String>>>,
    delay: Option<Duration>,
}

impl ScriptedInsightProvider {
    pub fn new(replies: impl IntoIterator<Item = InsightResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            delay: None,
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn remaining(&self) -> usize {
        self.replies.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait]
impl InsightProvider for ScriptedInsightProvider {
    async fn generate(&self, _request: &InsightRequest) -> InsightResult<String> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let next = self
            .replies
            .lock()
            .map_err(|_| InsightError::Provider("script lock poisoned".into()))?
            .pop_front();
        next.unwrap_or_else(|| Err(InsightError::Provider("script exhausted".into())))
    }
}

#[cfg(test)]
mod tests {
    use crease_types::BallEvent;

    use super::*;

    fn request() -> InsightRequest {
        InsightRequest::new(LedgerSnapshot::new(
            4,
            vec![BallEvent::legal(1), BallEvent::legal(4), BallEvent::wide(0)],
        ))
    }

    #[test]
    fn request_carries_revision_and_prompt() {
        let req = request();
        assert_eq!(req.revision(), 4);
        assert!(req.prompt.contains("[1, 4, WIDE]"));
    }

    #[tokio::test]
    async fn static_provider_repeats_itself() {
        let provider = StaticInsightProvider::new("Bowl yorkers.");
        assert_eq!(provider.generate(&request()).await.unwrap(), "Bowl yorkers.");
        assert_eq!(provider.generate(&request()).await.unwrap(), "Bowl yorkers.");
    }

    #[tokio::test]
    async fn scripted_provider_drains_then_fails() {
        let provider = ScriptedInsightProvider::new([Ok("first".to_string())]);
        assert_eq!(provider.generate(&request()).await.unwrap(), "first");
        assert_eq!(provider.remaining(), 0);
        assert!(matches!(
            provider.generate(&request()).await,
            Err(InsightError::Provider(_))
        ));
    }
}
