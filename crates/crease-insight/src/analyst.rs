use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};

use crease_ledger::LedgerSnapshot;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::config::InsightConfig;
use crate::error::InsightError;
use crate::provider::{InsightProvider, InsightRequest};

/// Shown when the generator fails or times out.
pub const FAILURE_FALLBACK: &str = "Bowling tight lines will restrict the run flow.";

/// Shown when the generator answers without any text.
pub const EMPTY_REPLY_FALLBACK: &str = "Keep the pressure on!";

/// Where an insight sentence came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightSource {
    Generated,
    Fallback,
}

/// A sentence ready for display, tagged with the ledger revision it reflects.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Insight {
    pub text: String,
    pub source: InsightSource,
    pub revision: u64,
}

impl Insight {
    fn fallback(text: &str, revision: u64) -> Self {
        Self {
            text: text.to_string(),
            source: InsightSource::Fallback,
            revision,
        }
    }
}

/// Result of asking the analyst for an insight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InsightOutcome {
    /// Too few balls for a meaningful answer; nothing was requested.
    NotEnoughBalls { have: usize, need: usize },
    Ready(Insight),
}

/// Gatekeeper around an [`InsightProvider`].
///
/// One attempt per request, bounded by the configured timeout. Errors never
/// escape: they become [`FAILURE_FALLBACK`].
#[derive(Clone)]
pub struct MatchAnalyst {
    provider: Arc<dyn InsightProvider>,
    config: InsightConfig,
}

impl std::fmt::Debug for MatchAnalyst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchAnalyst")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl MatchAnalyst {
    pub fn new(provider: Arc<dyn InsightProvider>, config: InsightConfig) -> Self {
        Self { provider, config }
    }

    pub fn config(&self) -> &InsightConfig {
        &self.config
    }

    /// Whether the analyst should be offered for a ledger of `balls` balls.
    pub fn is_visible(&self, balls: usize) -> bool {
        balls >= self.config.visible_from
    }

    /// Whether a request for a ledger of `balls` balls would be sent.
    pub fn can_request(&self, balls: usize) -> bool {
        balls >= self.config.min_balls
    }

    /// Ask for an insight about `snapshot`. Never fails.
    pub async fn request(&self, snapshot: LedgerSnapshot) -> InsightOutcome {
        if !self.can_request(snapshot.len()) {
            return InsightOutcome::NotEnoughBalls {
                have: snapshot.len(),
                need: self.config.min_balls,
            };
        }

        let request = InsightRequest::new(snapshot);
        let revision = request.revision();
        if !self.config.enabled {
            debug!("insight generation disabled; using fallback");
            return InsightOutcome::Ready(Insight::fallback(FAILURE_FALLBACK, revision));
        }

        let timeout = self.config.timeout();
        let result = match tokio::time::timeout(timeout, self.provider.generate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(InsightError::Timeout(timeout)),
        };

        let insight = match result {
            Ok(text) if text.trim().is_empty() => {
                info!(revision, "generator returned no text");
                Insight::fallback(EMPTY_REPLY_FALLBACK, revision)
            }
            Ok(text) => Insight {
                text: text.trim().to_string(),
                source: InsightSource::Generated,
                revision,
            },
            Err(e) => {
                warn!(revision, error = %e, "insight generation failed");
                Insight::fallback(FAILURE_FALLBACK, revision)
            }
        };
        InsightOutcome::Ready(insight)
    }

    /// Run [`request`](Self::request) on the tokio runtime.
    pub fn spawn(&self, snapshot: LedgerSnapshot) -> InsightTask {
        let revision = snapshot.revision();
        let analyst = self.clone();
        let handle = tokio::spawn(async move { analyst.request(snapshot).await });
        InsightTask { revision, handle }
    }
}

/// An in-flight insight request. Resolves to `None` if it was aborted.
#[derive(Debug)]
pub struct InsightTask {
    revision: u64,
    handle: JoinHandle<InsightOutcome>,
}

impl InsightTask {
    /// Ledger revision the request was built from.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn abort(&self) {
        self.handle.abort();
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Future for InsightTask {
    type Output = Option<InsightOutcome>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.handle).poll(cx).map(Result::ok)
    }
}

/// What happened to a delivered insight.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SlotUpdate {
    Shown,
    DiscardedStale { requested_at: u64, current: u64 },
}

/// The insight text shown beside the scoreboard.
///
/// Independent of the ledger: delivering, discarding, or clearing an
/// insight never changes a ball.
#[derive(Clone, Debug, Default)]
pub struct InsightSlot {
    current: Option<Insight>,
    pending: Option<u64>,
}

impl InsightSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Insight> {
        self.current.as_ref()
    }

    pub fn text(&self) -> Option<&str> {
        self.current.as_ref().map(|i| i.text.as_str())
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Mark a request for `revision` as in flight.
    pub fn begin(&mut self, revision: u64) {
        self.pending = Some(revision);
    }

    /// Forget an in-flight request without showing anything.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Accept a finished insight, applying the staleness policy against
    /// the ledger revision at delivery time.
    pub fn deliver(
        &mut self,
        insight: Insight,
        current_revision: u64,
        discard_stale: bool,
    ) -> SlotUpdate {
        self.pending = None;
        if discard_stale && insight.revision != current_revision {
            debug!(
                requested_at = insight.revision,
                current = current_revision,
                "discarding stale insight"
            );
            return SlotUpdate::DiscardedStale {
                requested_at: insight.revision,
                current: current_revision,
            };
        }
        self.current = Some(insight);
        SlotUpdate::Shown
    }

    pub fn clear(&mut self) {
        self.current = None;
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crease_types::BallEvent;

    use super::*;
    use crate::provider::{ScriptedInsightProvider, StaticInsightProvider};

    fn snapshot(balls: usize, revision: u64) -> LedgerSnapshot {
        LedgerSnapshot::new(revision, (0..balls).map(|_| BallEvent::legal(1)).collect::<Vec<_>>())
    }

    fn analyst(provider: impl InsightProvider + 'static) -> MatchAnalyst {
        MatchAnalyst::new(Arc::new(provider), InsightConfig::default())
    }

    fn ready(outcome: InsightOutcome) -> Insight {
        match outcome {
            InsightOutcome::Ready(insight) => insight,
            other => panic!("expected insight, got {other:?}"),
        }
    }

    #[test]
    fn visibility_and_request_gates() {
        let a = analyst(StaticInsightProvider::new("x"));
        assert!(!a.can_request(2));
        assert!(a.can_request(3));
        assert!(!a.is_visible(5));
        assert!(a.is_visible(6));
    }

    #[tokio::test]
    async fn short_ledger_is_not_sent() {
        let provider = ScriptedInsightProvider::new([Ok("never".to_string())]);
        let a = MatchAnalyst::new(Arc::new(provider), InsightConfig::default());
        assert_eq!(
            a.request(snapshot(2, 2)).await,
            InsightOutcome::NotEnoughBalls { have: 2, need: 3 }
        );
    }

    #[tokio::test]
    async fn generated_text_is_trimmed() {
        let a = analyst(StaticInsightProvider::new("  Set a deep point.\n"));
        let insight = ready(a.request(snapshot(3, 7)).await);
        assert_eq!(insight.text, "Set a deep point.");
        assert_eq!(insight.source, InsightSource::Generated);
        assert_eq!(insight.revision, 7);
    }

    #[tokio::test]
    async fn provider_error_becomes_fallback() {
        let a = analyst(ScriptedInsightProvider::new([Err(InsightError::Status {
            status: 500,
            body: "boom".into(),
        })]));
        let insight = ready(a.request(snapshot(6, 6)).await);
        assert_eq!(insight.text, FAILURE_FALLBACK);
        assert_eq!(insight.source, InsightSource::Fallback);
    }

    #[tokio::test]
    async fn empty_reply_becomes_encouragement() {
        let a = analyst(StaticInsightProvider::new("   "));
        let insight = ready(a.request(snapshot(4, 4)).await);
        assert_eq!(insight.text, EMPTY_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn slow_provider_times_out_to_fallback() {
        let provider = ScriptedInsightProvider::new([Ok("late".to_string())])
            .with_delay(Duration::from_millis(200));
        let config = InsightConfig {
            timeout_ms: 20,
            ..Default::default()
        };
        let a = MatchAnalyst::new(Arc::new(provider), config);
        let insight = ready(a.request(snapshot(3, 3)).await);
        assert_eq!(insight.text, FAILURE_FALLBACK);
    }

    #[tokio::test]
    async fn disabled_generator_is_never_called() {
        let provider = Arc::new(ScriptedInsightProvider::new([Ok("unused".to_string())]));
        let a = MatchAnalyst::new(provider.clone(), InsightConfig::offline());
        let insight = ready(a.request(snapshot(3, 1)).await);
        assert_eq!(insight.source, InsightSource::Fallback);
        assert_eq!(provider.remaining(), 1);
    }

    #[tokio::test]
    async fn spawned_task_resolves_and_aborts() {
        let a = analyst(StaticInsightProvider::new("Attack."));
        let task = a.spawn(snapshot(3, 9));
        assert_eq!(task.revision(), 9);
        let outcome = task.await.unwrap();
        assert_eq!(ready(outcome).text, "Attack.");

        let slow = analyst(
            ScriptedInsightProvider::new([Ok("late".to_string())])
                .with_delay(Duration::from_secs(5)),
        );
        let task = slow.spawn(snapshot(3, 1));
        task.abort();
        assert!(task.await.is_none());
    }

    #[test]
    fn slot_discards_stale_results() {
        let mut slot = InsightSlot::new();
        slot.begin(3);
        assert!(slot.is_loading());
        let stale = Insight {
            text: "old".into(),
            source: InsightSource::Generated,
            revision: 3,
        };
        assert_eq!(
            slot.deliver(stale.clone(), 5, true),
            SlotUpdate::DiscardedStale {
                requested_at: 3,
                current: 5
            }
        );
        assert!(slot.text().is_none());
        assert!(!slot.is_loading());

        assert_eq!(slot.deliver(stale, 5, false), SlotUpdate::Shown);
        assert_eq!(slot.text(), Some("old"));
    }

    #[test]
    fn slot_shows_fresh_results() {
        let mut slot = InsightSlot::new();
        let fresh = Insight {
            text: "new".into(),
            source: InsightSource::Generated,
            revision: 2,
        };
        assert_eq!(slot.deliver(fresh, 2, true), SlotUpdate::Shown);
        assert_eq!(slot.current().map(|i| i.revision), Some(2));
        slot.clear();
        assert!(slot.current().is_none());
    }
}
