use std::time::{Duration, Instant};

use crease_insight::{InsightOutcome, InsightSlot, InsightTask, MatchAnalyst, SlotUpdate};
use crease_ledger::DerivedView;
use crease_store::StateStore;
use crease_types::{BallEvent, BallKind};
use tracing::{debug, info};

use crate::guard::{PressOutcome, ResetGuard};
use crate::haptics::{HapticClass, HapticFeedback};
use crate::scorer::Scorer;
use crate::timer::DeadlineTimer;

/// Something that happened while no action was being taken.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The reset confirmation window ran out.
    ResetDisarmed,
    /// An insight request finished.
    Insight(SlotUpdate),
    /// An insight request ended without a result.
    InsightAborted,
}

/// Result of pressing reset.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResetPress {
    Armed { window: Duration },
    Cleared { balls: usize },
}

/// Result of asking for an insight.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InsightRequestState {
    Started { revision: u64 },
    AlreadyRunning,
    NotEnoughBalls { have: usize, need: usize },
}

/// Interactive scoring session.
///
/// Wraps a [`Scorer`] with the pieces that involve time: the two-press
/// reset and its deadline, and background insight requests. Drive it by
/// calling the action methods and awaiting [`next_event`](Self::next_event)
/// in between.
pub struct ScoringSession<S, H> {
    scorer: Scorer<S, H>,
    guard: ResetGuard,
    timer: DeadlineTimer,
    analyst: MatchAnalyst,
    slot: InsightSlot,
    insight: Option<InsightTask>,
}

impl<S: StateStore, H: HapticFeedback> ScoringSession<S, H> {
    pub fn new(scorer: Scorer<S, H>, analyst: MatchAnalyst, reset_window: Duration) -> Self {
        Self {
            scorer,
            guard: ResetGuard::new(reset_window),
            timer: DeadlineTimer::new(),
            analyst,
            slot: InsightSlot::new(),
            insight: None,
        }
    }

    pub fn scorer(&self) -> &Scorer<S, H> {
        &self.scorer
    }

    pub fn view(&self) -> DerivedView {
        self.scorer.view()
    }

    pub fn slot(&self) -> &InsightSlot {
        &self.slot
    }

    pub fn analyst(&self) -> &MatchAnalyst {
        &self.analyst
    }

    pub fn is_reset_armed(&self) -> bool {
        self.guard.is_armed(Instant::now())
    }

    pub fn is_insight_visible(&self) -> bool {
        self.analyst.is_visible(self.scorer.len())
    }

    pub fn record_ball(&mut self, runs: u32, kind: BallKind, is_wicket: bool) -> BallEvent {
        self.disarm_reset();
        let event = self.scorer.record_ball(runs, kind, is_wicket);
        self.sync_insight_visibility();
        event
    }

    pub fn undo(&mut self) -> Option<BallEvent> {
        self.disarm_reset();
        let undone = self.scorer.undo();
        self.sync_insight_visibility();
        undone
    }

    /// Press the reset control once.
    pub fn press_reset(&mut self) -> ResetPress {
        match self.guard.press(Instant::now()) {
            PressOutcome::Armed { deadline } => {
                self.timer.schedule(tokio::time::Instant::from_std(deadline));
                self.scorer.pulse(HapticClass::Medium);
                debug!("reset armed");
                ResetPress::Armed {
                    window: self.guard.window(),
                }
            }
            PressOutcome::Confirmed => {
                self.timer.cancel();
                let balls = self.scorer.reset();
                self.sync_insight_visibility();
                ResetPress::Cleared { balls }
            }
        }
    }

    /// Start an insight request for the ledger as it is now.
    pub fn request_insight(&mut self) -> InsightRequestState {
        if self.insight.is_some() {
            return InsightRequestState::AlreadyRunning;
        }
        let have = self.scorer.len();
        if !self.analyst.can_request(have) {
            return InsightRequestState::NotEnoughBalls {
                have,
                need: self.analyst.config().min_balls,
            };
        }
        let task = self.analyst.spawn(self.scorer.snapshot());
        let revision = task.revision();
        self.slot.begin(revision);
        self.insight = Some(task);
        info!(revision, "insight requested");
        InsightRequestState::Started { revision }
    }

    /// Wait for the reset deadline or a pending insight, whichever is first.
    ///
    /// Never resolves while neither is pending. Cancel-safe.
    pub async fn next_event(&mut self) -> SessionEvent {
        tokio::select! {
            _ = self.timer.fired() => {
                self.guard.disarm();
                debug!("reset confirmation expired");
                SessionEvent::ResetDisarmed
            }
            outcome = wait_for(&mut self.insight) => {
                self.insight = None;
                self.finish_insight(outcome)
            }
        }
    }

    fn finish_insight(&mut self, outcome: Option<InsightOutcome>) -> SessionEvent {
        match outcome {
            Some(InsightOutcome::Ready(insight)) => {
                let update = self.slot.deliver(
                    insight,
                    self.scorer.revision(),
                    self.analyst.config().discard_stale,
                );
                if update == SlotUpdate::Shown {
                    self.scorer.pulse(HapticClass::Success);
                }
                SessionEvent::Insight(update)
            }
            Some(InsightOutcome::NotEnoughBalls { .. }) | None => {
                self.slot.cancel();
                SessionEvent::InsightAborted
            }
        }
    }

    fn disarm_reset(&mut self) {
        if self.guard.disarm() {
            self.timer.cancel();
            debug!("reset disarmed by ledger action");
        }
    }

    /// The insight panel only exists for long enough innings; dropping
    /// below that discards whatever it held.
    fn sync_insight_visibility(&mut self) {
        if self.is_insight_visible() {
            return;
        }
        if let Some(task) = self.insight.take() {
            task.abort();
        }
        self.slot.clear();
    }
}

async fn wait_for(task: &mut Option<InsightTask>) -> Option<InsightOutcome> {
    match task {
        Some(task) => task.await,
        None => std::future::pending().await,
    }
}

impl<S, H> std::fmt::Debug for ScoringSession<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScoringSession")
            .field("scorer", &self.scorer)
            .field("guard", &self.guard)
            .field("timer", &self.timer)
            .field("slot", &self.slot)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crease_insight::{
        InsightConfig, InsightSource, ScriptedInsightProvider, StaticInsightProvider,
    };
    use crease_store::{InMemoryStateStore, InningsPersistence};

    use super::*;
    use crate::haptics::{NoopHaptics, RecordingHaptics};

    const SHORT: Duration = Duration::from_millis(30);

    fn session_with(
        analyst: MatchAnalyst,
        window: Duration,
    ) -> ScoringSession<InMemoryStateStore, RecordingHaptics> {
        let persistence = InningsPersistence::new(InMemoryStateStore::new());
        let (scorer, _) = Scorer::open(persistence, RecordingHaptics::new());
        ScoringSession::new(scorer, analyst, window)
    }

    fn session(window: Duration) -> ScoringSession<InMemoryStateStore, RecordingHaptics> {
        let analyst = MatchAnalyst::new(
            Arc::new(StaticInsightProvider::new("Hold your length.")),
            InsightConfig::default(),
        );
        session_with(analyst, window)
    }

    fn bowl(session: &mut ScoringSession<InMemoryStateStore, RecordingHaptics>, balls: usize) {
        for _ in 0..balls {
            session.record_ball(1, BallKind::Legal, false);
        }
    }

    #[tokio::test]
    async fn double_press_inside_window_clears() {
        let mut s = session(Duration::from_secs(3));
        bowl(&mut s, 4);
        assert!(matches!(s.press_reset(), ResetPress::Armed { .. }));
        assert!(s.is_reset_armed());
        assert_eq!(s.press_reset(), ResetPress::Cleared { balls: 4 });
        assert!(s.scorer().is_empty());
        assert!(!s.is_reset_armed());
    }

    #[tokio::test]
    async fn window_expiry_disarms() {
        let mut s = session(SHORT);
        bowl(&mut s, 2);
        s.press_reset();
        assert_eq!(s.next_event().await, SessionEvent::ResetDisarmed);
        assert!(!s.is_reset_armed());
        assert!(matches!(s.press_reset(), ResetPress::Armed { .. }));
        assert_eq!(s.scorer().len(), 2);
    }

    #[tokio::test]
    async fn ledger_action_disarms_and_cancels_timer() {
        let mut s = session(SHORT);
        bowl(&mut s, 1);
        s.press_reset();
        s.record_ball(4, BallKind::Legal, false);
        assert!(!s.is_reset_armed());

        let waited = tokio::time::timeout(SHORT * 3, s.next_event()).await;
        assert!(waited.is_err(), "no event once the deadline was cancelled");
        assert!(matches!(s.press_reset(), ResetPress::Armed { .. }));
    }

    #[tokio::test]
    async fn insight_needs_three_balls() {
        let mut s = session(SHORT);
        bowl(&mut s, 2);
        assert_eq!(
            s.request_insight(),
            InsightRequestState::NotEnoughBalls { have: 2, need: 3 }
        );
    }

    #[tokio::test]
    async fn fresh_insight_is_shown() {
        let mut s = session(SHORT);
        bowl(&mut s, 6);
        let revision = s.scorer().revision();
        assert_eq!(s.request_insight(), InsightRequestState::Started { revision });
        assert_eq!(s.request_insight(), InsightRequestState::AlreadyRunning);
        assert!(s.slot().is_loading());

        assert_eq!(s.next_event().await, SessionEvent::Insight(SlotUpdate::Shown));
        let shown = s.slot().current().unwrap();
        assert_eq!(shown.text, "Hold your length.");
        assert_eq!(shown.source, InsightSource::Generated);
        assert_eq!(s.scorer().haptics().pulses().last(), Some(&HapticClass::Success));
    }

    #[tokio::test]
    async fn insight_for_old_ledger_is_discarded() {
        let provider = ScriptedInsightProvider::new([Ok("Too late.".to_string())]).with_delay(SHORT);
        let analyst = MatchAnalyst::new(Arc::new(provider), InsightConfig::default());
        let mut s = session_with(analyst, Duration::from_secs(3));
        bowl(&mut s, 7);
        s.request_insight();
        s.record_ball(6, BallKind::Legal, false);

        match s.next_event().await {
            SessionEvent::Insight(SlotUpdate::DiscardedStale { requested_at, current }) => {
                assert!(requested_at < current);
            }
            other => panic!("expected stale discard, got {other:?}"),
        }
        assert!(s.slot().text().is_none());
        assert_eq!(s.scorer().len(), 8);
    }

    #[tokio::test]
    async fn dropping_below_visibility_clears_insight() {
        let provider =
            ScriptedInsightProvider::new([Ok("Unused.".to_string())]).with_delay(Duration::from_secs(5));
        let analyst = MatchAnalyst::new(Arc::new(provider), InsightConfig::default());
        let mut s = session_with(analyst, Duration::from_secs(3));
        bowl(&mut s, 6);
        s.request_insight();
        s.undo();
        assert!(!s.is_insight_visible());
        assert!(!s.slot().is_loading());

        let waited = tokio::time::timeout(SHORT, s.next_event()).await;
        assert!(waited.is_err());
    }

    #[tokio::test]
    async fn reset_on_empty_ledger_clears_nothing() {
        let persistence = InningsPersistence::new(InMemoryStateStore::new());
        let (scorer, _) = Scorer::open(persistence, NoopHaptics);
        let analyst = MatchAnalyst::new(
            Arc::new(StaticInsightProvider::new("x")),
            InsightConfig::offline(),
        );
        let mut s = ScoringSession::new(scorer, analyst, SHORT);
        assert!(matches!(s.press_reset(), ResetPress::Armed { window } if window == SHORT));
        assert_eq!(s.press_reset(), ResetPress::Cleared { balls: 0 });
    }
}
