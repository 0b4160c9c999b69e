use crease_types::BallEvent;
use serde::Serialize;

/// Scalar aggregates over a ledger.
///
/// Built in a single left-to-right pass by [`ScoreTally::from_events`], or
/// maintained incrementally with [`apply`](ScoreTally::apply) on append and
/// [`revert`](ScoreTally::revert) on undo. Either way the result must equal
/// a fresh pass over the same ledger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ScoreTally {
    pub total_runs: u32,
    pub wickets: u32,
    pub legal_balls: u32,
    /// Runs conceded through wides and no-balls, penalty runs included.
    pub extras: u32,
    pub boundaries: u32,
}

impl ScoreTally {
    pub fn from_events(events: &[BallEvent]) -> Self {
        let mut tally = Self::default();
        for event in events {
            tally.apply(event);
        }
        tally
    }

    /// Add `event` to the aggregates. Every counter saturates at `u32::MAX`.
    pub fn apply(&mut self, event: &BallEvent) {
        self.total_runs = self.total_runs.saturating_add(event.total_runs());
        if event.is_legal() {
            self.legal_balls = self.legal_balls.saturating_add(1);
        } else {
            self.extras = self.extras.saturating_add(event.total_runs());
        }
        if event.is_wicket {
            self.wickets = self.wickets.saturating_add(1);
        }
        if event.is_boundary() {
            self.boundaries = self.boundaries.saturating_add(1);
        }
    }

    /// Undo the effect of `event`, which must be the last one applied.
    ///
    /// Exact unless an earlier [`apply`](Self::apply) saturated.
    pub fn revert(&mut self, event: &BallEvent) {
        self.total_runs = self.total_runs.saturating_sub(event.total_runs());
        if event.is_legal() {
            self.legal_balls = self.legal_balls.saturating_sub(1);
        } else {
            self.extras = self.extras.saturating_sub(event.total_runs());
        }
        if event.is_wicket {
            self.wickets = self.wickets.saturating_sub(1);
        }
        if event.is_boundary() {
            self.boundaries = self.boundaries.saturating_sub(1);
        }
    }
}
