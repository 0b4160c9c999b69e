use crease_types::BallEvent;
use serde::Serialize;

use crate::overs::{current_over_window, partition_overs, OverGroup, OverProgress};
use crate::tally::ScoreTally;
use crate::traits::LedgerReader;

/// Everything the scoreboard shows, derived from one ledger snapshot.
///
/// Never stored as ground truth: recompute it after every mutation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DerivedView {
    pub tally: ScoreTally,
    pub progress: OverProgress,
    pub overs_display: String,
    pub over_groups: Vec<OverGroup>,
    pub current_over_window: Vec<BallEvent>,
    /// Runs per over, rounded to one decimal place.
    pub run_rate: f64,
}

impl DerivedView {
    pub fn total_runs(&self) -> u32 {
        self.tally.total_runs
    }

    pub fn wickets(&self) -> u32 {
        self.tally.wickets
    }

    pub fn legal_balls(&self) -> u32 {
        self.tally.legal_balls
    }

    /// `"runs/wickets"`, the headline score.
    pub fn score_line(&self) -> String {
        format!("{}/{}", self.tally.total_runs, self.tally.wickets)
    }

    /// Run rate with exactly one decimal place; `"0.0"` before a legal ball.
    pub fn run_rate_display(&self) -> String {
        format!("{:.1}", self.run_rate)
    }
}

/// Deterministic projection builder.
pub struct ProjectionBuilder;

impl ProjectionBuilder {
    /// Derive the full view from a ledger snapshot.
    pub fn derive(events: &[BallEvent]) -> DerivedView {
        let tally = ScoreTally::from_events(events);
        Self::derive_with_tally(events, tally)
    }

    /// Derive the view using an already-maintained tally for the aggregates.
    ///
    /// `tally` must equal `ScoreTally::from_events(events)`.
    pub fn derive_with_tally(events: &[BallEvent], tally: ScoreTally) -> DerivedView {
        let progress = OverProgress::from_legal_balls(tally.legal_balls);
        DerivedView {
            tally,
            progress,
            overs_display: progress.to_string(),
            over_groups: partition_overs(events),
            current_over_window: current_over_window(events),
            run_rate: run_rate(tally.total_runs, progress),
        }
    }

    pub fn latest<R: LedgerReader>(reader: &R) -> DerivedView {
        Self::derive(&reader.snapshot())
    }
}

/// Runs per over rounded to one decimal, zero when no legal ball is bowled.
pub fn run_rate(total_runs: u32, progress: OverProgress) -> f64 {
    let overs = progress.as_decimal();
    if overs == 0.0 {
        return 0.0;
    }
    (f64::from(total_runs) / overs * 10.0).round() / 10.0
}
