use crease_types::BallEvent;

use crate::error::LedgerError;
use crate::tally::ScoreTally;
use crate::traits::LedgerReader;

/// Result of replaying a ledger from the first ball.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayResult {
    pub revision: u64,
    pub evaluated_balls: u64,
    pub tally: ScoreTally,
}

/// Deterministic replay helpers.
pub struct ReplayEngine;

impl ReplayEngine {
    pub fn replay<R: LedgerReader>(reader: &R) -> ReplayResult {
        let snapshot = reader.snapshot();
        ReplayResult {
            revision: snapshot.revision(),
            evaluated_balls: snapshot.len() as u64,
            tally: ScoreTally::from_events(&snapshot),
        }
    }

    /// Check an incrementally maintained tally against a fresh fold.
    pub fn verify_tally(events: &[BallEvent], tally: &ScoreTally) -> Result<(), LedgerError> {
        let expected = ScoreTally::from_events(events);
        if &expected != tally {
            return Err(LedgerError::TallyDivergence {
                expected: format!("{expected:?}"),
                actual: format!("{tally:?}"),
            });
        }
        Ok(())
    }

    /// Undo every ball from the end and check each intermediate tally
    /// against a fresh fold of the remaining prefix.
    ///
    /// Fails when the stored runs are too large for the aggregates to be
    /// unwound exactly.
    pub fn verify_undo_path(events: &[BallEvent]) -> Result<(), LedgerError> {
        let mut tally = ScoreTally::from_events(events);
        for index in (0..events.len()).rev() {
            tally.revert(&events[index]);
            let expected = ScoreTally::from_events(&events[..index]);
            if expected != tally {
                return Err(LedgerError::UndoDivergence {
                    index,
                    expected: format!("{expected:?}"),
                    actual: format!("{tally:?}"),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crease_types::BallKind;

    use super::*;
    use crate::memory::InMemoryLedger;
    use crate::traits::LedgerWriter;

    #[test]
    fn replay_is_deterministic() {
        let mut ledger = InMemoryLedger::new();
        ledger.append(4, BallKind::Legal, false);
        ledger.append(0, BallKind::Wide, false);
        ledger.append(0, BallKind::Legal, true);

        let first = ReplayEngine::replay(&ledger);
        let second = ReplayEngine::replay(&ledger);

        assert_eq!(first, second);
        assert_eq!(first.evaluated_balls, 3);
        assert_eq!(first.revision, 3);
        assert_eq!(first.tally.total_runs, 5);
    }

    #[test]
    fn incremental_tally_converges_through_undo() {
        let mut ledger = InMemoryLedger::new();
        let mut tally = ScoreTally::default();

        for (runs, kind) in [
            (1, BallKind::Legal),
            (0, BallKind::NoBall),
            (6, BallKind::Legal),
        ] {
            let ball = ledger.append(runs, kind, false);
            tally.apply(&ball);
        }
        if let Some(removed) = ledger.remove_last() {
            tally.revert(&removed);
        }

        assert!(ReplayEngine::verify_tally(ledger.events(), &tally).is_ok());
    }

    #[test]
    fn undo_path_unwinds_an_ordinary_innings() {
        let events = vec![
            BallEvent::legal(4),
            BallEvent::wide(1),
            BallEvent::new(0, BallKind::NoBall, true),
            BallEvent::wicket(),
        ];
        assert!(ReplayEngine::verify_undo_path(&events).is_ok());
        assert!(ReplayEngine::verify_undo_path(&[]).is_ok());
    }

    #[test]
    fn saturated_runs_break_the_undo_path() {
        let events = vec![
            BallEvent::legal(3_000_000_000),
            BallEvent::legal(3_000_000_000),
        ];
        assert!(matches!(
            ReplayEngine::verify_undo_path(&events),
            Err(LedgerError::UndoDivergence { index: 1, .. })
        ));
    }

    #[test]
    fn divergent_tally_is_reported() {
        let events = vec![BallEvent::legal(2)];
        let stale = ScoreTally::default();
        assert!(matches!(
            ReplayEngine::verify_tally(&events, &stale),
            Err(LedgerError::TallyDivergence { .. })
        ));
    }
}
