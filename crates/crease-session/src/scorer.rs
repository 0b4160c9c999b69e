use crease_ledger::{
    DerivedView, InMemoryLedger, LedgerReader, LedgerSnapshot, LedgerValidator, LedgerWriter,
    ProjectionBuilder, ReplayEngine, ScoreTally,
};
use crease_store::{InningsPersistence, LoadOutcome, StateStore};
use crease_types::{BallEvent, BallKind};
use tracing::{debug, info, warn};

use crate::error::SessionResult;
use crate::haptics::{HapticClass, HapticFeedback};

/// The scorer's action surface over one innings.
///
/// Owns the ledger and keeps the stored copy in step with it: every
/// mutation re-writes the full ledger. A failed write is logged and
/// remembered, but the in-memory ledger is never rolled back.
pub struct Scorer<S, H> {
    ledger: InMemoryLedger,
    tally: ScoreTally,
    persistence: InningsPersistence<S>,
    haptics: H,
    last_persist_error: Option<String>,
}

impl<S: StateStore, H: HapticFeedback> Scorer<S, H> {
    /// Restore the stored innings and wrap it.
    ///
    /// Restored ledgers are validated; problems are logged, never fatal.
    pub fn open(persistence: InningsPersistence<S>, haptics: H) -> (Self, LoadOutcome) {
        let (events, outcome) = persistence.load();

        let report = LedgerValidator::validate(&events);
        for violation in &report.violations {
            warn!(
                index = violation.index,
                kind = ?violation.kind,
                "{}",
                violation.description
            );
        }

        let tally = ScoreTally::from_events(&events);
        let scorer = Self {
            ledger: InMemoryLedger::from_events(events),
            tally,
            persistence,
            haptics,
            last_persist_error: None,
        };
        (scorer, outcome)
    }

    /// Append one delivery and persist.
    pub fn record_ball(&mut self, runs: u32, kind: BallKind, is_wicket: bool) -> BallEvent {
        let event = self.ledger.append(runs, kind, is_wicket);
        self.tally.apply(&event);
        self.haptics.pulse(if is_wicket {
            HapticClass::Heavy
        } else {
            HapticClass::Light
        });
        self.persist();
        event
    }

    /// Remove the most recent delivery. On an empty ledger nothing changes
    /// and nothing is written.
    pub fn undo(&mut self) -> Option<BallEvent> {
        match self.ledger.remove_last() {
            Some(event) => {
                self.tally.revert(&event);
                self.haptics.pulse(HapticClass::Medium);
                self.persist();
                Some(event)
            }
            None => {
                debug!("undo on empty ledger");
                self.haptics.pulse(HapticClass::Error);
                None
            }
        }
    }

    /// Clear the innings. Returns how many balls were removed.
    pub fn reset(&mut self) -> usize {
        let cleared = self.ledger.len();
        self.ledger.clear();
        self.tally = ScoreTally::default();
        self.haptics.pulse(HapticClass::Heavy);
        self.persist();
        info!(cleared, "innings reset");
        cleared
    }

    /// Fresh derivation of everything the scoreboard shows.
    pub fn view(&self) -> DerivedView {
        ProjectionBuilder::derive_with_tally(self.ledger.events(), self.tally)
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        self.ledger.snapshot()
    }

    pub fn revision(&self) -> u64 {
        self.ledger.revision()
    }

    pub fn events(&self) -> &[BallEvent] {
        self.ledger.events()
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    pub fn tally(&self) -> ScoreTally {
        self.tally
    }

    pub fn persistence(&self) -> &InningsPersistence<S> {
        &self.persistence
    }

    pub fn haptics(&self) -> &H {
        &self.haptics
    }

    /// Emit a pulse outside of a ledger mutation.
    pub fn pulse(&self, class: HapticClass) {
        self.haptics.pulse(class);
    }

    /// Error from the most recent failed write, cleared on read.
    pub fn take_persist_error(&mut self) -> Option<String> {
        self.last_persist_error.take()
    }

    /// Write the ledger now, surfacing any failure.
    pub fn flush(&self) -> SessionResult<()> {
        self.persistence.save(self.ledger.events())?;
        Ok(())
    }

    /// Replay the ledger and compare with the running tally, then check
    /// that undoing every ball unwinds the aggregates exactly.
    pub fn verify(&self) -> SessionResult<()> {
        ReplayEngine::verify_tally(self.ledger.events(), &self.tally)?;
        ReplayEngine::verify_undo_path(self.ledger.events())?;
        Ok(())
    }

    fn persist(&mut self) {
        match self.persistence.save(self.ledger.events()) {
            Ok(()) => self.last_persist_error = None,
            Err(e) => {
                warn!(error = %e, revision = self.ledger.revision(), "failed to persist innings");
                self.last_persist_error = Some(e.to_string());
            }
        }
    }
}

impl<S, H> std::fmt::Debug for Scorer<S, H> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("balls", &self.ledger.events().len())
            .field("revision", &self.ledger.revision())
            .field("tally", &self.tally)
            .finish_non_exhaustive()
    }
}
