use crease_types::{BallEvent, BallKind};
use tracing::debug;

use crate::traits::{LedgerReader, LedgerSnapshot, LedgerWriter};

/// In-memory innings ledger.
///
/// Insertion order is bowling order and is never rearranged. The ledger is
/// the single source of truth; every derived figure is recomputed from it.
#[derive(Debug, Default, Clone)]
pub struct InMemoryLedger {
    events: Vec<BallEvent>,
    revision: u64,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restore a ledger from a persisted sequence, keeping its order.
    pub fn from_events(events: Vec<BallEvent>) -> Self {
        Self {
            events,
            revision: 0,
        }
    }

    /// Borrow the current sequence without copying.
    pub fn events(&self) -> &[BallEvent] {
        &self.events
    }

    /// Append an already-constructed ball.
    pub fn push(&mut self, event: BallEvent) {
        debug!(
            id = %event.id,
            runs = event.runs,
            kind = %event.kind,
            wicket = event.is_wicket,
            "ball appended"
        );
        self.events.push(event);
        self.revision += 1;
    }
}

impl LedgerWriter for InMemoryLedger {
    fn append(&mut self, runs: u32, kind: BallKind, is_wicket: bool) -> BallEvent {
        let event = BallEvent::new(runs, kind, is_wicket);
        self.push(event.clone());
        event
    }

    fn remove_last(&mut self) -> Option<BallEvent> {
        let removed = self.events.pop()?;
        self.revision += 1;
        debug!(id = %removed.id, "ball removed");
        Some(removed)
    }

    fn clear(&mut self) {
        if self.events.is_empty() {
            return;
        }
        debug!(count = self.events.len(), "ledger cleared");
        self.events.clear();
        self.revision += 1;
    }
}

impl LedgerReader for InMemoryLedger {
    fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot::new(self.revision, self.events.clone())
    }

    fn len(&self) -> usize {
        self.events.len()
    }

    fn last(&self) -> Option<&BallEvent> {
        self.events.last()
    }

    fn revision(&self) -> u64 {
        self.revision
    }
}
