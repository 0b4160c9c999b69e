use std::ops::Deref;
use std::sync::Arc;

use crease_types::{BallEvent, BallKind};

/// Write boundary for innings ledger mutations.
///
/// The ledger only ever grows at the end, shrinks from the end, or empties.
/// None of these operations can fail.
pub trait LedgerWriter: Send + Sync {
    /// Record a new ball with a fresh id and timestamp and return it.
    fn append(&mut self, runs: u32, kind: BallKind, is_wicket: bool) -> BallEvent;

    /// Remove and return the most recent ball. `None` on an empty ledger.
    fn remove_last(&mut self) -> Option<BallEvent>;

    /// Drop every ball. A no-op on an empty ledger.
    fn clear(&mut self);
}

/// Read boundary for innings ledger queries.
pub trait LedgerReader: Send + Sync {
    /// Point-in-time copy of the ledger, safe to hold across mutations.
    fn snapshot(&self) -> LedgerSnapshot;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn last(&self) -> Option<&BallEvent>;

    /// Counter bumped by every effective mutation.
    fn revision(&self) -> u64;
}

/// Immutable, shareable view of the ledger at one revision.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerSnapshot {
    revision: u64,
    events: Arc<[BallEvent]>,
}

impl LedgerSnapshot {
    pub fn new(revision: u64, events: impl Into<Arc<[BallEvent]>>) -> Self {
        Self {
            revision,
            events: events.into(),
        }
    }

    pub fn empty() -> Self {
        Self::new(0, Vec::new())
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn events(&self) -> &[BallEvent] {
        &self.events
    }

    pub fn to_vec(&self) -> Vec<BallEvent> {
        self.events.to_vec()
    }
}

impl Deref for LedgerSnapshot {
    type Target = [BallEvent];

    fn deref(&self) -> &Self::Target {
        &self.events
    }
}
