use crease_types::BallEvent;
use tracing::{debug, info, warn};

use crate::error::{StoreError, StoreResult};
use crate::record::InningsRecord;
use crate::traits::StateStore;

/// Key under which the innings record is stored by default.
pub const DEFAULT_STORAGE_KEY: &str = "box_cricket_innings";

/// How a load resolved.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Nothing was stored; start a fresh innings.
    Fresh,
    /// A stored innings was decoded.
    Restored { balls: usize },
    /// Stored data could not be read or decoded; started fresh instead.
    Recovered { reason: String },
}

/// Load/save boundary between the ledger and a [`StateStore`].
///
/// The ledger never touches storage directly: it is handed the restored
/// sequence at startup and passes a full copy back after each mutation.
#[derive(Debug)]
pub struct InningsPersistence<S> {
    store: S,
    key: String,
}

impl<S: StateStore> InningsPersistence<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Restore the stored ledger. Never fails: absent or unreadable state
    /// yields an empty ledger, the latter with a warning.
    pub fn load(&self) -> (Vec<BallEvent>, LoadOutcome) {
        let bytes = match self.store.read(&self.key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %self.key, "no stored innings");
                return (Vec::new(), LoadOutcome::Fresh);
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to read stored innings; starting fresh");
                return (
                    Vec::new(),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    },
                );
            }
        };

        let decoded = InningsRecord::from_bytes(&bytes).map_err(|e| StoreError::Corrupt {
            key: self.key.clone(),
            reason: e.to_string(),
        });
        match decoded {
            Ok(record) => {
                let balls = record.history.len();
                info!(key = %self.key, balls, "restored innings");
                (record.history, LoadOutcome::Restored { balls })
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "failed to load state; starting fresh");
                (
                    Vec::new(),
                    LoadOutcome::Recovered {
                        reason: e.to_string(),
                    },
                )
            }
        }
    }

    /// Re-serialize and write the full ledger. Last write wins.
    pub fn save(&self, events: &[BallEvent]) -> StoreResult<()> {
        let record = InningsRecord::new(events.to_vec());
        let bytes = record.to_bytes()?;
        self.store.write(&self.key, &bytes)?;
        debug!(key = %self.key, balls = events.len(), "innings saved");
        Ok(())
    }

    /// Remove the stored record entirely.
    pub fn discard(&self) -> StoreResult<bool> {
        self.store.delete(&self.key)
    }
}

#[cfg(test)]
mod tests {
    use crease_types::BallKind;

    use super::*;
    use crate::file::FileStateStore;
    use crate::memory::InMemoryStateStore;

    /// Store whose reads always fail.
    struct BrokenStore;

    impl StateStore for BrokenStore {
        fn read(&self, _key: &str) -> StoreResult<Option<Vec<u8>>> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }

        fn write(&self, _key: &str, _value: &[u8]) -> StoreResult<()> {
            Err(StoreError::Io(std::io::Error::other("disk on fire")))
        }

        fn delete(&self, _key: &str) -> StoreResult<bool> {
            Ok(false)
        }
    }

    #[test]
    fn absent_state_starts_fresh() {
        let persistence = InningsPersistence::new(InMemoryStateStore::new());
        let (events, outcome) = persistence.load();
        assert!(events.is_empty());
        assert_eq!(outcome, LoadOutcome::Fresh);
    }

    #[test]
    fn save_then_load_round_trips() {
        let persistence = InningsPersistence::new(InMemoryStateStore::new());
        let events = vec![
            BallEvent::legal(1),
            BallEvent::new(0, BallKind::Wide, false),
            BallEvent::wicket(),
        ];
        persistence.save(&events).unwrap();

        let (restored, outcome) = persistence.load();
        assert_eq!(restored, events);
        assert_eq!(outcome, LoadOutcome::Restored { balls: 3 });
    }

    #[test]
    fn malformed_state_recovers_to_empty() {
        let store = InMemoryStateStore::new();
        store.write(DEFAULT_STORAGE_KEY, b"{\"history\": [").unwrap();
        let persistence = InningsPersistence::new(store);

        let (events, outcome) = persistence.load();
        assert!(events.is_empty());
        match outcome {
            LoadOutcome::Recovered { reason } => assert!(reason.contains(DEFAULT_STORAGE_KEY)),
            other => panic!("expected recovery, got {other:?}"),
        }
    }

    #[test]
    fn oversized_runs_are_restored_verbatim() {
        let store = InMemoryStateStore::new();
        let raw = format!(
            r#"{{"history":[{{"id":"a","runs":{},"type":"WIDE","isWicket":false,"timestamp":0}}]}}"#,
            u32::MAX
        );
        store.write(DEFAULT_STORAGE_KEY, raw.as_bytes()).unwrap();
        let (events, outcome) = InningsPersistence::new(store).load();
        assert_eq!(outcome, LoadOutcome::Restored { balls: 1 });
        assert_eq!(events[0].runs, u32::MAX);
    }

    #[test]
    fn unreadable_store_recovers_to_empty() {
        let persistence = InningsPersistence::new(BrokenStore);
        let (events, outcome) = persistence.load();
        assert!(events.is_empty());
        assert!(matches!(outcome, LoadOutcome::Recovered { .. }));
        assert!(persistence.save(&[]).is_err());
    }

    #[test]
    fn empty_ledger_is_saved_not_deleted() {
        let persistence = InningsPersistence::new(InMemoryStateStore::new());
        persistence.save(&[BallEvent::legal(2)]).unwrap();
        persistence.save(&[]).unwrap();
        let (events, outcome) = persistence.load();
        assert!(events.is_empty());
        assert_eq!(outcome, LoadOutcome::Restored { balls: 0 });
    }

    #[test]
    fn file_backed_state_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let events = vec![BallEvent::legal(6), BallEvent::no_ball(2)];
        {
            let store = FileStateStore::open(dir.path()).unwrap();
            InningsPersistence::with_key(store, "match-1")
                .save(&events)
                .unwrap();
        }
        let store = FileStateStore::open(dir.path()).unwrap();
        let (restored, _) = InningsPersistence::with_key(store, "match-1").load();
        assert_eq!(restored, events);
    }
}
