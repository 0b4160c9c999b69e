use crease_types::BallEvent;
use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// The persisted innings: the ordered ball log, nothing derived.
///
/// Stored as JSON:
///
/// ```text
/// {"history":[{"id":"…","runs":4,"type":"NORMAL","isWicket":false,"timestamp":1700000000000}]}
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InningsRecord {
    pub history: Vec<BallEvent>,
}

impl InningsRecord {
    pub fn new(history: Vec<BallEvent>) -> Self {
        Self { history }
    }

    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
    }
}
