use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::temporal::RecordedAt;

/// Opaque identifier for a recorded ball.
///
/// Fresh ids are UUID v7 strings. Ids read back from storage are kept
/// verbatim, whatever their shape, so records written by other scorers
/// survive a round-trip unchanged. Identity is for display lists only and
/// carries no scoring semantics.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BallId(String);

impl BallId {
    /// Generate a new time-ordered id (UUID v7).
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    /// Wrap an existing id string.
    pub fn parse(s: &str) -> Result<Self, TypeError> {
        if s.is_empty() {
            return Err(TypeError::EmptyId);
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((idx, _)) => &self.0[..idx],
            None => &self.0,
        }
    }
}

impl Default for BallId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BallId({})", self.short_id())
    }
}

impl fmt::Display for BallId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Classification of a delivery.
///
/// Only `Legal` balls count toward the six-ball over. `Wide` and `NoBall`
/// are extras: they concede one automatic run on top of any runs scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BallKind {
    #[serde(rename = "NORMAL")]
    Legal,
    #[serde(rename = "WIDE")]
    Wide,
    #[serde(rename = "NO_BALL")]
    NoBall,
}

impl BallKind {
    pub const ALL: [BallKind; 3] = [BallKind::Legal, BallKind::Wide, BallKind::NoBall];

    pub fn is_legal(&self) -> bool {
        matches!(self, Self::Legal)
    }

    pub fn is_extra(&self) -> bool {
        !self.is_legal()
    }

    /// Persisted label, identical to the serde representation.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Legal => "NORMAL",
            Self::Wide => "WIDE",
            Self::NoBall => "NO_BALL",
        }
    }

    /// Automatic runs conceded by the delivery itself.
    pub fn penalty_runs(&self) -> u32 {
        if self.is_extra() {
            1
        } else {
            0
        }
    }
}

impl fmt::Display for BallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BallKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "legal" | "normal" => Ok(Self::Legal),
            "wide" | "wd" => Ok(Self::Wide),
            "no-ball" | "no_ball" | "noball" | "nb" => Ok(Self::NoBall),
            _ => Err(TypeError::UnknownKind(s.to_string())),
        }
    }
}

/// One bowled delivery. Immutable once recorded.
///
/// `runs` counts runs scored off the ball, excluding the automatic extra
/// run of a wide or no-ball. `is_wicket` is independent of `kind` and
/// `runs`: any combination is accepted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallEvent {
    pub id: BallId,
    pub runs: u32,
    #[serde(rename = "type")]
    pub kind: BallKind,
    #[serde(rename = "isWicket")]
    pub is_wicket: bool,
    #[serde(rename = "timestamp")]
    pub recorded_at: RecordedAt,
}

impl BallEvent {
    /// Record a new ball with a fresh id and the current time.
    pub fn new(runs: u32, kind: BallKind, is_wicket: bool) -> Self {
        Self {
            id: BallId::new(),
            runs,
            kind,
            is_wicket,
            recorded_at: RecordedAt::now(),
        }
    }

    pub fn legal(runs: u32) -> Self {
        Self::new(runs, BallKind::Legal, false)
    }

    pub fn wide(runs: u32) -> Self {
        Self::new(runs, BallKind::Wide, false)
    }

    pub fn no_ball(runs: u32) -> Self {
        Self::new(runs, BallKind::NoBall, false)
    }

    /// A legal dot ball that takes a wicket.
    pub fn wicket() -> Self {
        Self::new(0, BallKind::Legal, true)
    }

    pub fn is_legal(&self) -> bool {
        self.kind.is_legal()
    }

    /// Runs added to the team total, including the extra-run penalty.
    /// Saturates at `u32::MAX`.
    pub fn total_runs(&self) -> u32 {
        self.runs.saturating_add(self.kind.penalty_runs())
    }

    pub fn is_boundary(&self) -> bool {
        self.runs == 4 || self.runs == 6
    }
}
