//! Scoring session for Crease.
//!
//! Ties the ledger, persistence, derivation, and the outside collaborators
//! (haptics, insight generation) into the action surface a scorer drives.
//! This is the main entry point for applications embedding Crease.

pub mod config;
pub mod error;
pub mod guard;
pub mod haptics;
pub mod scorer;
pub mod session;
pub mod timer;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use guard::{GuardState, PressOutcome, ResetGuard};
pub use haptics::{HapticClass, HapticFeedback, NoopHaptics, RecordingHaptics, TerminalBell};
pub use scorer::Scorer;
pub use session::{InsightRequestState, ResetPress, ScoringSession, SessionEvent};
pub use timer::DeadlineTimer;

// Re-export key types
pub use crease_ledger::{DerivedView, LedgerSnapshot, OverGroup};
pub use crease_store::LoadOutcome;
pub use crease_types::{BallEvent, BallKind};
