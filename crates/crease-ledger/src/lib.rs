//! Append-only innings ledger for Crease.
//!
//! This crate is the heart of Crease. It provides:
//! - `LedgerWriter` / `LedgerReader` trait boundaries
//! - `InMemoryLedger`, the single source of truth for an innings
//! - The derivation engine: aggregates, over partitioning, the current-over
//!   window, and run rate, all pure functions of a ledger snapshot
//! - An incrementally maintained `ScoreTally` and a replay check against it
//! - Ledger validation for restored state (ids, timestamps)

pub mod error;
pub mod memory;
pub mod overs;
pub mod projection;
pub mod replay;
pub mod tally;
pub mod traits;
pub mod validation;

pub use error::LedgerError;
pub use memory::InMemoryLedger;
pub use overs::{
    current_over_window, partition_overs, remaining_placeholders, OverGroup, OverProgress,
    BALLS_PER_OVER,
};
pub use projection::{DerivedView, ProjectionBuilder};
pub use replay::{ReplayEngine, ReplayResult};
pub use tally::ScoreTally;
pub use traits::{LedgerReader, LedgerSnapshot, LedgerWriter};
pub use validation::{LedgerValidator, ValidationReport, Violation, ViolationKind};
