//! Foundation types for the Crease innings scorer.
//!
//! This crate provides the identity, temporal, and ball-level types used
//! throughout Crease. Every other Crease crate depends on `crease-types`.
//!
//! # Key Types
//!
//! - [`BallEvent`]: One bowled delivery, immutable once recorded
//! - [`BallKind`]: `Legal`, `Wide`, or `NoBall` classification
//! - [`BallId`]: Opaque, stable identifier for a recorded ball
//! - [`RecordedAt`]: Advisory wall-clock timestamp (milliseconds since epoch)
//! - [`BallTone`]: Display classification used by renderers

pub mod ball;
pub mod error;
pub mod notation;
pub mod temporal;

pub use ball::{BallEvent, BallId, BallKind};
pub use error::TypeError;
pub use notation::BallTone;
pub use temporal::RecordedAt;
