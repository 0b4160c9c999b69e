//! Tactical insight generation for Crease.
//!
//! An insight is one short sentence of captaincy advice produced by an
//! external text generator from the ball log. The call is slow and
//! fallible, so everything here is built around never letting it hurt the
//! scorer:
//!
//! - [`InsightProvider`] is the async seam to the generator
//! - [`GenerativeInsightClient`] talks to a `generateContent` HTTP endpoint
//! - [`MatchAnalyst`] gates requests, bounds them with a timeout, and
//!   substitutes a fixed sentence on failure
//! - [`InsightSlot`] holds the latest sentence and applies the staleness
//!   policy; it never touches the ledger
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//! use crease_insight::{InsightConfig, MatchAnalyst, StaticInsightProvider};
//! use crease_ledger::LedgerSnapshot;
//!
//! let analyst = MatchAnalyst::new(
//!     Arc::new(StaticInsightProvider::new("Attack the stumps.")),
//!     InsightConfig::default(),
//! );
//! assert!(!analyst.can_request(LedgerSnapshot::empty().len()));
//! ```

pub mod analyst;
pub mod config;
pub mod error;
pub mod http;
pub mod prompt;
pub mod provider;

pub use analyst::{
    Insight, InsightOutcome, InsightSlot, InsightSource, InsightTask, MatchAnalyst, SlotUpdate,
    EMPTY_REPLY_FALLBACK, FAILURE_FALLBACK,
};
pub use config::InsightConfig;
pub use error::{InsightError, InsightResult};
pub use http::GenerativeInsightClient;
pub use prompt::{build_prompt, history_line};
pub use provider::{InsightProvider, InsightRequest, ScriptedInsightProvider, StaticInsightProvider};
