//! Persistence for Crease innings state.
//!
//! The ledger is saved as a single record under one key of a plain
//! key-value store, re-written in full after every mutation.
//!
//! # Storage Backends
//!
//! All backends implement the [`StateStore`] trait:
//!
//! - [`InMemoryStateStore`] -- `HashMap`-based store for tests and embedding
//! - [`FileStateStore`] -- one file per key inside a directory
//!
//! # Design Rules
//!
//! 1. The store never interprets values -- it is a pure key-value store.
//! 2. Writes replace the whole value; last write wins.
//! 3. A missing key is `Ok(None)`, never an error.
//! 4. Malformed stored data never fails a load; see [`InningsPersistence`].

pub mod error;
pub mod file;
pub mod memory;
pub mod persistence;
pub mod record;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use file::FileStateStore;
pub use memory::InMemoryStateStore;
pub use persistence::{InningsPersistence, LoadOutcome, DEFAULT_STORAGE_KEY};
pub use record::InningsRecord;
pub use traits::StateStore;
