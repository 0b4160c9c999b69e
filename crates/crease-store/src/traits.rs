use std::sync::Arc;

use crate::error::StoreResult;

/// Byte-oriented key-value store.
///
/// All implementations must satisfy these invariants:
/// - `write` replaces any previous value for the key in full.
/// - `read` of a key never written returns `Ok(None)`.
/// - The store never interprets value contents.
/// - All I/O errors are propagated, never silently ignored.
pub trait StateStore: Send + Sync {
    /// Read the value stored under `key`.
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Store `value` under `key`, replacing any previous value.
    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()>;

    /// Remove `key`. Returns `true` if a value existed.
    fn delete(&self, key: &str) -> StoreResult<bool>;

    /// Check whether a value exists under `key`.
    fn exists(&self, key: &str) -> StoreResult<bool> {
        Ok(self.read(key)?.is_some())
    }
}

impl<S: StateStore + ?Sized> StateStore for Arc<S> {
    fn read(&self, key: &str) -> StoreResult<Option<Vec<u8>>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &[u8]) -> StoreResult<()> {
        (**self).write(key, value)
    }

    fn delete(&self, key: &str) -> StoreResult<bool> {
        (**self).delete(key)
    }
}
