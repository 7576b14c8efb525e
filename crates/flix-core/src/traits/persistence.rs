//! Persistence backend trait.

use futures_core::Stream;

use crate::Result;

/// A value under `key` was changed by another context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    /// The key that changed.
    pub key: String,
}

/// Stream of storage events from other contexts.
pub trait StorageEvents: Stream<Item = StorageEvent> + Send {}

impl<T> StorageEvents for T where T: Stream<Item = StorageEvent> + Send {}

/// An origin-scoped key-value store shared by every context.
///
/// Reads and writes are whole-value: there is no partial update and no
/// transaction spanning a read and a later write. Concurrent writers race
/// and the last write wins.
pub trait Persistence: Send + Sync {
    /// Event stream type for this backend.
    type Events: StorageEvents;

    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete the value stored under `key`; deleting a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Subscribe to changes made by other contexts.
    ///
    /// Writes made through this handle are not reported back to it.
    fn events(&self) -> Result<Self::Events>;
}
