//! Storage ports.
//!
//! [`KeyValueStore`] is the durable string store used for the credential,
//! knowledge-base caches and history. [`DocumentStore`] serves the fixed,
//! named reference documents. Both are injected; only the composition root
//! decides which backend is used.

use async_trait::async_trait;

use crate::error::{DocumentError, StorageError};

/// Durable keyed storage: get/set/remove of serialized strings.
///
/// Calls are synchronous; a process uses a single logical writer per key.
pub trait KeyValueStore: Send + Sync {
    /// The backend name (e.g. "file", "in_memory").
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> std::result::Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> std::result::Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> std::result::Result<(), StorageError>;
}

/// Static store of named binary reference documents.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch a document's raw bytes by relative name.
    async fn fetch(&self, name: &str) -> std::result::Result<Vec<u8>, DocumentError>;
}
