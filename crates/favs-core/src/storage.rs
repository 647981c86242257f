//! Key-value storage substrate.
//!
//! The durable tier is a flat string-to-string store, the same shape as a
//! browser's local storage. Values are opaque to the substrate.

use crate::error::Result;

/// A synchronous, persistent key-value store.
pub trait KeyValueStore: Send + Sync {
    /// Returns the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Stores `value` under `key`, replacing any previous value in one write.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Removes `key`. Removing a missing key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;

    /// Lists every stored key.
    fn keys(&self) -> Result<Vec<String>>;
}
