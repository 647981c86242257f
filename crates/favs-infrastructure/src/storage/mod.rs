//! Key-value storage backends.

mod file_store;
mod memory_store;

pub use file_store::FileKeyValueStore;
pub use memory_store::InMemoryKeyValueStore;

use favs_core::config::{FavsConfig, StorageBackend};
use favs_core::error::Result;
use favs_core::storage::KeyValueStore;
use std::sync::Arc;

use crate::paths::FavsPaths;

/// Builds the key-value store selected by `config`.
///
/// The file backend uses the configured directory, or the default storage
/// directory when none is set.
pub fn open_store(config: &FavsConfig) -> Result<Arc<dyn KeyValueStore>> {
    match config.storage.backend {
        StorageBackend::Memory => Ok(Arc::new(InMemoryKeyValueStore::new())),
        StorageBackend::File => {
            let dir = match &config.storage.directory {
                Some(dir) => dir.clone(),
                None => FavsPaths::storage_dir()?,
            };
            tracing::debug!(dir = %dir.display(), "Opening file key-value store");
            Ok(Arc::new(FileKeyValueStore::new(dir)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_memory_store() {
        let mut config = FavsConfig::default();
        config.storage.backend = StorageBackend::Memory;

        let store = open_store(&config).unwrap();
        store.set_item("k", "v").unwrap();
        assert_eq!(store.get_item("k").unwrap(), Some("v".to_string()));
    }

    #[test]
    fn test_open_file_store_in_configured_dir() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = FavsConfig::default();
        config.storage.directory = Some(temp_dir.path().to_path_buf());

        let store = open_store(&config).unwrap();
        store.set_item("favorites_u1", "{}").unwrap();
        assert!(temp_dir.path().join("favorites_u1.json").exists());
    }
}
