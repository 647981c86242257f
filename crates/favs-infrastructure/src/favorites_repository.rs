//! Favorites repository over a key-value store.
//!
//! Each identity's collection is one versioned JSON blob stored under
//! `favorites_<partition>`. Blobs written by the browser client carry no
//! version and are read as the legacy schema.

use favs_core::error::{FavsError, Result};
use favs_core::favorite::{FavoriteCollection, FavoritesRepository, Identity};
use favs_core::storage::KeyValueStore;
use std::sync::Arc;
use version_migrate::Migrator;

use crate::dto::{FAVORITES_ENTITY, assume_legacy_version, create_favorites_migrator};

/// Key-value backed favorites repository with version migration support.
pub struct KeyValueFavoritesRepository {
    store: Arc<dyn KeyValueStore>,
    migrator: Migrator,
}

impl KeyValueFavoritesRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            migrator: create_favorites_migrator(),
        }
    }

    /// Parses and migrates one raw blob.
    fn decode(&self, raw: &str) -> Result<FavoriteCollection> {
        let mut value: serde_json::Value = serde_json::from_str(raw)?;
        assume_legacy_version(&mut value);

        self.migrator
            .load_flat_from(FAVORITES_ENTITY, value)
            .map_err(FavsError::from)
    }
}

impl FavoritesRepository for KeyValueFavoritesRepository {
    fn load(&self, identity: &Identity) -> Result<Option<FavoriteCollection>> {
        let key = identity.storage_key();
        let Some(raw) = self.store.get_item(&key)? else {
            tracing::debug!(%key, "No persisted favorites");
            return Ok(None);
        };

        let collection = self.decode(&raw)?;
        tracing::debug!(%key, total = collection.total_count(), "Loaded favorites");
        Ok(Some(collection))
    }

    fn save(&self, identity: &Identity, collection: &FavoriteCollection) -> Result<()> {
        let key = identity.storage_key();

        // Serialize using migrator (includes version info)
        let serialized = self
            .migrator
            .save_domain_flat(FAVORITES_ENTITY, collection)
            .map_err(|e| FavsError::Serialization {
                format: "JSON".to_string(),
                message: format!("Failed to serialize favorites: {}", e),
            })?;

        self.store.set_item(&key, &serialized)?;
        tracing::debug!(%key, total = collection.total_count(), "Saved favorites");
        Ok(())
    }
}
