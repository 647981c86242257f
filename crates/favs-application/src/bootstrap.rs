//! Wiring of a [`FavoritesStore`] from configuration.

use crate::favorites_store::FavoritesStore;
use favs_core::config::FavsConfig;
use favs_core::error::Result;
use favs_core::notice::{NoopNotifier, Notifier};
use favs_infrastructure::{KeyValueFavoritesRepository, open_store};
use std::sync::Arc;

/// Builds an unauthenticated store over the configured storage backend.
///
/// `notifier` receives the store's notices unless notifications are
/// disabled in `config`, in which case they are dropped.
pub fn build_store(config: &FavsConfig, notifier: Arc<dyn Notifier>) -> Result<FavoritesStore> {
    let store = open_store(config)?;
    let repository = Arc::new(KeyValueFavoritesRepository::new(store));

    let notifier: Arc<dyn Notifier> = if config.notifications.enabled {
        notifier
    } else {
        tracing::debug!("Notifications disabled");
        Arc::new(NoopNotifier)
    };

    Ok(FavoritesStore::new(repository, notifier))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingNotifier;
    use favs_core::config::StorageBackend;
    use favs_core::favorite::{Bucket, FavoriteItem, Identity};
    use tempfile::TempDir;

    #[test]
    fn test_build_file_backed_store() {
        let temp_dir = TempDir::new().unwrap();
        let mut config = FavsConfig::default();
        config.storage.directory = Some(temp_dir.path().to_path_buf());

        let store = build_store(&config, Arc::new(RecordingNotifier::new())).unwrap();
        store.sign_in(Identity::User("u1".to_string()));
        store.toggle(Bucket::Products, FavoriteItem::new("p1", "Huile"));

        assert!(temp_dir.path().join("favorites_u1.json").exists());
    }

    #[test]
    fn test_disabled_notifications_are_dropped() {
        let mut config = FavsConfig::default();
        config.storage.backend = StorageBackend::Memory;
        config.notifications.enabled = false;

        let notifier = Arc::new(RecordingNotifier::new());
        let store = build_store(&config, notifier.clone()).unwrap();
        store.toggle(Bucket::Events, FavoriteItem::new("e1", "Retreat"));

        assert!(notifier.notices().is_empty());
    }
}
