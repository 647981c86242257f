//! Test doubles for code driving a [`FavoritesStore`](crate::FavoritesStore).

use favs_core::error::{FavsError, Result};
use favs_core::favorite::{FavoriteCollection, FavoritesRepository, Identity};
use favs_core::notice::{Notice, Notifier};
use std::sync::{Mutex, PoisonError};

/// Notifier that keeps every notice it receives.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<Notice>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// All notices so far, oldest first.
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last(&self) -> Option<Notice> {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        self.notices
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }
}

/// Repository whose every read and write fails, like a full or revoked
/// storage backend.
#[derive(Debug, Default)]
pub struct FailingRepository;

impl FailingRepository {
    pub fn new() -> Self {
        Self
    }
}

impl FavoritesRepository for FailingRepository {
    fn load(&self, identity: &Identity) -> Result<Option<FavoriteCollection>> {
        Err(FavsError::storage(format!(
            "Storage unavailable for {}",
            identity.storage_key()
        )))
    }

    fn save(&self, identity: &Identity, _collection: &FavoriteCollection) -> Result<()> {
        Err(FavsError::storage(format!(
            "Quota exceeded for {}",
            identity.storage_key()
        )))
    }
}
