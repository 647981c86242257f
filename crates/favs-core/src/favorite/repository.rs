//! Favorites repository trait.

use super::identity::Identity;
use super::model::FavoriteCollection;
use crate::error::Result;

/// Durable tier of the favorites cache.
///
/// Each identity owns exactly one persisted collection, written as a whole.
pub trait FavoritesRepository: Send + Sync {
    /// Loads the persisted collection of `identity`.
    /// Returns `Ok(None)` if nothing was ever saved for it.
    fn load(&self, identity: &Identity) -> Result<Option<FavoriteCollection>>;

    /// Replaces the persisted collection of `identity`.
    fn save(&self, identity: &Identity, collection: &FavoriteCollection) -> Result<()>;
}
