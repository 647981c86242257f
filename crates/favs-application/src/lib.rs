//! Application layer for favs.
//!
//! Hosts the [`FavoritesStore`], the single shared owner of the current
//! identity's favorites, and its wiring from configuration.

pub mod bootstrap;
pub mod favorites_store;
pub mod testing;

pub use bootstrap::build_store;
pub use favorites_store::{FavoritesSnapshot, FavoritesStore, StoreStatus, ToggleOutcome};
