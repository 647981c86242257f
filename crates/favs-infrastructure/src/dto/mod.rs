//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schema of everything favs writes to
//! disk. They are private to the infrastructure layer and handle the
//! evolution of the storage format over time.
//!
//! ### FavoriteCollection Version History
//! - **1.0.0**: Legacy browser layout (no `version` field on disk)
//! - **1.1.0**: Added per-item `savedAt`
//!
//! ### FavsConfig Version History
//! - **1.0.0**: Initial schema

mod config;
mod favorites;

// Re-export config DTOs and migrator
pub use config::{FavsConfigV1_0_0, create_config_migrator};

// Re-export favorites DTOs and migrator
pub use favorites::{
    FAVORITES_ENTITY, FavoriteCollectionV1_0_0, FavoriteCollectionV1_1_0,
    FavoriteItemV1_0_0, FavoriteItemV1_1_0, LEGACY_FAVORITES_VERSION, assume_legacy_version,
    create_favorites_migrator,
};
