//! Unified path management for favs files.
//!
//! All paths are resolved via AppPaths from the version-migrate crate, so
//! they follow the platform conventions (XDG on Linux, etc.).

use favs_core::error::{FavsError, Result};
use std::path::PathBuf;
use version_migrate::AppPaths;

/// Unified path management for favs.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/favs/              # Config directory
/// └── config.toml              # Runtime configuration
///
/// ~/.local/share/favs/         # Data directory
/// └── storage/                 # File key-value store
///     └── favorites_<user>.json
/// ```
pub struct FavsPaths;

impl FavsPaths {
    fn app_paths() -> AppPaths {
        AppPaths::new("favs")
    }

    /// Returns the favs configuration directory (e.g. `~/.config/favs/`).
    pub fn config_dir() -> Result<PathBuf> {
        Self::app_paths()
            .config_dir()
            .map_err(|_| FavsError::config("Cannot find home directory"))
    }

    /// Returns the favs data directory (e.g. `~/.local/share/favs/`).
    pub fn data_dir() -> Result<PathBuf> {
        Self::app_paths()
            .data_dir()
            .map_err(|_| FavsError::config("Cannot find home directory"))
    }

    /// Returns the path to the configuration file.
    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the default directory of the file key-value store.
    pub fn storage_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("storage"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_file() {
        let config_file = FavsPaths::config_file().unwrap();
        assert!(config_file.ends_with("config.toml"));
        let config_dir = FavsPaths::config_dir().unwrap();
        assert!(config_file.starts_with(&config_dir));
    }

    #[test]
    fn test_storage_dir() {
        let storage_dir = FavsPaths::storage_dir().unwrap();
        assert!(storage_dir.ends_with("storage"));
        let data_dir = FavsPaths::data_dir().unwrap();
        assert!(storage_dir.starts_with(&data_dir));
    }
}
