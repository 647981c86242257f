//! Configuration service implementation.
//!
//! Loads the runtime configuration from `~/.config/favs/config.toml` (or an
//! explicit path) and caches it.

use crate::dto::create_config_migrator;
use crate::paths::FavsPaths;
use favs_core::config::FavsConfig;
use favs_core::error::{FavsError, Result};
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use version_migrate::{FileStorage, FileStorageStrategy, FormatStrategy, LoadBehavior};

/// Configuration service that loads and caches the configuration.
///
/// A missing file is created with default values on first load. A file that
/// cannot be read or migrated falls back to defaults with a warning.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config file; `None` means the platform default path.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<FavsConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the default config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path` (for the CLI `--config` flag and tests).
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            path: Some(path),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the configuration, loading from file if not cached.
    pub fn get_config(&self) -> FavsConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = self.load_config().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to load config, using defaults");
            FavsConfig::default()
        });

        {
            let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Persists `config` and refreshes the cache.
    pub fn save_config(&self, config: FavsConfig) -> Result<()> {
        let mut storage = self.open_storage()?;
        storage.update_and_save("config", vec![config.clone()])?;

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(config);
        Ok(())
    }

    /// Loads FavsConfig from the config file using FileStorage.
    fn load_config(&self) -> Result<FavsConfig> {
        let mut storage = self.open_storage()?;

        let configs: Vec<FavsConfig> = storage.query("config")?;

        match configs.into_iter().next() {
            Some(config) => Ok(config),
            None => {
                let default_config = FavsConfig::default();
                storage.update_and_save("config", vec![default_config.clone()])?;
                tracing::info!("Created default configuration");
                Ok(default_config)
            }
        }
    }

    fn open_storage(&self) -> Result<FileStorage> {
        let config_path = self.config_path()?;

        let migrator = create_config_migrator();
        let strategy = FileStorageStrategy::new()
            .with_format(FormatStrategy::Toml)
            .with_load_behavior(LoadBehavior::CreateIfMissing);

        FileStorage::new(config_path, migrator, strategy)
            .map_err(|e| FavsError::config(format!("Failed to create FileStorage: {}", e)))
    }

    fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => FavsPaths::config_file(),
        }
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}
