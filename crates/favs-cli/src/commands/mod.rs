pub mod clear;
pub mod config;
pub mod query;
pub mod toggle;

use anyhow::{Context, Result};
use favs_application::{FavoritesStore, build_store};
use favs_core::config::{FavsConfig, StorageBackend};
use favs_core::notice::Notifier;
use favs_infrastructure::{ConfigService, TracingNotifier};
use std::sync::Arc;

use crate::GlobalArgs;
use crate::console::ConsoleNotifier;

fn config_service(global: &GlobalArgs) -> ConfigService {
    match &global.config {
        Some(path) => ConfigService::with_path(path.clone()),
        None => ConfigService::new(),
    }
}

/// Loads the configuration and applies command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<FavsConfig> {
    let mut config = config_service(global).get_config();

    if let Some(dir) = &global.storage_dir {
        config.storage.backend = StorageBackend::File;
        config.storage.directory = Some(dir.clone());
    }

    Ok(config)
}

/// Terminal notices, or log lines with `--quiet`.
fn notifier(quiet: bool) -> Arc<dyn Notifier> {
    if quiet {
        Arc::new(TracingNotifier)
    } else {
        Arc::new(ConsoleNotifier)
    }
}

/// Builds the store and signs in the requested identity.
pub fn open_store(config: &FavsConfig, global: &GlobalArgs) -> Result<FavoritesStore> {
    let store = build_store(config, notifier(global.quiet))
        .context("Failed to open favorites storage")?;

    if let Some(identity) = global.identity() {
        store.sign_in(identity);
    }

    Ok(store)
}
