//! Runtime configuration domain model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use strum::{Display, EnumString};
use version_migrate::DeriveQueryable as Queryable;

/// Which key-value backend holds the durable favorites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum StorageBackend {
    /// One file per key under the storage directory.
    #[default]
    File,
    /// Process memory only; nothing survives a restart.
    Memory,
}

/// Storage settings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    /// Overrides the default data directory (`~/.local/share/favs/storage`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}

/// Notification settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    /// When false, add/remove/clear notices are not emitted.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogSettings {
    /// Filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Root configuration, persisted in `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Queryable)]
#[queryable(entity = "config")]
pub struct FavsConfig {
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub notifications: NotificationSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_default_config() {
        let config = FavsConfig::default();
        assert_eq!(config.storage.backend, StorageBackend::File);
        assert!(config.storage.directory.is_none());
        assert!(config.notifications.enabled);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: FavsConfig = toml::from_str(
            r#"
[storage]
backend = "memory"
"#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(config.notifications.enabled);
        assert_eq!(config.log.level, "warn");
    }

    #[test]
    fn test_backend_from_str() {
        assert_eq!(StorageBackend::from_str("file").unwrap(), StorageBackend::File);
        assert_eq!(StorageBackend::from_str("memory").unwrap(), StorageBackend::Memory);
    }
}
