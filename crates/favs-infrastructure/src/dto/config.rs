//! Configuration DTOs and migrator.

use favs_core::config::{FavsConfig, LogSettings, NotificationSettings, StorageSettings};
use serde::{Deserialize, Serialize};
use version_migrate::{IntoDomain, Versioned};

/// Configuration schema V1.0.0.
///
/// Stored in `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct FavsConfigV1_0_0 {
    /// Storage backend and directory
    #[serde(default)]
    pub storage: StorageSettings,
    /// Notice emission
    #[serde(default)]
    pub notifications: NotificationSettings,
    /// Fallback log filter
    #[serde(default)]
    pub log: LogSettings,
}

// ============================================================================
// Domain conversions
// ============================================================================

impl IntoDomain<FavsConfig> for FavsConfigV1_0_0 {
    fn into_domain(self) -> FavsConfig {
        FavsConfig {
            storage: self.storage,
            notifications: self.notifications,
            log: self.log,
        }
    }
}

impl version_migrate::FromDomain<FavsConfig> for FavsConfigV1_0_0 {
    fn from_domain(config: FavsConfig) -> Self {
        FavsConfigV1_0_0 {
            storage: config.storage,
            notifications: config.notifications,
            log: config.log,
        }
    }
}

// ============================================================================
// Migrator
// ============================================================================

/// Creates a migrator for configuration entities.
pub fn create_config_migrator() -> version_migrate::Migrator {
    version_migrate::migrator!("config" => [FavsConfigV1_0_0, FavsConfig], save = true)
        .expect("Failed to create config migrator")
}

#[cfg(test)]
mod tests {
    use super::*;
    use favs_core::config::StorageBackend;

    #[test]
    fn test_config_migration_v1_0_to_domain() {
        let migrator = create_config_migrator();

        let toml_str = r#"
version = "1.0.0"

[storage]
backend = "memory"

[notifications]
enabled = false
"#;
        let toml_value: toml::Value = toml::from_str(toml_str).unwrap();

        let result: Result<FavsConfig, _> = migrator.load_flat_from("config", toml_value);

        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert!(!config.notifications.enabled);
        assert_eq!(config.log.level, "warn");
    }
}
