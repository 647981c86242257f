//! FavoriteCollection DTOs and migrations
//!
//! ## Version History
//! - **1.0.0**: Legacy browser layout. Four buckets of free-form items with
//!   `id` and `title`. Blobs written by the browser carry no `version` field.
//! - **1.1.0**: Items may carry `savedAt`, the time the snapshot was taken.
//!
//! Buckets are read item by item with the same normalization as new
//! favorites (numeric ids become strings, a null title counts as missing).
//! An item that still cannot be read is dropped with a warning; the rest of
//! the collection loads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use version_migrate::{FromDomain, IntoDomain, MigratesTo, Versioned};

use favs_core::favorite::{FavoriteCollection, FavoriteItem};

/// Version assumed for blobs that have no `version` field.
pub const LEGACY_FAVORITES_VERSION: &str = "1.0.0";

/// Entity name used with the migrator.
pub const FAVORITES_ENTITY: &str = "favorites";

// ============================================================================
// V1.0.0 (legacy)
// ============================================================================

/// Favorite item DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteItemV1_0_0 {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Favorite collection DTO V1.0.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct FavoriteCollectionV1_0_0 {
    #[serde(default, deserialize_with = "lenient_items")]
    pub sessions: Vec<FavoriteItemV1_0_0>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub products: Vec<FavoriteItemV1_0_0>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub professionals: Vec<FavoriteItemV1_0_0>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub events: Vec<FavoriteItemV1_0_0>,
}

// ============================================================================
// V1.1.0
// ============================================================================

/// Favorite item DTO V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItemV1_1_0 {
    pub id: String,
    #[serde(default)]
    pub title: String,
    /// Snapshot time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

/// Favorite collection DTO V1.1.0
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.1.0")]
pub struct FavoriteCollectionV1_1_0 {
    #[serde(default, deserialize_with = "lenient_items")]
    pub sessions: Vec<FavoriteItemV1_1_0>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub products: Vec<FavoriteItemV1_1_0>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub professionals: Vec<FavoriteItemV1_1_0>,
    #[serde(default, deserialize_with = "lenient_items")]
    pub events: Vec<FavoriteItemV1_1_0>,
}

// ============================================================================
// Lenient bucket reading
// ============================================================================

/// Reads a bucket item by item, dropping items that cannot be normalized.
///
/// A missing or null bucket reads as empty.
fn lenient_items<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: From<FavoriteItem>,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();

    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match FavoriteItem::normalize(value) {
            Ok(item) => Some(T::from(item)),
            Err(e) => {
                tracing::warn!(index, error = %e, "Dropping unreadable favorite item");
                None
            }
        })
        .collect())
}

impl From<FavoriteItem> for FavoriteItemV1_0_0 {
    fn from(item: FavoriteItem) -> Self {
        FavoriteItemV1_0_0 {
            id: item.id,
            title: item.title,
            attributes: item.attributes,
        }
    }
}

// ============================================================================
// Migration implementations
// ============================================================================

impl From<FavoriteItemV1_0_0> for FavoriteItemV1_1_0 {
    fn from(item: FavoriteItemV1_0_0) -> Self {
        FavoriteItemV1_1_0 {
            id: item.id,
            title: item.title,
            saved_at: None,
            attributes: item.attributes,
        }
    }
}

/// Migration from FavoriteCollectionV1_0_0 to FavoriteCollectionV1_1_0.
impl MigratesTo<FavoriteCollectionV1_1_0> for FavoriteCollectionV1_0_0 {
    fn migrate(self) -> FavoriteCollectionV1_1_0 {
        FavoriteCollectionV1_1_0 {
            sessions: self.sessions.into_iter().map(Into::into).collect(),
            products: self.products.into_iter().map(Into::into).collect(),
            professionals: self.professionals.into_iter().map(Into::into).collect(),
            events: self.events.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Domain model conversions
// ============================================================================

impl From<FavoriteItemV1_1_0> for FavoriteItem {
    fn from(dto: FavoriteItemV1_1_0) -> Self {
        FavoriteItem {
            id: dto.id,
            title: dto.title,
            saved_at: dto.saved_at,
            attributes: dto.attributes,
        }
    }
}

impl From<FavoriteItem> for FavoriteItemV1_1_0 {
    fn from(item: FavoriteItem) -> Self {
        FavoriteItemV1_1_0 {
            id: item.id,
            title: item.title,
            saved_at: item.saved_at,
            attributes: item.attributes,
        }
    }
}

/// Convert FavoriteCollectionV1_1_0 DTO to domain model.
impl IntoDomain<FavoriteCollection> for FavoriteCollectionV1_1_0 {
    fn into_domain(self) -> FavoriteCollection {
        FavoriteCollection {
            sessions: self.sessions.into_iter().map(Into::into).collect(),
            products: self.products.into_iter().map(Into::into).collect(),
            professionals: self.professionals.into_iter().map(Into::into).collect(),
            events: self.events.into_iter().map(Into::into).collect(),
        }
    }
}

/// Convert domain model to FavoriteCollectionV1_1_0 DTO for persistence.
impl FromDomain<FavoriteCollection> for FavoriteCollectionV1_1_0 {
    fn from_domain(collection: FavoriteCollection) -> Self {
        FavoriteCollectionV1_1_0 {
            sessions: collection.sessions.into_iter().map(Into::into).collect(),
            products: collection.products.into_iter().map(Into::into).collect(),
            professionals: collection.professionals.into_iter().map(Into::into).collect(),
            events: collection.events.into_iter().map(Into::into).collect(),
        }
    }
}

// ============================================================================
// Legacy blob handling
// ============================================================================

/// Tags an unversioned blob as the legacy version so the migrator accepts it.
///
/// Non-object values are left untouched; the migrator rejects them.
pub fn assume_legacy_version(value: &mut Value) {
    if let Value::Object(fields) = value {
        fields
            .entry("version")
            .or_insert_with(|| Value::String(LEGACY_FAVORITES_VERSION.to_string()));
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates and configures a Migrator instance for FavoriteCollection entities.
///
/// # Migration Path
///
/// - V1.0.0 → V1.1.0: Adds optional `savedAt` to every item (None)
/// - V1.1.0 → FavoriteCollection: Converts DTO to domain model
///
/// # Example
///
/// ```ignore
/// let migrator = create_favorites_migrator();
/// let collection: FavoriteCollection = migrator.load_flat_from("favorites", json_value)?;
/// ```
pub fn create_favorites_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();

    // Register migration path: V1.0.0 -> V1.1.0 -> FavoriteCollection
    let favorites_path = version_migrate::Migrator::define(FAVORITES_ENTITY)
        .from::<FavoriteCollectionV1_0_0>()
        .step::<FavoriteCollectionV1_1_0>()
        .into_with_save::<FavoriteCollection>();

    migrator
        .register(favorites_path)
        .expect("Failed to register favorites migration path");

    migrator
}

#[cfg(test)]
mod tests {
    use super::*;
    use favs_core::favorite::Bucket;
    use serde_json::json;

    #[test]
    fn test_legacy_blob_migrates_to_domain() {
        let migrator = create_favorites_migrator();

        let mut value = json!({
            "sessions": [],
            "products": [{"id": "p1", "title": "Huile", "price": 100, "currency": "MAD"}],
            "professionals": [],
            "events": [{"id": "e1", "title": "Retreat", "date": "2026-11-02"}]
        });
        assume_legacy_version(&mut value);

        let result: Result<FavoriteCollection, _> =
            migrator.load_flat_from(FAVORITES_ENTITY, value);

        assert!(result.is_ok(), "Migration failed: {:?}", result.err());
        let collection = result.unwrap();
        assert_eq!(collection.count(Bucket::Products), 1);
        assert_eq!(collection.products[0].title, "Huile");
        assert_eq!(collection.products[0].attribute("price"), Some(&json!(100)));
        assert!(collection.products[0].saved_at.is_none());
        assert!(collection.contains(Bucket::Events, "e1"));
    }

    #[test]
    fn test_missing_buckets_default_to_empty() {
        let migrator = create_favorites_migrator();

        let mut value = json!({"products": [{"id": "p1", "title": "Huile"}]});
        assume_legacy_version(&mut value);

        let collection: FavoriteCollection =
            migrator.load_flat_from(FAVORITES_ENTITY, value).unwrap();
        assert_eq!(collection.total_count(), 1);
        assert!(collection.sessions.is_empty());
    }

    #[test]
    fn test_assume_legacy_version_keeps_existing_version() {
        let mut value = json!({"version": "1.1.0", "sessions": []});
        assume_legacy_version(&mut value);
        assert_eq!(value["version"], json!("1.1.0"));

        let mut untagged = json!({"sessions": []});
        assume_legacy_version(&mut untagged);
        assert_eq!(untagged["version"], json!(LEGACY_FAVORITES_VERSION));
    }

    #[test]
    fn test_save_writes_current_version() {
        let migrator = create_favorites_migrator();

        let mut collection = FavoriteCollection::new();
        collection.toggle(
            Bucket::Sessions,
            FavoriteItem::new("s1", "Yoga")
                .with_saved_at("2026-10-18T09:00:00Z".parse().unwrap()),
        );

        let json_str = migrator
            .save_domain_flat(FAVORITES_ENTITY, &collection)
            .unwrap();

        assert!(json_str.contains("\"version\":\"1.1.0\""));
        assert!(json_str.contains("\"savedAt\""));

        let value: Value = serde_json::from_str(&json_str).unwrap();
        let restored: FavoriteCollection =
            migrator.load_flat_from(FAVORITES_ENTITY, value).unwrap();
        assert_eq!(restored, collection);
    }

    #[test]
    fn test_legacy_blob_with_mixed_items_keeps_readable_ones() {
        let migrator = create_favorites_migrator();

        let mut value = json!({
            "products": [
                {"id": "p1", "title": "Huile", "price": 100},
                {"id": 42, "title": "Savon"},
                {"id": "p2", "title": null, "name": "Argan"},
                {"title": "no id at all"},
                "not an item"
            ],
            "events": null
        });
        assume_legacy_version(&mut value);

        let collection: FavoriteCollection =
            migrator.load_flat_from(FAVORITES_ENTITY, value).unwrap();

        let ids: Vec<&str> = collection
            .products
            .iter()
            .map(|item| item.id.as_str())
            .collect();
        assert_eq!(ids, vec!["p1", "42", "p2"]);
        assert_eq!(collection.products[1].title, "Savon");
        assert_eq!(collection.products[2].title, "Argan");
        assert_eq!(collection.products[0].attribute("price"), Some(&json!(100)));
        assert!(collection.events.is_empty());
    }

    #[test]
    fn test_current_blob_with_numeric_id_loads() {
        let migrator = create_favorites_migrator();

        let value = json!({
            "version": "1.1.0",
            "sessions": [{"id": 7, "title": "Yoga", "savedAt": "2026-10-18T09:00:00Z"}]
        });

        let collection: FavoriteCollection =
            migrator.load_flat_from(FAVORITES_ENTITY, value).unwrap();
        assert_eq!(collection.sessions[0].id, "7");
        assert!(collection.sessions[0].saved_at.is_some());
    }
}
