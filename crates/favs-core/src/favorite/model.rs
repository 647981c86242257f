//! Favorites domain models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

use super::bucket::Bucket;
use crate::error::{FavsError, Result};

/// A denormalized snapshot of a liked entity.
///
/// Only `id` and `title` are guaranteed. Everything else the entity carried
/// at favorite time (price, images, dates, location...) is kept verbatim in
/// `attributes` and never refreshed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteItem {
    /// Stable identifier of the underlying entity.
    pub id: String,
    /// Display title of the entity.
    #[serde(default)]
    pub title: String,
    /// When the snapshot was taken. `None` for items written before this was tracked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    /// Free-form copy of the remaining entity fields.
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl FavoriteItem {
    /// Creates an item with no extra attributes.
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            saved_at: None,
            attributes: Map::new(),
        }
    }

    /// Adds or replaces one attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Sets the snapshot timestamp.
    pub fn with_saved_at(mut self, saved_at: DateTime<Utc>) -> Self {
        self.saved_at = Some(saved_at);
        self
    }

    /// Returns one attribute by name.
    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Normalizes a raw entity into a favorite item.
    ///
    /// Every supplied field is shallow-copied. The id comes from `id`, or
    /// from `_id` for document-store entities; numeric ids are accepted and
    /// rendered as strings. The title falls back to `name`, then to an empty
    /// string.
    ///
    /// # Errors
    ///
    /// Returns `FavsError::Validation` when the value is not an object or
    /// carries no usable id.
    pub fn normalize(value: Value) -> Result<Self> {
        let Value::Object(mut fields) = value else {
            return Err(FavsError::validation("favorite entity must be a JSON object"));
        };

        let id = match fields.remove("id") {
            Some(raw) => id_from_value(&raw),
            None => None,
        }
        .or_else(|| fields.get("_id").and_then(id_from_value))
        .ok_or_else(|| FavsError::validation("favorite entity has no `id` or `_id`"))?;

        let title = match fields.remove("title") {
            Some(Value::String(title)) => title,
            Some(other) if !other.is_null() => other.to_string(),
            _ => fields
                .get("name")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
        };

        let saved_at = fields
            .remove("savedAt")
            .and_then(|raw| raw.as_str().map(str::to_owned))
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|parsed| parsed.with_timezone(&Utc));

        Ok(Self {
            id,
            title,
            saved_at,
            attributes: fields,
        })
    }
}

fn id_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Result of toggling one item in a collection.
#[derive(Debug, Clone, PartialEq)]
pub enum Transition {
    /// The item was absent and has been appended.
    Added,
    /// An item with the same id was present and has been removed.
    Removed(FavoriteItem),
}

/// The favorites of one identity, split into four ordered buckets.
///
/// Insertion order is preserved within each bucket (most recently added
/// last). A bucket holds at most one item per id; [`FavoriteCollection::toggle`]
/// is the only way to add items and it checks this with a linear scan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FavoriteCollection {
    #[serde(default)]
    pub sessions: Vec<FavoriteItem>,
    #[serde(default)]
    pub products: Vec<FavoriteItem>,
    #[serde(default)]
    pub professionals: Vec<FavoriteItem>,
    #[serde(default)]
    pub events: Vec<FavoriteItem>,
}

impl FavoriteCollection {
    /// Creates a collection with four empty buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the items of one bucket in insertion order.
    pub fn bucket(&self, bucket: Bucket) -> &[FavoriteItem] {
        match bucket {
            Bucket::Sessions => &self.sessions,
            Bucket::Products => &self.products,
            Bucket::Professionals => &self.professionals,
            Bucket::Events => &self.events,
        }
    }

    fn bucket_mut(&mut self, bucket: Bucket) -> &mut Vec<FavoriteItem> {
        match bucket {
            Bucket::Sessions => &mut self.sessions,
            Bucket::Products => &mut self.products,
            Bucket::Professionals => &mut self.professionals,
            Bucket::Events => &mut self.events,
        }
    }

    /// Returns true iff an item with `id` exists in `bucket`.
    pub fn contains(&self, bucket: Bucket, id: &str) -> bool {
        self.bucket(bucket).iter().any(|item| item.id == id)
    }

    /// Adds `item` to `bucket` if no item with its id is present, otherwise
    /// removes the present one.
    pub fn toggle(&mut self, bucket: Bucket, item: FavoriteItem) -> Transition {
        let items = self.bucket_mut(bucket);
        match items.iter().position(|existing| existing.id == item.id) {
            Some(index) => Transition::Removed(items.remove(index)),
            None => {
                items.push(item);
                Transition::Added
            }
        }
    }

    /// Empties one bucket and returns how many items it held.
    pub fn clear(&mut self, bucket: Bucket) -> usize {
        let items = self.bucket_mut(bucket);
        let removed = items.len();
        items.clear();
        removed
    }

    /// Empties every bucket.
    pub fn clear_all(&mut self) {
        *self = Self::default();
    }

    /// Number of items in one bucket.
    pub fn count(&self, bucket: Bucket) -> usize {
        self.bucket(bucket).len()
    }

    /// Number of items across all buckets.
    pub fn total_count(&self) -> usize {
        Bucket::all().map(|bucket| self.count(bucket)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total_count() == 0
    }

    /// Drops items whose id already appeared earlier in the same bucket.
    ///
    /// Returns the number of items dropped.
    pub fn dedupe(&mut self) -> usize {
        let mut dropped = 0;
        for bucket in Bucket::all() {
            let items = self.bucket_mut(bucket);
            let before = items.len();
            let mut seen = HashSet::new();
            items.retain(|item| seen.insert(item.id.clone()));
            dropped += before - items.len();
        }
        dropped
    }
}
