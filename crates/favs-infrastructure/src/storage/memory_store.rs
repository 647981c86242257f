//! In-memory key-value store.

use favs_core::error::Result;
use favs_core::storage::KeyValueStore;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Key-value store kept in process memory.
///
/// Clones share the same map, so a test can hand one clone to a repository
/// and inspect the raw values through another.
#[derive(Debug, Clone, Default)]
pub struct InMemoryKeyValueStore {
    items: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for InMemoryKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        Ok(items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let mut items = self.items.write().unwrap_or_else(PoisonError::into_inner);
        items.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>> {
        let items = self.items.read().unwrap_or_else(PoisonError::into_inner);
        let mut keys: Vec<String> = items.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let store = InMemoryKeyValueStore::new();
        assert_eq!(store.get_item("favorites_u1").unwrap(), None);

        store.set_item("favorites_u1", "{}").unwrap();
        assert_eq!(store.get_item("favorites_u1").unwrap(), Some("{}".to_string()));

        store.remove_item("favorites_u1").unwrap();
        store.remove_item("favorites_u1").unwrap();
        assert_eq!(store.get_item("favorites_u1").unwrap(), None);
    }

    #[test]
    fn test_clones_share_items() {
        let store = InMemoryKeyValueStore::new();
        let other = store.clone();
        store.set_item("b", "2").unwrap();
        store.set_item("a", "1").unwrap();

        assert_eq!(other.keys().unwrap(), vec!["a".to_string(), "b".to_string()]);
    }
}
