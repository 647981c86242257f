use anyhow::{Context, Result, bail};
use favs_application::{FavoritesStore, ToggleOutcome};
use favs_core::favorite::Bucket;
use serde_json::{Map, Value};
use std::io::Read;

/// Builds the entity from `--json` (or stdin for `-`), or from `--id`/`--title`.
pub fn read_entity(json: Option<&str>, id: Option<String>, title: Option<String>) -> Result<Value> {
    if let Some(json) = json {
        let text = if json == "-" {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("Failed to read entity from stdin")?;
            buffer
        } else {
            json.to_string()
        };
        return serde_json::from_str(&text).context("Entity is not valid JSON");
    }

    let Some(id) = id else {
        bail!("Provide the entity with --json or --id");
    };
    let mut fields = Map::new();
    fields.insert("id".to_string(), Value::String(id));
    if let Some(title) = title {
        fields.insert("title".to_string(), Value::String(title));
    }
    Ok(Value::Object(fields))
}

/// Toggles `entity` in `bucket`; the caller decides what a rejection means.
pub fn run(store: &FavoritesStore, bucket: Bucket, entity: &Value, raw: bool) -> ToggleOutcome {
    let outcome = if raw {
        store.toggle_entity(bucket, entity)
    } else {
        match bucket {
            Bucket::Sessions => store.toggle_session_favorite(entity),
            Bucket::Products => store.toggle_product_favorite(entity),
            Bucket::Professionals => store.toggle_professional_favorite(entity),
            Bucket::Events => store.toggle_event_favorite(entity),
        }
    };
    tracing::debug!(%bucket, ?outcome, "Toggle finished");
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use favs_application::testing::RecordingNotifier;
    use favs_core::favorite::Identity;
    use favs_infrastructure::{InMemoryKeyValueStore, KeyValueFavoritesRepository};
    use serde_json::json;
    use std::sync::Arc;

    fn memory_store() -> FavoritesStore {
        let repository =
            KeyValueFavoritesRepository::new(Arc::new(InMemoryKeyValueStore::new()));
        FavoritesStore::new(Arc::new(repository), Arc::new(RecordingNotifier::new()))
    }

    #[test]
    fn test_rejected_toggle_is_returned() {
        let store = memory_store();
        let entity = json!({"id": "e1", "title": "Retreat"});

        assert_eq!(
            run(&store, Bucket::Events, &entity, false),
            ToggleOutcome::Rejected
        );

        store.sign_in(Identity::User("u1".to_string()));
        assert_eq!(
            run(&store, Bucket::Events, &entity, false),
            ToggleOutcome::Added
        );
        assert_eq!(
            run(&store, Bucket::Events, &entity, true),
            ToggleOutcome::Removed
        );
    }

    #[test]
    fn test_entity_from_flags() {
        let entity = read_entity(None, Some("p1".to_string()), Some("Huile".to_string())).unwrap();
        assert_eq!(entity, json!({"id": "p1", "title": "Huile"}));
    }

    #[test]
    fn test_entity_from_json() {
        let entity = read_entity(Some(r#"{"_id": "e1", "date": "2026-11-02"}"#), None, None).unwrap();
        assert_eq!(entity["_id"], json!("e1"));
    }

    #[test]
    fn test_entity_requires_id() {
        assert!(read_entity(None, None, Some("Huile".to_string())).is_err());
        assert!(read_entity(Some("{oops"), None, None).is_err());
    }
}
