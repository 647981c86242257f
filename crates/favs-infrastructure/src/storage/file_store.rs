//! File-backed key-value store with atomic writes.
//!
//! Each key is one file (`<key>.json`) in a single directory. Writes go to a
//! uniquely named temporary file in the same directory, are fsynced, then
//! renamed over the target, so a reader sees either the old value or the new
//! one. Writers of one key are serialized by an exclusive lock on a sibling
//! `<key>.lock` file that is never deleted.
//!
//! Keys are percent-encoded into file names, so any key maps to a file
//! directly inside the base directory. Uppercase letters are encoded too:
//! keys differing only in case stay distinct on case-insensitive filesystems.

use favs_core::error::{FavsError, Result};
use favs_core::storage::KeyValueStore;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write as IoWrite};
use std::path::{Path, PathBuf};

const VALUE_EXTENSION: &str = "json";

/// Key-value store persisted as one file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_dir: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `base_dir`. The directory is created on the
    /// first write.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Returns the directory holding the value files.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Returns the file path of `key`.
    fn value_path(&self, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(FavsError::storage("Storage key must not be empty"));
        }
        Ok(self
            .base_dir
            .join(format!("{}.{}", encode_key(key), VALUE_EXTENSION)))
    }

    fn ensure_base_dir(&self) -> Result<()> {
        if !self.base_dir.exists() {
            fs::create_dir_all(&self.base_dir).map_err(|e| {
                FavsError::io(format!(
                    "Failed to create storage directory {}: {}",
                    self.base_dir.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }
}

/// Encodes every byte outside `[a-z0-9_.-]`, and a leading dot, as `%XX`.
fn encode_key(key: &str) -> String {
    let mut encoded = String::with_capacity(key.len());
    for (index, byte) in key.bytes().enumerate() {
        let plain = byte.is_ascii_lowercase()
            || byte.is_ascii_digit()
            || matches!(byte, b'_' | b'-')
            || (byte == b'.' && index > 0);
        if plain {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{:02X}", byte));
        }
    }
    encoded
}

/// Reverses [`encode_key`]. Returns `None` for names it could not have produced.
fn decode_key(name: &str) -> Option<String> {
    let bytes = name.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut index = 0;
    while index < bytes.len() {
        if bytes[index] == b'%' {
            let hex = name.get(index + 1..index + 3)?;
            decoded.push(u8::from_str_radix(hex, 16).ok()?);
            index += 3;
        } else {
            decoded.push(bytes[index]);
            index += 1;
        }
    }
    String::from_utf8(decoded).ok()
}

impl KeyValueStore for FileKeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        let path = self.value_path(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(FavsError::io(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        let path = self.value_path(key)?;
        self.ensure_base_dir()?;

        let _lock = FileLock::acquire(&path)?;

        // Unique temp file in the same directory, then atomic rename
        let mut tmp_file = tempfile::Builder::new()
            .prefix(".")
            .suffix(".tmp")
            .tempfile_in(&self.base_dir)?;
        tmp_file.write_all(value.as_bytes())?;
        tmp_file.as_file().sync_all()?;

        tmp_file.persist(&path).map_err(|e| {
            FavsError::io(format!("Failed to replace {}: {}", path.display(), e.error))
        })?;

        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        let path = self.value_path(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.base_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut keys = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(VALUE_EXTENSION) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            if stem.starts_with('.') {
                continue;
            }
            if let Some(key) = decode_key(stem) {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }
}

/// A file lock guard; the lock is released when the handle closes on drop.
///
/// The lock file stays on disk: removing it would let a waiter holding the
/// old inode and a newcomer creating a fresh file both acquire the lock.
struct FileLock {
    #[allow(dead_code)]
    file: File,
}

impl FileLock {
    /// Acquires an exclusive lock next to `path`.
    fn acquire(path: &Path) -> Result<Self> {
        let lock_path = path.with_extension("lock");

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        #[cfg(unix)]
        {
            use fs2::FileExt;
            file.lock_exclusive()
                .map_err(|e| FavsError::storage(format!("Failed to acquire lock: {}", e)))?;
        }

        Ok(FileLock { file })
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_get_missing_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage"));

        assert_eq!(store.get_item("favorites_u1").unwrap(), None);
        assert!(store.keys().unwrap().is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path().join("storage"));

        store.set_item("favorites_u1", r#"{"sessions":[]}"#).unwrap();
        store.set_item("favorites_u1", r#"{"products":[]}"#).unwrap();

        assert_eq!(
            store.get_item("favorites_u1").unwrap(),
            Some(r#"{"products":[]}"#.to_string())
        );
        assert!(temp_dir.path().join("storage/favorites_u1.json").exists());
    }

    #[test]
    fn test_keys_skip_temp_and_lock_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set_item("favorites_b", "1").unwrap();
        store.set_item("favorites_a", "2").unwrap();
        fs::write(temp_dir.path().join(".favorites_c.json.tmp"), "x").unwrap();
        fs::write(temp_dir.path().join(".tmpA1b2C3.tmp"), "x").unwrap();
        fs::write(temp_dir.path().join("favorites_d.lock"), "").unwrap();

        assert_eq!(
            store.keys().unwrap(),
            vec!["favorites_a".to_string(), "favorites_b".to_string()]
        );
    }

    #[test]
    fn test_remove_item() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set_item("favorites_u1", "{}").unwrap();
        store.remove_item("favorites_u1").unwrap();
        store.remove_item("favorites_u1").unwrap();

        assert_eq!(store.get_item("favorites_u1").unwrap(), None);
    }

    #[test]
    fn test_rejects_empty_key() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());
        assert!(store.set_item("", "x").is_err());
    }

    #[test]
    fn test_unusual_keys_stay_inside_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().join("storage");
        let store = FileKeyValueStore::new(&base);

        let keys = ["favorites_a@b.com", "../escape", "a/b", ".hidden", "with space"];
        for key in keys {
            store.set_item(key, key).unwrap();
            assert_eq!(store.get_item(key).unwrap(), Some(key.to_string()));
        }

        assert!(!temp_dir.path().join("escape.json").exists());
        let mut expected: Vec<String> = keys.iter().map(|k| k.to_string()).collect();
        expected.sort();
        assert_eq!(store.keys().unwrap(), expected);
    }

    #[test]
    fn test_key_encoding_round_trip() {
        assert_eq!(encode_key("favorites_u1"), "favorites_u1");
        assert_eq!(encode_key("a/b"), "a%2Fb");
        assert_eq!(encode_key(".x"), "%2Ex");
        assert_eq!(encode_key("Alice"), "%41lice");
        assert_eq!(decode_key("a%2Fb"), Some("a/b".to_string()));
        assert_eq!(decode_key("%41lice"), Some("Alice".to_string()));
        assert_eq!(decode_key("bad%2"), None);
    }

    #[test]
    fn test_keys_differing_in_case_use_distinct_files() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set_item("favorites_Alice", "upper").unwrap();
        store.set_item("favorites_alice", "lower").unwrap();

        assert_ne!(
            encode_key("favorites_Alice").to_lowercase(),
            encode_key("favorites_alice").to_lowercase()
        );
        assert_eq!(
            store.get_item("favorites_Alice").unwrap(),
            Some("upper".to_string())
        );
        assert_eq!(
            store.get_item("favorites_alice").unwrap(),
            Some("lower".to_string())
        );
    }

    #[test]
    fn test_lock_file_survives_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileKeyValueStore::new(temp_dir.path());

        store.set_item("favorites_u1", "{}").unwrap();

        assert!(temp_dir.path().join("favorites_u1.lock").exists());
        assert_eq!(store.keys().unwrap(), vec!["favorites_u1".to_string()]);
    }

    #[test]
    fn test_concurrent_writers_on_one_key() {
        let temp_dir = TempDir::new().unwrap();
        let base = temp_dir.path().to_path_buf();

        let handles: Vec<_> = (0..8)
            .map(|writer| {
                let store = FileKeyValueStore::new(&base);
                std::thread::spawn(move || {
                    for round in 0..100 {
                        let value = format!("{{\"writer\":{},\"round\":{}}}", writer, round);
                        store.set_item("favorites_u1", &value)?;
                    }
                    Ok::<(), FavsError>(())
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap().unwrap();
        }

        let store = FileKeyValueStore::new(&base);
        let raw = store.get_item("favorites_u1").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["round"], serde_json::json!(99));
        assert_eq!(store.keys().unwrap(), vec!["favorites_u1".to_string()]);
    }
}
