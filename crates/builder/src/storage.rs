//! Key-value storage the documents are persisted in
//!
//! Mirrors the browser's local storage: string keys, string values, whole
//! values replaced on every write.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{BuilderError, BuilderResult};

pub trait KeyValueStorage {
    fn get_item(&self, key: &str) -> BuilderResult<Option<String>>;

    fn set_item(&mut self, key: &str, value: &str) -> BuilderResult<()>;

    fn remove_item(&mut self, key: &str) -> BuilderResult<()>;
}

impl<S: KeyValueStorage + ?Sized> KeyValueStorage for &mut S {
    fn get_item(&self, key: &str) -> BuilderResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&mut self, key: &str, value: &str) -> BuilderResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&mut self, key: &str) -> BuilderResult<()> {
        (**self).remove_item(key)
    }
}

// ============================================================================
// In-memory storage
// ============================================================================

#[derive(Clone, Debug, Default)]
pub struct MemoryStorage {
    items: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> BuilderResult<Option<String>> {
        Ok(self.items.get(key).cloned())
    }

    fn set_item(&mut self, key: &str, value: &str) -> BuilderResult<()> {
        self.items.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> BuilderResult<()> {
        self.items.remove(key);
        Ok(())
    }
}

// ============================================================================
// File storage
// ============================================================================

/// One `<key>.json` file per key inside a directory.
/// Writes go to a temporary file that is renamed over the old one.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open storage in `dir`, creating the directory if needed
    pub fn open(dir: impl Into<PathBuf>) -> BuilderResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        tracing::debug!("File storage at {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> BuilderResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(BuilderError::Storage(format!("Invalid storage key: {:?}", key)));
        }
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> BuilderResult<Option<String>> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_item(&mut self, key: &str, value: &str) -> BuilderResult<()> {
        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, value)?;
        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> BuilderResult<()> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_storage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(storage.get_item("k").unwrap(), None);
        storage.set_item("k", "v1").unwrap();
        storage.set_item("k", "v2").unwrap();
        assert_eq!(storage.get_item("k").unwrap().as_deref(), Some("v2"));
        storage.remove_item("k").unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn test_file_storage_overwrites_whole_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path().join("nested")).unwrap();

        assert_eq!(storage.get_item("portico_current_form").unwrap(), None);
        storage.set_item("portico_current_form", "{\"title\":\"long title\"}").unwrap();
        storage.set_item("portico_current_form", "{}").unwrap();
        assert_eq!(
            storage.get_item("portico_current_form").unwrap().as_deref(),
            Some("{}")
        );
        assert!(!dir.path().join("nested/portico_current_form.json.tmp").exists());

        storage.remove_item("portico_current_form").unwrap();
        storage.remove_item("portico_current_form").unwrap();
        assert_eq!(storage.get_item("portico_current_form").unwrap(), None);
    }

    #[test]
    fn test_file_storage_rejects_path_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut storage = FileStorage::open(dir.path()).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(BuilderError::Storage(_))
        ));
    }
}
