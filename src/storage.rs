use serde_json::Value;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Synchronous string-keyed medium the journal persists into.
pub trait Storage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
    /// All keys, sorted.
    fn keys(&self) -> Vec<String>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStorage {
    values: BTreeMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

/// JSON-file backed storage. Every mutation rewrites the file before returning.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FileStorage {
    /// Opens `path`, starting empty when the file is missing or blank.
    ///
    /// Non-string values are skipped. A file that is not a JSON object is moved
    /// aside to `<path>.bak` so the next write cannot overwrite it.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => String::new(),
            Err(source) => return Err(Error::Read { path, source }),
        };

        let values = if contents.trim().is_empty() {
            BTreeMap::new()
        } else {
            match serde_json::from_str::<serde_json::Map<String, Value>>(&contents) {
                Ok(map) => string_values(&path, map),
                Err(e) => {
                    let backup = backup_path(&path);
                    warn!(
                        path = %path.display(),
                        backup = %backup.display(),
                        error = %e,
                        "entry file is not a JSON object, moving it aside"
                    );
                    fs::rename(&path, &backup).map_err(|source| Error::Write {
                        path: backup.clone(),
                        source,
                    })?;
                    BTreeMap::new()
                }
            }
        };

        debug!(path = %path.display(), keys = values.len(), "opened entry file");
        Ok(FileStorage { path, values })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| Error::Write {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let json = serde_json::to_string_pretty(&self.values)?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|source| Error::Write {
            path: tmp.clone(),
            source,
        })?;
        fs::rename(&tmp, &self.path).map_err(|source| Error::Write {
            path: self.path.clone(),
            source,
        })
    }
}

// Keeps string values; anything else reads as absent.
fn string_values(path: &Path, map: serde_json::Map<String, Value>) -> BTreeMap<String, String> {
    map.into_iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some((key, text)),
            other => {
                warn!(path = %path.display(), %key, value = %other, "skipping non-string value");
                None
            }
        })
        .collect()
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".bak");
    PathBuf::from(name)
}

impl Storage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }

    fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn memory_storage_basics() {
        let mut storage = MemoryStorage::new();
        storage.set("b", "2").unwrap();
        storage.set("a", "1").unwrap();

        assert_eq!(storage.get("a").as_deref(), Some("1"));
        assert_eq!(storage.keys(), vec!["a".to_string(), "b".to_string()]);

        storage.remove("a").unwrap();
        assert_eq!(storage.get("a"), None);
    }

    #[test]
    fn file_storage_survives_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("entries.json");

        let mut storage = FileStorage::open(&path).unwrap();
        storage.set("twofourty-entry-2024-03-15", "hello world").unwrap();
        storage.set("gone", "soon").unwrap();
        storage.remove("gone").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("twofourty-entry-2024-03-15").as_deref(),
            Some("hello world")
        );
        assert_eq!(reopened.get("gone"), None);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[test]
    fn non_object_file_is_moved_aside() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(&path, "{ not json").unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        assert!(storage.keys().is_empty());

        storage.set("twofourty-entry-2024-03-15", "today").unwrap();

        let backup = dir.path().join("entries.json.bak");
        assert_eq!(fs::read_to_string(backup).unwrap(), "{ not json");
        assert_eq!(
            FileStorage::open(&path).unwrap().get("twofourty-entry-2024-03-15").as_deref(),
            Some("today")
        );
    }

    #[test]
    fn non_string_values_are_skipped_and_the_rest_kept() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");
        fs::write(
            &path,
            r#"{"twofourty-entry-2024-03-14":"kept words","twofourty-entry-2024-03-14-locked":true}"#,
        )
        .unwrap();

        let mut storage = FileStorage::open(&path).unwrap();
        assert_eq!(
            storage.get("twofourty-entry-2024-03-14").as_deref(),
            Some("kept words")
        );
        assert_eq!(storage.get("twofourty-entry-2024-03-14-locked"), None);

        storage.set("twofourty-entry-2024-03-15", "today").unwrap();
        drop(storage);

        let reopened = FileStorage::open(&path).unwrap();
        assert_eq!(
            reopened.get("twofourty-entry-2024-03-14").as_deref(),
            Some("kept words")
        );
        assert_eq!(reopened.get("twofourty-entry-2024-03-15").as_deref(), Some("today"));
        assert!(!dir.path().join("entries.json.bak").exists());
    }

    #[test]
    fn missing_file_opens_empty_without_creating_it() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("entries.json");

        let storage = FileStorage::open(&path).unwrap();

        assert!(storage.keys().is_empty());
        assert!(!path.exists());
    }
}
