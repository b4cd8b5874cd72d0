//! File-backed storage: one `<key>.json` file per key.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use uuid::Uuid;

use crate::backend::{KeyValueStorage, validate_key};
use crate::error::StorageError;

/// Stores each key as `<dir>/<key>.json`.
///
/// Writes go to a sibling temp file which is then renamed over the target, so
/// readers see either the previous or the new value, never a partial write.
/// Each write gets its own temp file, so concurrent writers to one key never
/// interleave and the last rename wins.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Open (and create if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        debug!(dir = %dir.display(), "Opened file storage");
        Ok(Self { dir })
    }

    /// The directory holding the key files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.dir.join(format!("{key}.json")))
    }
}

fn io_error(key: &str, source: io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_owned(),
        source,
    }
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(key, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let tmp = self
            .dir
            .join(format!("{key}.json.{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, value).map_err(|e| io_error(key, e))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            let _ = fs::remove_file(&tmp);
            return Err(io_error(key, e));
        }
        debug!(key, bytes = value.len(), "Wrote storage file");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(key, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("zenplay_file_storage_{}", uuid::Uuid::new_v4()))
    }

    #[test]
    fn test_roundtrip_and_reopen() {
        let dir = temp_dir();
        let storage = FileStorage::open(&dir).unwrap();
        storage.set_item("zenplay_cart", "[]").unwrap();

        let reopened = FileStorage::open(&dir).unwrap();
        assert_eq!(
            reopened.get_item("zenplay_cart").unwrap().as_deref(),
            Some("[]")
        );
        let leftovers = fs::read_dir(&dir)
            .unwrap()
            .filter(|entry| {
                entry
                    .as_ref()
                    .unwrap()
                    .file_name()
                    .to_string_lossy()
                    .ends_with(".tmp")
            })
            .count();
        assert_eq!(leftovers, 0);

        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_concurrent_writers_leave_one_whole_value() {
        let dir = temp_dir();
        let storage = FileStorage::open(&dir).unwrap();
        let values: Vec<String> = (0..8)
            .map(|n| format!("[{}]", vec![n.to_string(); 2000].join(",")))
            .collect();

        std::thread::scope(|scope| {
            for value in &values {
                let storage = storage.clone();
                scope.spawn(move || {
                    for _ in 0..20 {
                        storage.set_item("zenplay_orders", value).unwrap();
                    }
                });
            }
        });

        let stored = storage.get_item("zenplay_orders").unwrap().unwrap();
        assert!(values.contains(&stored));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_missing_key_reads_none() {
        let dir = temp_dir();
        let storage = FileStorage::open(&dir).unwrap();
        assert_eq!(storage.get_item("zenplay_orders").unwrap(), None);
        assert!(storage.remove_item("zenplay_orders").is_ok());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_rejects_traversal_keys() {
        let dir = temp_dir();
        let storage = FileStorage::open(&dir).unwrap();
        assert!(matches!(
            storage.set_item("../escape", "x"),
            Err(StorageError::InvalidKey(_))
        ));
        let _ = fs::remove_dir_all(&dir);
    }
}
