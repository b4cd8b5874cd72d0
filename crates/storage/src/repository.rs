//! Typed access to one JSON array stored under one key.

use std::fmt;
use std::marker::PhantomData;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::backend::SharedStorage;
use crate::error::StorageError;

/// Loads and saves a `Vec<T>` serialized as a JSON array under a fixed key.
///
/// Reads never fail: a missing key, an unreadable backend or malformed JSON
/// all load as an empty collection (the failure is logged). Writes replace the
/// whole array and do report failures. A stored value that does not parse is
/// copied to [`CollectionRepository::backup_key`] before the first write
/// replaces it.
pub struct CollectionRepository<T> {
    storage: SharedStorage,
    key: String,
    _items: PhantomData<fn() -> T>,
}

impl<T> Clone for CollectionRepository<T> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            key: self.key.clone(),
            _items: PhantomData,
        }
    }
}

impl<T> fmt::Debug for CollectionRepository<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollectionRepository")
            .field("key", &self.key)
            .finish_non_exhaustive()
    }
}

impl<T> CollectionRepository<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a repository for `key` on a shared backend.
    #[must_use]
    pub fn new(storage: SharedStorage, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
            _items: PhantomData,
        }
    }

    /// The storage key this repository owns.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Key that receives an unreadable stored value before it is replaced.
    #[must_use]
    pub fn backup_key(&self) -> String {
        format!("{}_backup", self.key)
    }

    /// Load the collection, treating absence and corruption as empty.
    #[must_use]
    pub fn load(&self) -> Vec<T> {
        match self.try_load() {
            Ok(Some(items)) => items,
            Ok(None) => Vec::new(),
            Err(e) => {
                warn!(
                    key = %self.key,
                    backup = %self.backup_key(),
                    error = %e,
                    "Unreadable collection, treating as empty; the next write replaces \
                     every stored record and keeps the old value under the backup key"
                );
                Vec::new()
            }
        }
    }

    /// Load the collection, reporting backend and parse failures.
    ///
    /// Returns `Ok(None)` if the key has never been written.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Storage` if the backend read fails and
    /// `LoadError::Malformed` if the stored value is not a valid array of `T`.
    pub fn try_load(&self) -> Result<Option<Vec<T>>, LoadError> {
        let Some(raw) = self.storage.get_item(&self.key)? else {
            return Ok(None);
        };
        let items: Vec<T> = serde_json::from_str(&raw)?;
        debug!(key = %self.key, count = items.len(), "Loaded collection");
        Ok(Some(items))
    }

    /// Replace the stored collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if serialization, the backup of an unreadable
    /// previous value, or the backend write fails.
    pub fn save(&self, items: &[T]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(items).map_err(|source| StorageError::Serialize {
            key: self.key.clone(),
            source,
        })?;
        self.preserve_unreadable()?;
        self.storage.set_item(&self.key, &raw)?;
        debug!(key = %self.key, count = items.len(), "Saved collection");
        Ok(())
    }

    /// Copy the stored value to the backup key if it does not parse.
    fn preserve_unreadable(&self) -> Result<(), StorageError> {
        let Ok(Some(previous)) = self.storage.get_item(&self.key) else {
            return Ok(());
        };
        if serde_json::from_str::<Vec<T>>(&previous).is_ok() {
            return Ok(());
        }
        let backup = self.backup_key();
        self.storage.set_item(&backup, &previous)?;
        warn!(
            key = %self.key,
            %backup,
            bytes = previous.len(),
            "Replacing unreadable collection; previous records are only in the backup"
        );
        Ok(())
    }

    /// Delete the key entirely; subsequent loads return an empty collection.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.storage.remove_item(&self.key)
    }

    /// Load, apply `f`, and save the result.
    ///
    /// The closure's return value is passed back to the caller. Returning
    /// `None` from `f` skips the write (the "nothing changed" path).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the save fails.
    pub fn update<R>(
        &self,
        f: impl FnOnce(&mut Vec<T>) -> Option<R>,
    ) -> Result<Option<R>, StorageError> {
        let mut items = self.load();
        let Some(result) = f(&mut items) else {
            return Ok(None);
        };
        self.save(&items)?;
        Ok(Some(result))
    }
}

/// Why a strict load failed.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The backend could not be read.
    #[error(transparent)]
    Storage(#[from] StorageError),
    /// The stored value is not a JSON array of the expected records.
    #[error("malformed collection: {0}")]
    Malformed(#[from] serde_json::Error),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use serde::Deserialize;

    use super::*;
    use crate::backend::KeyValueStorage;
    use crate::memory::MemoryStorage;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Row {
        id: String,
        n: u32,
    }

    fn repo() -> (Arc<MemoryStorage>, CollectionRepository<Row>) {
        let storage = Arc::new(MemoryStorage::new());
        let repo = CollectionRepository::new(storage.clone(), "rows");
        (storage, repo)
    }

    #[test]
    fn test_absent_key_loads_empty() {
        let (_, repo) = repo();
        assert!(repo.load().is_empty());
        assert!(repo.try_load().unwrap().is_none());
    }

    #[test]
    fn test_malformed_json_loads_empty() {
        let (storage, repo) = repo();
        storage.set_item("rows", "{not json").unwrap();
        assert!(repo.load().is_empty());
        assert!(matches!(repo.try_load(), Err(LoadError::Malformed(_))));
    }

    #[test]
    fn test_wrong_shape_loads_empty() {
        let (storage, repo) = repo();
        storage.set_item("rows", r#"{"id":"a","n":1}"#).unwrap();
        assert!(repo.load().is_empty());
    }

    #[test]
    fn test_write_over_unreadable_value_keeps_backup() {
        let (storage, repo) = repo();
        let stale = r#"[{"id":"a","n":"one"}]"#;
        storage.set_item("rows", stale).unwrap();
        assert!(repo.load().is_empty());

        repo.update(|rows| {
            rows.push(Row { id: "b".into(), n: 2 });
            Some(())
        })
        .unwrap();

        assert_eq!(repo.load(), vec![Row { id: "b".into(), n: 2 }]);
        assert_eq!(repo.backup_key(), "rows_backup");
        assert_eq!(storage.get_item("rows_backup").unwrap().as_deref(), Some(stale));
    }

    #[test]
    fn test_readable_value_is_not_backed_up() {
        let (storage, repo) = repo();
        repo.save(&[Row { id: "a".into(), n: 1 }]).unwrap();
        repo.save(&[Row { id: "b".into(), n: 2 }]).unwrap();
        repo.clear().unwrap();
        repo.save(&[]).unwrap();
        assert_eq!(storage.get_item("rows_backup").unwrap(), None);
    }

    #[test]
    fn test_save_then_load_is_deep_equal() {
        let (_, repo) = repo();
        let rows = vec![
            Row { id: "a".into(), n: 1 },
            Row { id: "b".into(), n: 2 },
        ];
        repo.save(&rows).unwrap();
        assert_eq!(repo.load(), rows);
    }

    #[test]
    fn test_update_skips_write_when_closure_returns_none() {
        let (storage, repo) = repo();
        let result = repo.update(|_rows| None::<()>).unwrap();
        assert!(result.is_none());
        assert_eq!(storage.get_item("rows").unwrap(), None);

        let result = repo
            .update(|rows| {
                rows.push(Row { id: "a".into(), n: 1 });
                Some(rows.len())
            })
            .unwrap();
        assert_eq!(result, Some(1));
        assert_eq!(repo.load().len(), 1);
    }

    #[test]
    fn test_clear_removes_key() {
        let (storage, repo) = repo();
        repo.save(&[Row { id: "a".into(), n: 1 }]).unwrap();
        repo.clear().unwrap();
        assert_eq!(storage.get_item("rows").unwrap(), None);
        assert!(repo.load().is_empty());
    }
}
