//! File-backed key-value storage.

use std::collections::BTreeMap;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::{debug, instrument, trace, warn};
use uuid::Uuid;

use campus_core::Result;
use campus_core::error::{Error, StorageError};
use campus_core::traits::{Change, KeyValueStore};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

fn map_io(err: std::io::Error) -> Error {
    Error::Storage(StorageError::from(err))
}

/// All keys in one JSON object file.
///
/// Every operation takes a lock on a sibling `.lock` file, so several
/// processes can share one store. Writes go to a temporary file that is
/// renamed over the original, and the file is readable by its owner only.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Create a store backed by `path`. The file is created on first write.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Get the storage file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn open_lock(&self) -> Result<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(map_io)?;
        }
        OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(self.lock_path())
            .map_err(map_io)
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path).map_err(map_io)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }

        serde_json::from_str(&content).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: format!("{}: {}", self.path.display(), e),
            })
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        let content = serde_json::to_string_pretty(map).map_err(|e| {
            Error::Storage(StorageError::Corrupt {
                message: e.to_string(),
            })
        })?;

        let temp_name = format!(".{}.tmp", Uuid::new_v4().simple());
        let temp_path = self.path.with_file_name(temp_name);

        fs::write(&temp_path, &content).map_err(map_io)?;

        #[cfg(unix)]
        {
            let mut perms = fs::metadata(&temp_path).map_err(map_io)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(&temp_path, perms).map_err(map_io)?;
        }

        if let Err(err) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(map_io(err));
        }

        Ok(())
    }

    /// Run `f` on the stored map under an exclusive lock and persist the
    /// result if `f` reports a change.
    ///
    /// A corrupt file is replaced: `f` starts from an empty map and the
    /// result is always written.
    fn update(&self, f: impl FnOnce(&mut BTreeMap<String, String>) -> bool) -> Result<()> {
        let lock = self.open_lock()?;
        lock.lock_exclusive().map_err(map_io)?;

        let result = match self.read_map() {
            Ok(mut map) => {
                if f(&mut map) {
                    self.write_map(&map)
                } else {
                    Ok(())
                }
            }
            Err(Error::Storage(StorageError::Corrupt { message })) => {
                warn!(%message, "replacing corrupt storage file");
                let mut map = BTreeMap::new();
                f(&mut map);
                self.write_map(&map)
            }
            Err(e) => Err(e),
        };

        lock.unlock().map_err(map_io)?;
        result
    }
}

impl KeyValueStore for FileStore {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn get(&self, key: &str) -> Result<Option<String>> {
        let lock = self.open_lock()?;
        lock.lock_shared().map_err(map_io)?;
        let result = self.read_map().map(|mut map| map.remove(key));
        lock.unlock().map_err(map_io)?;

        trace!(found = matches!(result, Ok(Some(_))), "storage read");
        result
    }

    #[instrument(skip(self, value), fields(path = %self.path.display()))]
    fn set(&self, key: &str, value: &str) -> Result<()> {
        debug!("storage write");
        self.update(|map| {
            let previous = map.insert(key.to_string(), value.to_string());
            previous.as_deref() != Some(value)
        })
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn remove(&self, key: &str) -> Result<()> {
        debug!("storage remove");
        self.update(|map| map.remove(key).is_some())
    }

    #[instrument(skip(self, changes), fields(path = %self.path.display(), count = changes.len()))]
    fn apply(&self, changes: &[Change<'_>]) -> Result<()> {
        debug!("storage batch write");
        self.update(|map| {
            let mut changed = false;
            for &(key, value) in changes {
                let previous = match value {
                    Some(value) => map.insert(key.to_string(), value.to_string()),
                    None => map.remove(key),
                };
                changed |= previous.as_deref() != value;
            }
            changed
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("storage.json"));
        (dir, store)
    }

    #[test]
    fn missing_file_is_empty() {
        let (_dir, store) = store();
        assert_eq!(store.get("accessToken").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn values_survive_reopen() {
        let (dir, store) = store();
        store.set("language", "bn").unwrap();

        let reopened = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(reopened.get("language").unwrap().as_deref(), Some("bn"));
    }

    #[test]
    fn remove_all_drops_only_named_keys() {
        let (_dir, store) = store();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("c", "3").unwrap();
        store.remove_all(&["a", "b", "missing"]).unwrap();
        assert_eq!(store.get("a").unwrap(), None);
        assert_eq!(store.get("b").unwrap(), None);
        assert_eq!(store.get("c").unwrap().as_deref(), Some("3"));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let (_dir, store) = store();
        fs::write(store.path(), "{not json").unwrap();
        assert!(matches!(
            store.get("a"),
            Err(Error::Storage(StorageError::Corrupt { .. }))
        ));
    }

    #[test]
    fn write_replaces_corrupt_file() {
        let (dir, store) = store();
        fs::write(store.path(), "{not json").unwrap();

        store.remove_all(&["accessToken", "refreshToken"]).unwrap();
        assert_eq!(fs::read_to_string(store.path()).unwrap().trim(), "{}");

        store.set("accessToken", "a1").unwrap();
        let reopened = FileStore::new(dir.path().join("storage.json"));
        assert_eq!(reopened.get("accessToken").unwrap().as_deref(), Some("a1"));
    }

    #[test]
    fn apply_writes_all_changes_together() {
        let (_dir, store) = store();
        store.set("refreshToken", "r1").unwrap();
        store
            .apply(&[("accessToken", Some("a2")), ("refreshToken", None), ("selectedModule", Some("hostel"))])
            .unwrap();
        assert_eq!(store.get("accessToken").unwrap().as_deref(), Some("a2"));
        assert_eq!(store.get("refreshToken").unwrap(), None);
        assert_eq!(store.get("selectedModule").unwrap().as_deref(), Some("hostel"));
    }

    #[test]
    fn leaves_no_temp_files() {
        let (dir, store) = store();
        store.set("a", "1").unwrap();
        store.remove("a").unwrap();
        let leftovers: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn file_is_owner_only() {
        let (_dir, store) = store();
        store.set("accessToken", "secret").unwrap();
        let mode = fs::metadata(store.path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
