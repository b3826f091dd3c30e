// SPDX-License-Identifier: Apache-2.0

use crate::error::{StoreError, StoreErrorCode};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageKind {
    LocalFs,
    Memory,
    Noop,
}

impl StorageKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LocalFs => "local-fs",
            Self::Memory => "memory",
            Self::Noop => "noop",
        }
    }
}

/// Durable string slot keyed by name, the shape of browser local storage.
pub trait KeyValueStorage {
    fn kind(&self) -> StorageKind;
    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove_item(&self, key: &str) -> Result<(), StoreError>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Arc<T> {
    fn kind(&self) -> StorageKind {
        (**self).kind()
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove_item(key)
    }
}

/// Keys become file names, so only `[A-Za-z0-9_.-]` is accepted.
pub fn validate_storage_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty() {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            "storage key must not be empty",
        ));
    }
    if key.starts_with('.')
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
    {
        return Err(StoreError::new(
            StoreErrorCode::Validation,
            format!("storage key `{key}` must match [A-Za-z0-9_.-]+ and not start with '.'"),
        ));
    }
    Ok(())
}

/// One JSON document per key under `root`.
pub struct LocalFsStorage {
    pub root: PathBuf,
}

impl LocalFsStorage {
    #[must_use]
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    #[must_use]
    pub fn item_path(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

impl KeyValueStorage for LocalFsStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::LocalFs
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        validate_storage_key(key)?;
        let path = self.item_path(key);
        if !path.exists() {
            return Ok(None);
        }
        fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        validate_storage_key(key)?;
        fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
        let path = self.item_path(key);
        let tmp = self.root.join(format!("{key}.json.tmp"));
        write_and_sync(&tmp, value.as_bytes())?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        validate_storage_key(key)?;
        match fs::remove_file(self.item_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::new(StoreErrorCode::Io, e.to_string())),
        }
    }
}

fn write_and_sync(path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut f =
        fs::File::create(path).map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    f.write_all(bytes)
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    f.sync_all()
        .map_err(|e| StoreError::new(StoreErrorCode::Io, e.to_string()))?;
    Ok(())
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, BTreeMap<String, String>>, StoreError> {
        self.items
            .lock()
            .map_err(|_| StoreError::new(StoreErrorCode::Internal, "memory storage lock poisoned"))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Memory
    }

    fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.lock()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

/// Stand-in used when no durable medium exists: accepts writes, reads nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopStorage;

impl KeyValueStorage for NoopStorage {
    fn kind(&self) -> StorageKind {
        StorageKind::Noop
    }

    fn get_item(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Ok(None)
    }

    fn set_item(&self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }
}

/// Picks the filesystem backend when `data_dir` is usable, otherwise the no-op stand-in.
///
/// Never fails: a store built without a writable data directory still works,
/// it just forgets everything at exit.
#[must_use]
pub fn detect_storage(data_dir: Option<&Path>) -> Box<dyn KeyValueStorage> {
    let Some(dir) = data_dir else {
        tracing::debug!("no data directory configured; cart persistence disabled");
        return Box::new(NoopStorage);
    };
    match fs::create_dir_all(dir) {
        Ok(()) if dir.is_dir() => Box::new(LocalFsStorage::new(dir.to_path_buf())),
        Ok(()) => {
            tracing::warn!(path = %dir.display(), "data path is not a directory; cart persistence disabled");
            Box::new(NoopStorage)
        }
        Err(err) => {
            tracing::warn!(path = %dir.display(), error = %err, "data directory unavailable; cart persistence disabled");
            Box::new(NoopStorage)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_keys_cannot_escape_the_root() {
        assert!(validate_storage_key("cart").is_ok());
        assert!(validate_storage_key("cart.v2").is_ok());
        assert!(validate_storage_key("").is_err());
        assert!(validate_storage_key("../cart").is_err());
        assert!(validate_storage_key(".hidden").is_err());
        assert!(validate_storage_key("a/b").is_err());
    }

    #[test]
    fn noop_storage_accepts_writes_and_reads_empty() {
        let storage = NoopStorage;
        storage.set_item("cart", "{}").expect("noop write");
        assert_eq!(storage.get_item("cart").expect("noop read"), None);
    }

    #[test]
    fn missing_data_dir_selects_noop_backend() {
        assert_eq!(detect_storage(None).kind(), StorageKind::Noop);
    }
}
