//! Filesystem storage backend.
//!
//! Each key maps to one JSON file in the data directory. Writes go to a
//! hidden temp file first and are then renamed over the target, so a crash
//! mid-write leaves the previous value intact.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{ClientStorage, StorageError};

/// Storage backed by files in a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a storage backend rooted at `base_path`.
    ///
    /// The directory is created lazily on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
        }
    }

    /// Directory holding the stored values.
    #[must_use]
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Map a key to its file name.
    ///
    /// Keys are namespaced like `fsblends:cart`; `:` becomes `_` on disk.
    /// Anything that could escape the directory is rejected.
    fn file_name(key: &str) -> Result<String, StorageError> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'));
        if !valid {
            return Err(StorageError::InvalidKey(key.to_owned()));
        }
        Ok(format!("{}.json", key.replace(':', "_")))
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        Ok(self.base_path.join(Self::file_name(key)?))
    }

    fn io_error(path: &Path, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl ClientStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let file_name = Self::file_name(key)?;
        let path = self.base_path.join(&file_name);
        let temp_path = self.base_path.join(format!(".{file_name}.tmp"));

        fs::create_dir_all(&self.base_path).map_err(|e| Self::io_error(&self.base_path, e))?;

        // 1. Write to temp file
        fs::write(&temp_path, value).map_err(|e| Self::io_error(&temp_path, e))?;

        // 2. Atomic rename (atomic on POSIX systems)
        fs::rename(&temp_path, &path).map_err(|e| Self::io_error(&path, e))?;

        tracing::debug!(path = %path.display(), bytes = value.len(), "Stored item");
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(&path, e)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_key_reads_none() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());
        assert_eq!(storage.get_item("fsblends:cart").unwrap(), None);
    }

    #[test]
    fn test_write_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path().join("nested"));

        storage.set_item("fsblends:cart", "[]").unwrap();
        storage.set_item("fsblends:cart", "[1]").unwrap();

        assert_eq!(
            storage.get_item("fsblends:cart").unwrap().as_deref(),
            Some("[1]")
        );
        assert!(temp_dir.path().join("nested/fsblends_cart.json").exists());
        assert!(!temp_dir.path().join("nested/.fsblends_cart.json.tmp").exists());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        storage.set_item("cart", "[]").unwrap();
        storage.remove_item("cart").unwrap();
        storage.remove_item("cart").unwrap();
        assert_eq!(storage.get_item("cart").unwrap(), None);
    }

    #[test]
    fn test_rejects_path_traversal_keys() {
        let temp_dir = TempDir::new().unwrap();
        let storage = FileStorage::new(temp_dir.path());

        for key in ["", "../cart", "a/b", ".hidden", "cart key"] {
            assert!(matches!(
                storage.set_item(key, "[]"),
                Err(StorageError::InvalidKey(_))
            ));
        }
    }
}
