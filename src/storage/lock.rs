//! Single-writer discipline for flat files
//!
//! One async mutex per file path serializes read-modify-write cycles;
//! writes go to a temporary sibling that is renamed over the target, so
//! readers always see a complete file without taking the lock.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::OwnedMutexGuard;
use uuid::Uuid;

use super::StorageError;

/// Registry of per-file writer locks, shared by all stores of a process
#[derive(Debug, Clone, Default)]
pub struct FileLocks {
    inner: Arc<Mutex<HashMap<PathBuf, Arc<tokio::sync::Mutex<()>>>>>,
}

impl FileLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the writer lock of `path`; held until the guard is dropped
    pub async fn lock(&self, path: &Path) -> OwnedMutexGuard<()> {
        let file_lock = {
            let mut locks = self.inner.lock();
            locks.entry(path.to_path_buf()).or_default().clone()
        };
        file_lock.lock_owned().await
    }

    /// Number of files that have been locked at least once
    pub fn tracked_files(&self) -> usize {
        self.inner.lock().len()
    }
}

/// Read a whole file; `None` if it does not exist
pub(crate) async fn read_file(path: &Path) -> Result<Option<Vec<u8>>, StorageError> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StorageError::io(path, e)),
    }
}

/// Replace `path` with `bytes` through a uniquely named temporary sibling
pub(crate) async fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), StorageError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StorageError::io(parent, e))?;
    }

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let tmp = path.with_file_name(format!(".{}.{}.tmp", file_name, Uuid::new_v4().simple()));

    tokio::fs::write(&tmp, bytes)
        .await
        .map_err(|e| StorageError::io(&tmp, e))?;

    if let Err(e) = tokio::fs::rename(&tmp, path).await {
        let _ = tokio::fs::remove_file(&tmp).await;
        return Err(StorageError::io(path, e));
    }

    Ok(())
}
