//! A [`StateStore`] backed by one file per key.

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    sync::atomic::{AtomicU64, Ordering},
};

use async_trait::async_trait;

use super::{
    error::PersistenceError,
    traits::{StateKey, StateStore},
};
use crate::config::StateFilesConfig;

/// Stores every key as a whole file at a configured path.
///
/// Writes are staged in a sibling temp file and renamed over the target, so a
/// reader in another process observes either the previous or the new file and
/// never a torn one. There is no cross-process locking: concurrent writers to
/// the same key are last-write-wins.
#[derive(Debug)]
pub struct FileStateStore {
    paths: StateFilesConfig,
    staging_counter: AtomicU64,
}

impl FileStateStore {
    /// Creates a store over the given file layout.
    pub fn new(paths: StateFilesConfig) -> Self {
        Self { paths, staging_counter: AtomicU64::new(0) }
    }

    /// Returns the file backing `key`.
    pub fn path(&self, key: StateKey) -> &Path {
        match key {
            StateKey::AlarmStatus => &self.paths.alarm_status,
            StateKey::UnlockStatus => &self.paths.unlock_status,
            StateKey::AlertQueue => &self.paths.alert_queue,
            StateKey::ControlCommand => &self.paths.control_command,
            StateKey::EventLog => &self.paths.event_log,
        }
    }

    /// A hidden sibling of `path` that is unique to this process and call.
    fn sibling(&self, path: &Path, suffix: &str) -> PathBuf {
        let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
        let seq = self.staging_counter.fetch_add(1, Ordering::Relaxed);
        path.with_file_name(format!(".{}.{}.{}.{}", file_name, std::process::id(), seq, suffix))
    }

    fn io_error(key: StateKey, path: &Path, source: std::io::Error) -> PersistenceError {
        PersistenceError::Io { key, path: path.to_path_buf(), source }
    }
}

#[async_trait]
impl StateStore for FileStateStore {
    async fn read(&self, key: StateKey) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.path(key);
        match tokio::fs::read(path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(Self::io_error(key, path, e)),
        }
    }

    #[tracing::instrument(skip(self, contents), level = "debug")]
    async fn write(&self, key: StateKey, contents: Vec<u8>) -> Result<(), PersistenceError> {
        let path = self.path(key);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| Self::io_error(key, parent, e))?;
        }

        let staging = self.sibling(path, "tmp");
        if let Err(e) = tokio::fs::write(&staging, &contents).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(Self::io_error(key, &staging, e));
        }
        if let Err(e) = tokio::fs::rename(&staging, path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(Self::io_error(key, path, e));
        }

        tracing::debug!(key = %key, path = %path.display(), bytes = contents.len(), "State file replaced.");
        Ok(())
    }

    async fn delete(&self, key: StateKey) -> Result<(), PersistenceError> {
        let path = self.path(key);
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Self::io_error(key, path, e)),
        }
    }

    /// Claims the file by renaming it aside before reading it, so two
    /// consumers racing on the same key cannot both observe the value.
    async fn take(&self, key: StateKey) -> Result<Option<Vec<u8>>, PersistenceError> {
        let path = self.path(key);
        let claimed = self.sibling(path, "claimed");
        match tokio::fs::rename(path, &claimed).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Self::io_error(key, path, e)),
        }

        let contents = tokio::fs::read(&claimed).await.map_err(|e| Self::io_error(key, &claimed, e));
        if let Err(e) = tokio::fs::remove_file(&claimed).await {
            tracing::error!(key = %key, path = %claimed.display(), error = %e, "Failed to remove claimed state file.");
        }
        contents.map(Some)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    fn store_in(dir: &TempDir) -> FileStateStore {
        FileStateStore::new(StateFilesConfig::in_dir(dir.path()))
    }

    #[tokio::test]
    async fn read_of_missing_file_is_none() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for key in StateKey::ALL {
            assert!(store.read(key).await.unwrap().is_none());
        }
    }

    #[tokio::test]
    async fn write_replaces_whole_file() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(StateKey::UnlockStatus, b"{\"remote_unlocked\":true,\"long\":\"xxxxxxxx\"}".to_vec()).await.unwrap();
        store.write(StateKey::UnlockStatus, b"{}".to_vec()).await.unwrap();

        assert_eq!(store.read(StateKey::UnlockStatus).await.unwrap().unwrap(), b"{}");
        let on_disk = std::fs::read(store.path(StateKey::UnlockStatus)).unwrap();
        assert_eq!(on_disk, b"{}");
    }

    #[tokio::test]
    async fn write_leaves_no_staging_files_behind() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.write(StateKey::ControlCommand, b"reset".to_vec()).await.unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["guardian_control.txt".to_string()]);
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        store.delete(StateKey::AlertQueue).await.unwrap();
        store.write(StateKey::AlertQueue, b"{}".to_vec()).await.unwrap();
        store.delete(StateKey::AlertQueue).await.unwrap();
        store.delete(StateKey::AlertQueue).await.unwrap();

        assert!(!store.path(StateKey::AlertQueue).exists());
    }

    #[tokio::test]
    async fn take_removes_file_and_returns_contents_once() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(StateKey::AlertQueue), b"payload").unwrap();

        assert_eq!(store.take(StateKey::AlertQueue).await.unwrap().unwrap(), b"payload");
        assert!(!store.path(StateKey::AlertQueue).exists());
        assert!(store.take(StateKey::AlertQueue).await.unwrap().is_none());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn write_creates_missing_parent_directory() {
        let dir = TempDir::new().unwrap();
        let store = FileStateStore::new(StateFilesConfig::in_dir(dir.path().join("nested")));

        store.write(StateKey::EventLog, b"[]".to_vec()).await.unwrap();

        assert!(dir.path().join("nested/guardian_logs.json").exists());
    }
}
