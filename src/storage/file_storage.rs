use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use super::{StorageError, TokenStorage, TOKEN_KEY};
use crate::config::FileStorageConfig;

/// Persists the token as a small JSON document (`{"token": "..."}`) on disk.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(config: &FileStorageConfig) -> Self {
        Self {
            path: PathBuf::from(&config.path),
        }
    }

    async fn read_entries(&self) -> Result<HashMap<String, String>, StorageError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_entries(&self, entries: &HashMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let body = serde_json::to_vec(entries)?;
        // write a sibling file, then rename it over the target
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TokenStorage for FileStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(TOKEN_KEY))
    }

    async fn save(&self, token: &str) -> Result<(), StorageError> {
        debug!("Saving session token to {}", self.path.display());
        // a corrupt document is replaced, any other read failure is surfaced
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(StorageError::Corrupt(_)) => HashMap::new(),
            Err(e) => return Err(e),
        };
        entries.insert(TOKEN_KEY.to_string(), token.to_string());
        self.write_entries(&entries).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        debug!("Clearing session token from {}", self.path.display());
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn get_name(&self) -> &str {
        "file"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    /// Storage inside a fresh temporary directory, removed when the guard drops.
    fn temp_storage() -> (TempDir, FileStorage) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let storage = storage_at(&dir.path().join("nested").join("session.json"));
        (dir, storage)
    }

    fn storage_at(path: &std::path::Path) -> FileStorage {
        FileStorage::new(&FileStorageConfig {
            path: path.to_string_lossy().into_owned(),
        })
    }

    #[tokio::test]
    async fn missing_file_loads_nothing() {
        let (_dir, storage) = temp_storage();
        assert_eq!(storage.load().await.unwrap(), None);
        // clearing an absent file is fine
        storage.clear().await.unwrap();
    }

    #[tokio::test]
    async fn token_survives_a_new_instance() {
        let (_dir, storage) = temp_storage();
        storage.save("persisted").await.unwrap();

        let reopened = storage_at(&storage.path);
        assert_eq!(reopened.load().await.unwrap().as_deref(), Some("persisted"));

        reopened.clear().await.unwrap();
        assert_eq!(storage.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn corrupt_document_is_an_error_and_save_repairs_it() {
        let (_dir, storage) = temp_storage();
        fs::create_dir_all(storage.path.parent().unwrap()).await.unwrap();
        fs::write(&storage.path, b"{not json").await.unwrap();

        assert!(matches!(storage.load().await, Err(StorageError::Corrupt(_))));

        storage.save("fresh").await.unwrap();
        assert_eq!(storage.load().await.unwrap().as_deref(), Some("fresh"));
    }

    #[tokio::test]
    async fn unreadable_document_is_not_overwritten() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        // a directory where the document should be makes every read fail with an I/O error
        let path = dir.path().join("session.json");
        fs::create_dir_all(&path).await.unwrap();
        let storage = storage_at(&path);

        assert!(matches!(storage.save("t").await, Err(StorageError::Io(_))));
        assert!(fs::metadata(&path).await.unwrap().is_dir());
        // nothing was staged for the rename either
        assert!(!dir.path().join("session.tmp").exists());
    }
}
