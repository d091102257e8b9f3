use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use super::{file_storage::FileStorage, memory_storage::MemoryStorage};
use crate::config::StorageConfig;

/// The key under which the bearer token is persisted.
pub const TOKEN_KEY: &str = "token";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage document is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// The TokenStorage trait abstracts the single persisted key-value entry
/// holding the session token (load, save, clear).
#[async_trait]
pub trait TokenStorage: Send + Sync {
    async fn load(&self) -> Result<Option<String>, StorageError>;
    async fn save(&self, token: &str) -> Result<(), StorageError>;
    /// Removing an absent token is not an error.
    async fn clear(&self) -> Result<(), StorageError>;
    fn get_name(&self) -> &str;
}

/// Creates a concrete storage implementation based on the StorageConfig.
pub fn create_storage(config: &StorageConfig) -> Arc<dyn TokenStorage> {
    match config {
        StorageConfig::File(file_config) => {
            info!("Persisting session token to '{}'", file_config.path);
            Arc::new(FileStorage::new(file_config))
        }
        StorageConfig::Memory => {
            info!("Session token storage is in-memory only.");
            Arc::new(MemoryStorage::new())
        }
    }
}
