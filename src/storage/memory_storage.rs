use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{StorageError, TokenStorage};

/// Keeps the token in process memory. Used when persistence is disabled and in tests.
#[derive(Default)]
pub struct MemoryStorage {
    token: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that starts out holding `token`.
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Mutex::new(Some(token.into())),
        }
    }
}

#[async_trait]
impl TokenStorage for MemoryStorage {
    async fn load(&self) -> Result<Option<String>, StorageError> {
        Ok(self.token.lock().await.clone())
    }

    async fn save(&self, token: &str) -> Result<(), StorageError> {
        *self.token.lock().await = Some(token.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.token.lock().await.take();
        Ok(())
    }

    fn get_name(&self) -> &str {
        "memory"
    }
}
