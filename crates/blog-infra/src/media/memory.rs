use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::ports::{MediaError, MediaStorage};

use super::{check_relative, new_file_path};

/// Keeps uploads in a map; for tests and database-less runs.
#[derive(Default)]
pub struct InMemoryMediaStorage {
    files: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryMediaStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MediaStorage for InMemoryMediaStorage {
    async fn store(
        &self,
        directory: &str,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError> {
        let path = new_file_path(directory, extension)?;
        self.files.write().await.insert(path.clone(), bytes);
        Ok(path)
    }

    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, MediaError> {
        check_relative(path)?;
        Ok(self.files.read().await.get(path).cloned())
    }

    async fn remove(&self, path: &str) -> Result<(), MediaError> {
        check_relative(path)?;
        self.files.write().await.remove(path);
        Ok(())
    }
}
