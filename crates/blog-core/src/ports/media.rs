//! Storage for uploaded files.

use async_trait::async_trait;

/// Stores files under relative paths such as `posts_images/<name>.png`.
#[async_trait]
pub trait MediaStorage: Send + Sync {
    /// Persist `bytes` in `directory` and return the relative path.
    async fn store(
        &self,
        directory: &str,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError>;

    /// Read a stored file; `None` when nothing is stored at `path`.
    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, MediaError>;

    /// Remove a stored file. Removing a missing file is not an error.
    async fn remove(&self, path: &str) -> Result<(), MediaError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("Invalid media path: {0}")]
    InvalidPath(String),

    #[error("Storage failure: {0}")]
    Io(String),
}
