//! Files on local disk below a media root.

use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use blog_core::ports::{MediaError, MediaStorage};

use super::{check_relative, new_file_path};

pub struct LocalMediaStorage {
    root: PathBuf,
}

impl LocalMediaStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> Result<PathBuf, MediaError> {
        check_relative(path)?;
        Ok(self.root.join(path))
    }
}

#[async_trait]
impl MediaStorage for LocalMediaStorage {
    async fn store(
        &self,
        directory: &str,
        extension: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError> {
        let relative = new_file_path(directory, extension)?;
        let target = self.resolve(&relative)?;

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| MediaError::Io(e.to_string()))?;
        }
        tokio::fs::write(&target, bytes)
            .await
            .map_err(|e| MediaError::Io(e.to_string()))?;

        tracing::debug!(path = %relative, "Media file written");
        Ok(relative)
    }

    async fn load(&self, path: &str) -> Result<Option<Vec<u8>>, MediaError> {
        let target = self.resolve(path)?;
        match tokio::fs::read(&target).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }

    async fn remove(&self, path: &str) -> Result<(), MediaError> {
        let target = self.resolve(path)?;
        match tokio::fs::remove_file(&target).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(MediaError::Io(e.to_string())),
        }
    }
}
