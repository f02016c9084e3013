//! Application state - shared across all handlers.

use std::sync::Arc;

use blog_core::BlogService;
use blog_core::ports::MediaStorage;
use blog_core::service::{BlogSettings, Repositories};
use blog_infra::{InMemoryMediaStorage, InMemoryStore, LocalMediaStorage};

use crate::config::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<BlogService>,
    pub media: Arc<dyn MediaStorage>,
    /// Prefix turning a stored media path into a URL.
    pub media_url: String,
}

impl AppState {
    /// Wire repositories and storage according to the configuration.
    pub async fn new(config: &AppConfig) -> std::io::Result<Self> {
        let repos = repositories(config).await?;
        let media: Arc<dyn MediaStorage> = Arc::new(LocalMediaStorage::new(&config.media_root));
        tracing::info!(media_root = %config.media_root.display(), "Media storage ready");

        Ok(Self::assemble(
            repos,
            media,
            config.blog.clone(),
            config.media_url.clone(),
        ))
    }

    /// Fully in-memory state, nothing touches disk or network.
    pub fn in_memory(settings: BlogSettings, media_url: impl Into<String>) -> Self {
        Self::assemble(
            InMemoryStore::repositories(),
            Arc::new(InMemoryMediaStorage::new()),
            settings,
            media_url.into(),
        )
    }

    fn assemble(
        repos: Repositories,
        media: Arc<dyn MediaStorage>,
        settings: BlogSettings,
        media_url: String,
    ) -> Self {
        Self {
            blog: Arc::new(BlogService::new(repos, media.clone(), settings)),
            media,
            media_url,
        }
    }

    /// Public URL of a stored media file.
    pub fn media_link(&self, path: &str) -> String {
        format!("{}{}", self.media_url, path)
    }
}

#[cfg(feature = "postgres")]
async fn repositories(config: &AppConfig) -> std::io::Result<Repositories> {
    match &config.database {
        Some(database) => {
            let conn = blog_infra::database::connect(database)
                .await
                .map_err(|e| std::io::Error::other(format!("database connection failed: {e}")))?;
            Ok(blog_infra::database::postgres_repositories(conn))
        }
        None => {
            tracing::warn!("DATABASE_URL not set. Running on the in-memory store.");
            Ok(InMemoryStore::repositories())
        }
    }
}

#[cfg(not(feature = "postgres"))]
async fn repositories(config: &AppConfig) -> std::io::Result<Repositories> {
    if config.database.is_some() {
        tracing::warn!("Built without the postgres feature; DATABASE_URL is ignored.");
    }
    Ok(InMemoryStore::repositories())
}
