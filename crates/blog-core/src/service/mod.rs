//! Use cases of the blog, one method per page or form.
//!
//! Every method that touches a single post resolves it through the viewer's
//! visibility first and only then applies the authorization policy, so hidden
//! posts are indistinguishable from missing ones.

mod catalog;
mod comments;
mod posts;
mod profiles;

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::domain::{Category, Location, Post, Viewer};
use crate::error::DomainError;
use crate::pagination::{DEFAULT_PAGE_SIZE, PageRequest};
use crate::policy;
use crate::ports::{
    CategoryRepository, CommentRepository, LocationRepository, MediaStorage, PostRepository,
    UserRepository,
};
use crate::visibility;

pub use catalog::FormChoices;

/// Directory under the media root holding post pictures.
pub const POST_IMAGES_DIR: &str = "posts_images";

/// All repositories the service reads and writes.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub locations: Arc<dyn LocationRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub comments: Arc<dyn CommentRepository>,
}

/// Tunables of the service.
#[derive(Debug, Clone)]
pub struct BlogSettings {
    pub page_size: u64,
    pub max_image_bytes: usize,
}

impl Default for BlogSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            max_image_bytes: 5 * 1024 * 1024,
        }
    }
}

pub struct BlogService {
    repos: Repositories,
    media: Arc<dyn MediaStorage>,
    settings: BlogSettings,
}

impl BlogService {
    pub fn new(repos: Repositories, media: Arc<dyn MediaStorage>, settings: BlogSettings) -> Self {
        Self {
            repos,
            media,
            settings,
        }
    }

    pub fn settings(&self) -> &BlogSettings {
        &self.settings
    }

    fn page(&self, number: Option<u64>) -> Result<PageRequest, DomainError> {
        PageRequest::bounded(number, self.settings.page_size)
    }

    async fn category_of(&self, post: &Post) -> Result<Option<Category>, DomainError> {
        match post.category_id {
            Some(id) => Ok(self.repos.categories.find_by_id(id).await?),
            None => Ok(None),
        }
    }

    async fn location_of(&self, post: &Post) -> Result<Option<Location>, DomainError> {
        match post.location_id {
            Some(id) => Ok(self.repos.locations.find_by_id(id).await?),
            None => Ok(None),
        }
    }

    /// Load a post the viewer may see, or report it as not found.
    async fn visible_post(&self, post_id: i64, viewer: &Viewer) -> Result<Post, DomainError> {
        let post = self
            .repos
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or_else(|| DomainError::not_found("post", post_id))?;

        if viewer.is(post.author_id) {
            return Ok(post);
        }

        let category = self.category_of(&post).await?;
        if !visibility::can_view(viewer, &post, category.as_ref(), Utc::now()) {
            tracing::debug!(post_id, "Post hidden from viewer");
            return Err(DomainError::not_found("post", post_id));
        }
        Ok(post)
    }

    /// Load a post the viewer may see and must own.
    async fn owned_post(&self, post_id: i64, viewer: &Viewer) -> Result<Post, DomainError> {
        let post = self.visible_post(post_id, viewer).await?;
        policy::require_author(viewer, post.author_id, post.id)?;
        Ok(post)
    }

    /// Map user ids to usernames; ids of vanished users map to nothing.
    async fn usernames(&self, ids: &[i64]) -> Result<HashMap<i64, String>, DomainError> {
        let mut unique = ids.to_vec();
        unique.sort_unstable();
        unique.dedup();

        let users = self.repos.users.find_by_ids(&unique).await?;
        Ok(users.into_iter().map(|u| (u.id, u.username)).collect())
    }

    async fn username_of(&self, user_id: i64) -> Result<String, DomainError> {
        let user = self
            .repos
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| DomainError::not_found("user", user_id))?;
        Ok(user.username)
    }
}
