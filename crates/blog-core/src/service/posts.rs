use chrono::Utc;

use super::{BlogService, POST_IMAGES_DIR};
use crate::domain::{Category, Post, PostDetail, PostDraft, PostPreview, User, Viewer};
use crate::error::{DomainError, FieldError};
use crate::pagination::Page;
use crate::policy;
use crate::validation;
use crate::visibility::PostQuery;

impl BlogService {
    /// Front page: every publicly visible post.
    pub async fn index(&self, page: Option<u64>) -> Result<Page<PostPreview>, DomainError> {
        let posts = self
            .repos
            .posts
            .list(&PostQuery::public(Utc::now()), self.page(page)?)
            .await?;
        posts.ensure_exists()
    }

    /// Category page. Unknown and unpublished categories are not found.
    pub async fn category_posts(
        &self,
        slug: &str,
        page: Option<u64>,
    ) -> Result<(Category, Page<PostPreview>), DomainError> {
        let category = self
            .repos
            .categories
            .find_by_slug(slug)
            .await?
            .filter(|c| c.is_published)
            .ok_or_else(|| DomainError::not_found("category", slug))?;

        let query = PostQuery::public(Utc::now()).in_category(category.id);
        let posts = self.repos.posts.list(&query, self.page(page)?).await?;
        Ok((category, posts.ensure_exists()?))
    }

    /// Profile page. The owner sees all of their posts, others only public ones.
    pub async fn profile(
        &self,
        username: &str,
        viewer: &Viewer,
        page: Option<u64>,
    ) -> Result<(User, Page<PostPreview>), DomainError> {
        let owner = self
            .repos
            .users
            .find_by_username(username)
            .await?
            .ok_or_else(|| DomainError::not_found("user", username))?;

        let query = PostQuery::for_profile(owner.id, viewer, Utc::now());
        let posts = self.repos.posts.list(&query, self.page(page)?).await?;
        Ok((owner, posts.ensure_exists()?))
    }

    pub async fn post_detail(&self, post_id: i64, viewer: &Viewer) -> Result<PostDetail, DomainError> {
        let post = self.visible_post(post_id, viewer).await?;
        let category = self.category_of(&post).await?;
        let location = self.location_of(&post).await?;
        let author_username = self.username_of(post.author_id).await?;
        let comments = self.comments_of(post.id).await?;

        Ok(PostDetail {
            post,
            author_username,
            category,
            location,
            comments,
        })
    }

    pub async fn create_post(&self, viewer: &Viewer, draft: PostDraft) -> Result<Post, DomainError> {
        let author_id = policy::require_login(viewer)?;
        self.validate_post(&draft).await?;

        let post = self.repos.posts.save(Post::new(author_id, draft)).await?;
        tracing::info!(post_id = post.id, author_id, "Post created");
        Ok(post)
    }

    /// The post as its author is about to edit it.
    pub async fn post_for_edit(&self, viewer: &Viewer, post_id: i64) -> Result<Post, DomainError> {
        self.owned_post(post_id, viewer).await
    }

    pub async fn update_post(
        &self,
        viewer: &Viewer,
        post_id: i64,
        draft: PostDraft,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned_post(post_id, viewer).await?;
        self.validate_post(&draft).await?;

        post.apply(draft);
        let post = self.repos.posts.save(post).await?;
        tracing::info!(post_id, "Post updated");
        Ok(post)
    }

    /// Delete a post with its comments and picture.
    pub async fn delete_post(&self, viewer: &Viewer, post_id: i64) -> Result<Post, DomainError> {
        let post = self.owned_post(post_id, viewer).await?;
        self.repos.posts.delete(post.id).await?;

        if let Some(image) = &post.image {
            if let Err(e) = self.media.remove(image).await {
                tracing::warn!(post_id, image = %image, "Failed to remove post image: {}", e);
            }
        }

        tracing::info!(post_id, "Post deleted");
        Ok(post)
    }

    /// Replace the picture of a post with an uploaded image.
    pub async fn attach_image(
        &self,
        viewer: &Viewer,
        post_id: i64,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<Post, DomainError> {
        let mut post = self.owned_post(post_id, viewer).await?;
        let format = validation::validate_image(content_type, &bytes, self.settings.max_image_bytes)?;

        let path = self
            .media
            .store(POST_IMAGES_DIR, format.extension(), bytes)
            .await
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        let previous = post.image.replace(path);
        let post = self.repos.posts.save(post).await?;

        if let Some(old) = previous {
            if let Err(e) = self.media.remove(&old).await {
                tracing::warn!(post_id, image = %old, "Failed to remove replaced image: {}", e);
            }
        }

        tracing::info!(post_id, image = ?post.image, "Post image stored");
        Ok(post)
    }

    /// Field rules plus existence of the referenced category and location.
    async fn validate_post(&self, draft: &PostDraft) -> Result<(), DomainError> {
        let mut errors = match validation::validate_post(draft) {
            Ok(()) => Vec::new(),
            Err(DomainError::Validation(errors)) => errors,
            Err(other) => return Err(other),
        };

        if let Some(id) = draft.category_id {
            if self.repos.categories.find_by_id(id).await?.is_none() {
                errors.push(FieldError::new("category", "Select a valid choice"));
            }
        }
        if let Some(id) = draft.location_id {
            if self.repos.locations.find_by_id(id).await?.is_none() {
                errors.push(FieldError::new("location", "Select a valid choice"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(errors))
        }
    }
}
