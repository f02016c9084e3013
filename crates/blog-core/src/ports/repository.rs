use async_trait::async_trait;

use crate::domain::{Category, Comment, Location, Post, PostPreview, User};
use crate::error::RepoError;
use crate::pagination::{Page, PageRequest};
use crate::visibility::PostQuery;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Save an entity: insert when it has no id yet, update otherwise.
    async fn save(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID, together with whatever depends on it.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

#[async_trait]
pub trait UserRepository: BaseRepository<User, i64> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    /// Users among `ids`; unknown ids are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, RepoError>;
}

#[async_trait]
pub trait CategoryRepository: BaseRepository<Category, i64> {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError>;

    async fn list_all(&self) -> Result<Vec<Category>, RepoError>;
}

#[async_trait]
pub trait LocationRepository: BaseRepository<Location, i64> {
    async fn list_all(&self) -> Result<Vec<Location>, RepoError>;
}

#[async_trait]
pub trait PostRepository: BaseRepository<Post, i64> {
    /// Posts matching `query`, newest `pub_date` first.
    async fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, RepoError>;
}

#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, i64> {
    /// Comments on a post, oldest first.
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError>;
}
