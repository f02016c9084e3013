//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Emulates the relational rules of the PostgreSQL schema: unique usernames
//! and slugs, cascading deletes of posts and comments, and nulled category or
//! location references. Data is lost on process restart.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use blog_core::domain::{Category, Comment, Location, Post, PostPreview, UNSAVED_ID, User};
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest};
use blog_core::ports::{
    BaseRepository, CategoryRepository, CommentRepository, LocationRepository, PostRepository,
    UserRepository,
};
use blog_core::service::Repositories;
use blog_core::visibility::PostQuery;

/// Anything stored in a [`Table`].
trait Record: Clone {
    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
}

macro_rules! record {
    ($($ty:ty),*) => {
        $(impl Record for $ty {
            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }
        })*
    };
}

record!(User, Category, Location, Post, Comment);

/// Rows keyed by id, with an auto-increment sequence.
struct Table<T> {
    rows: BTreeMap<i64, T>,
    last_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            last_id: 0,
        }
    }
}

impl<T: Record> Table<T> {
    fn get(&self, id: i64) -> Option<T> {
        self.rows.get(&id).cloned()
    }

    fn upsert(&mut self, mut row: T) -> Result<T, RepoError> {
        if row.id() == UNSAVED_ID {
            self.last_id += 1;
            row.set_id(self.last_id);
        } else if !self.rows.contains_key(&row.id()) {
            return Err(RepoError::NotFound);
        }
        self.rows.insert(row.id(), row.clone());
        Ok(row)
    }

    fn remove(&mut self, id: i64) -> Result<T, RepoError> {
        self.rows.remove(&id).ok_or(RepoError::NotFound)
    }
}

#[derive(Default)]
struct Tables {
    users: Table<User>,
    categories: Table<Category>,
    locations: Table<Location>,
    posts: Table<Post>,
    comments: Table<Comment>,
}

impl Tables {
    fn remove_post_with_comments(&mut self, post_id: i64) -> Result<Post, RepoError> {
        let post = self.posts.remove(post_id)?;
        self.comments.rows.retain(|_, c| c.post_id != post_id);
        Ok(post)
    }
}

/// Thread-safe in-memory implementation of every repository port.
#[derive(Default)]
pub struct InMemoryStore {
    tables: RwLock<Tables>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// One shared store behind every repository port.
    pub fn repositories() -> Repositories {
        let store = Arc::new(Self::new());
        Repositories {
            users: store.clone(),
            categories: store.clone(),
            locations: store.clone(),
            posts: store.clone(),
            comments: store,
        }
    }
}

#[async_trait]
impl BaseRepository<User, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepoError> {
        Ok(self.tables.read().await.users.get(id))
    }

    async fn save(&self, user: User) -> Result<User, RepoError> {
        let mut tables = self.tables.write().await;
        let clash = tables
            .users
            .rows
            .values()
            .any(|u| u.username == user.username && u.id != user.id);
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.users.upsert(user)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.users.remove(id)?;

        let owned: Vec<i64> = tables
            .posts
            .rows
            .values()
            .filter(|p| p.author_id == id)
            .map(|p| p.id)
            .collect();
        for post_id in owned {
            tables.remove_post_with_comments(post_id)?;
        }
        tables.comments.rows.retain(|_, c| c.author_id != id);
        Ok(())
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .users
            .rows
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, RepoError> {
        let tables = self.tables.read().await;
        Ok(ids.iter().filter_map(|id| tables.users.get(*id)).collect())
    }
}

#[async_trait]
impl BaseRepository<Category, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Category>, RepoError> {
        Ok(self.tables.read().await.categories.get(id))
    }

    async fn save(&self, category: Category) -> Result<Category, RepoError> {
        let mut tables = self.tables.write().await;
        let clash = tables
            .categories
            .rows
            .values()
            .any(|c| c.slug == category.slug && c.id != category.id);
        if clash {
            return Err(RepoError::Constraint("Entity already exists".to_string()));
        }
        tables.categories.upsert(category)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.categories.remove(id)?;
        for post in tables.posts.rows.values_mut() {
            if post.category_id == Some(id) {
                post.category_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let tables = self.tables.read().await;
        Ok(tables
            .categories
            .rows
            .values()
            .find(|c| c.slug == slug)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let tables = self.tables.read().await;
        let mut all: Vec<Category> = tables.categories.rows.values().cloned().collect();
        all.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(all)
    }
}

#[async_trait]
impl BaseRepository<Location, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Location>, RepoError> {
        Ok(self.tables.read().await.locations.get(id))
    }

    async fn save(&self, location: Location) -> Result<Location, RepoError> {
        self.tables.write().await.locations.upsert(location)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut tables = self.tables.write().await;
        tables.locations.remove(id)?;
        for post in tables.posts.rows.values_mut() {
            if post.location_id == Some(id) {
                post.location_id = None;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl LocationRepository for InMemoryStore {
    async fn list_all(&self) -> Result<Vec<Location>, RepoError> {
        let tables = self.tables.read().await;
        let mut all: Vec<Location> = tables.locations.rows.values().cloned().collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

#[async_trait]
impl BaseRepository<Post, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        Ok(self.tables.read().await.posts.get(id))
    }

    async fn save(&self, post: Post) -> Result<Post, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.users.rows.contains_key(&post.author_id) {
            return Err(RepoError::Constraint("Unknown author".to_string()));
        }
        tables.posts.upsert(post)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.tables.write().await.remove_post_with_comments(id)?;
        Ok(())
    }
}

#[async_trait]
impl PostRepository for InMemoryStore {
    async fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, RepoError> {
        let tables = self.tables.read().await;

        let mut matching: Vec<&Post> = tables
            .posts
            .rows
            .values()
            .filter(|post| {
                let category = post.category_id.and_then(|id| tables.categories.rows.get(&id));
                query.matches(post, category)
            })
            .collect();
        matching.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));

        let previews = matching
            .into_iter()
            .map(|post| PostPreview {
                post: post.clone(),
                author_username: tables
                    .users
                    .rows
                    .get(&post.author_id)
                    .map(|u| u.username.clone())
                    .unwrap_or_default(),
                comment_count: tables
                    .comments
                    .rows
                    .values()
                    .filter(|c| c.post_id == post.id)
                    .count() as u64,
            })
            .collect();

        Ok(Page::from_vec(previews, page))
    }
}

#[async_trait]
impl BaseRepository<Comment, i64> for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, RepoError> {
        Ok(self.tables.read().await.comments.get(id))
    }

    async fn save(&self, mut comment: Comment) -> Result<Comment, RepoError> {
        let mut tables = self.tables.write().await;
        if !tables.posts.rows.contains_key(&comment.post_id) {
            return Err(RepoError::Constraint("Unknown post".to_string()));
        }
        if let Some(existing) = tables.comments.rows.get(&comment.id) {
            comment.created_at = existing.created_at;
        }
        tables.comments.upsert(comment)
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        self.tables.write().await.comments.remove(id)?;
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for InMemoryStore {
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let tables = self.tables.read().await;
        let mut comments: Vec<Comment> = tables
            .comments
            .rows
            .values()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(comments)
    }
}

#[cfg(test)]
mod tests;
