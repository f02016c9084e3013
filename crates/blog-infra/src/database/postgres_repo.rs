//! PostgreSQL repository implementations.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, Condition, DbConn, EntityTrait, JoinType, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Select,
};

use blog_core::domain::{Category, Comment, Location, PostPreview, User};
use blog_core::error::RepoError;
use blog_core::pagination::{Page, PageRequest};
use blog_core::ports::{
    CategoryRepository, CommentRepository, LocationRepository, PostRepository, UserRepository,
};
use blog_core::service::Repositories;
use blog_core::visibility::{PostQuery, Visibility};

use super::entity::category::{self, Entity as CategoryEntity};
use super::entity::comment::{self, Entity as CommentEntity};
use super::entity::location::{self, Entity as LocationEntity};
use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;
pub type PostgresCategoryRepository = PostgresBaseRepository<CategoryEntity>;
pub type PostgresLocationRepository = PostgresBaseRepository<LocationEntity>;
pub type PostgresPostRepository = PostgresBaseRepository<PostEntity>;
pub type PostgresCommentRepository = PostgresBaseRepository<CommentEntity>;

/// Every repository backed by one connection pool.
pub fn postgres_repositories(db: DbConn) -> Repositories {
    Repositories {
        users: Arc::new(PostgresUserRepository::new(db.clone())),
        categories: Arc::new(PostgresCategoryRepository::new(db.clone())),
        locations: Arc::new(PostgresLocationRepository::new(db.clone())),
        posts: Arc::new(PostgresPostRepository::new(db.clone())),
        comments: Arc::new(PostgresCommentRepository::new(db)),
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<User>, RepoError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let result = UserEntity::find()
            .filter(user::Column::Id.is_in(ids.iter().copied()))
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl CategoryRepository for PostgresCategoryRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Category>, RepoError> {
        let result = CategoryEntity::find()
            .filter(category::Column::Slug.eq(slug))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }

    async fn list_all(&self) -> Result<Vec<Category>, RepoError> {
        let result = CategoryEntity::find()
            .order_by_asc(category::Column::Title)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl LocationRepository for PostgresLocationRepository {
    async fn list_all(&self) -> Result<Vec<Location>, RepoError> {
        let result = LocationEntity::find()
            .order_by_asc(location::Column::Name)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}

/// Published, already due, and not filed under a hidden category.
pub(crate) fn public_condition(now: DateTime<Utc>) -> Condition {
    Condition::all()
        .add(post::Column::IsPublished.eq(true))
        .add(post::Column::PubDate.lte(now))
        .add(
            Condition::any()
                .add(post::Column::CategoryId.is_null())
                .add(category::Column::IsPublished.eq(true)),
        )
}

/// The SELECT behind every post listing.
pub(crate) fn listing_select(query: &PostQuery) -> Select<PostEntity> {
    let mut select = PostEntity::find()
        .join(JoinType::LeftJoin, post::Relation::Category.def())
        .order_by_desc(post::Column::PubDate)
        .order_by_desc(post::Column::Id);

    if let Some(author_id) = query.author_id {
        select = select.filter(post::Column::AuthorId.eq(author_id));
    }
    if let Some(category_id) = query.category_id {
        select = select.filter(post::Column::CategoryId.eq(category_id));
    }
    if let Visibility::Public { now } = query.visibility {
        select = select.filter(public_condition(now));
    }

    select
}

async fn comment_counts(db: &DbConn, post_ids: &[i64]) -> Result<HashMap<i64, u64>, RepoError> {
    if post_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, i64)> = CommentEntity::find()
        .select_only()
        .column(comment::Column::PostId)
        .column_as(Expr::col(comment::Column::Id).count(), "comment_count")
        .filter(comment::Column::PostId.is_in(post_ids.iter().copied()))
        .group_by(comment::Column::PostId)
        .into_tuple()
        .all(db)
        .await
        .map_err(map_db_err)?;

    Ok(rows
        .into_iter()
        .map(|(post_id, count)| (post_id, count.max(0) as u64))
        .collect())
}

async fn usernames(db: &DbConn, user_ids: &[i64]) -> Result<HashMap<i64, String>, RepoError> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let rows: Vec<(i64, String)> = UserEntity::find()
        .select_only()
        .column(user::Column::Id)
        .column(user::Column::Username)
        .filter(user::Column::Id.is_in(user_ids.iter().copied()))
        .into_tuple()
        .all(db)
        .await
        .map_err(map_db_err)?;

    Ok(rows.into_iter().collect())
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Page<PostPreview>, RepoError> {
        let paginator = listing_select(query).paginate(&self.db, page.per_page);
        let total = paginator.num_items().await.map_err(map_db_err)?;
        let models = paginator.fetch_page(page.index()).await.map_err(map_db_err)?;

        let post_ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut author_ids: Vec<i64> = models.iter().map(|m| m.author_id).collect();
        author_ids.sort_unstable();
        author_ids.dedup();

        let counts = comment_counts(&self.db, &post_ids).await?;
        let authors = usernames(&self.db, &author_ids).await?;

        tracing::debug!(?query, page = page.number, total, "Listed posts");

        let previews = models
            .into_iter()
            .map(|model| PostPreview {
                comment_count: counts.get(&model.id).copied().unwrap_or(0),
                author_username: authors.get(&model.author_id).cloned().unwrap_or_default(),
                post: model.into(),
            })
            .collect();

        Ok(Page::new(previews, page, total))
    }
}

#[async_trait]
impl CommentRepository for PostgresCommentRepository {
    async fn list_for_post(&self, post_id: i64) -> Result<Vec<Comment>, RepoError> {
        let result = CommentEntity::find()
            .filter(comment::Column::PostId.eq(post_id))
            .order_by_asc(comment::Column::CreatedAt)
            .order_by_asc(comment::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.into_iter().map(Into::into).collect())
    }
}
