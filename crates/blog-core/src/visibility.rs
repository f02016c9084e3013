//! Which posts a viewer may see.
//!
//! A post is public when it is published, its publication date has passed and
//! its category (if it has one) is published. Authors always see their own
//! posts. Everything else is reported as not found.

use chrono::{DateTime, Utc};

use crate::domain::{Category, Post, Viewer};

/// Whether `post` is visible to everybody at `now`.
///
/// Posts without a category count as visible.
pub fn is_publicly_visible(post: &Post, category: Option<&Category>, now: DateTime<Utc>) -> bool {
    post.is_published && post.pub_date <= now && category.is_none_or(|c| c.is_published)
}

/// Whether `viewer` may open the detail page of `post`.
pub fn can_view(
    viewer: &Viewer,
    post: &Post,
    category: Option<&Category>,
    now: DateTime<Utc>,
) -> bool {
    viewer.is(post.author_id) || is_publicly_visible(post, category, now)
}

/// Visibility restriction of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Only posts publicly visible at the given instant.
    Public { now: DateTime<Utc> },
    /// Every post matching the other filters.
    Unrestricted,
}

/// Declarative filter for post listings, translated by each repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostQuery {
    pub author_id: Option<i64>,
    pub category_id: Option<i64>,
    pub visibility: Visibility,
}

impl PostQuery {
    /// Publicly visible posts, newest publication first.
    pub fn public(now: DateTime<Utc>) -> Self {
        Self {
            author_id: None,
            category_id: None,
            visibility: Visibility::Public { now },
        }
    }

    /// No visibility restriction. Only meant for an author's own profile.
    pub fn unrestricted() -> Self {
        Self {
            author_id: None,
            category_id: None,
            visibility: Visibility::Unrestricted,
        }
    }

    /// Posts on a profile page: everything for the owner, public ones otherwise.
    pub fn for_profile(owner_id: i64, viewer: &Viewer, now: DateTime<Utc>) -> Self {
        let base = if viewer.is(owner_id) {
            Self::unrestricted()
        } else {
            Self::public(now)
        };
        base.by_author(owner_id)
    }

    pub fn by_author(mut self, author_id: i64) -> Self {
        self.author_id = Some(author_id);
        self
    }

    pub fn in_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Evaluate the filter against a single post, for stores without a query engine.
    pub fn matches(&self, post: &Post, category: Option<&Category>) -> bool {
        if self.author_id.is_some_and(|id| id != post.author_id) {
            return false;
        }
        if self.category_id.is_some() && self.category_id != post.category_id {
            return false;
        }
        match self.visibility {
            Visibility::Public { now } => is_publicly_visible(post, category, now),
            Visibility::Unrestricted => true,
        }
    }
}
