use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, CommentView, Location, UNSAVED_ID};

/// Post entity - a publication, possibly scheduled for a future date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub author_id: i64,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    /// Path of the image relative to the media root.
    pub image: Option<String>,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Author-submitted post fields.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub text: String,
    pub pub_date: DateTime<Utc>,
    pub location_id: Option<i64>,
    pub category_id: Option<i64>,
    pub is_published: bool,
}

impl Post {
    /// Create a new post owned by `author_id`.
    pub fn new(author_id: i64, draft: PostDraft) -> Self {
        Self {
            id: UNSAVED_ID,
            title: draft.title,
            text: draft.text,
            pub_date: draft.pub_date,
            author_id,
            location_id: draft.location_id,
            category_id: draft.category_id,
            image: None,
            is_published: draft.is_published,
            created_at: Utc::now(),
        }
    }

    /// Overwrite the editable fields. Author, image and creation time stay.
    pub fn apply(&mut self, draft: PostDraft) {
        self.title = draft.title;
        self.text = draft.text;
        self.pub_date = draft.pub_date;
        self.location_id = draft.location_id;
        self.category_id = draft.category_id;
        self.is_published = draft.is_published;
    }

    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.author_id == user_id
    }
}

/// A post as it appears in listings.
#[derive(Debug, Clone)]
pub struct PostPreview {
    pub post: Post,
    pub author_username: String,
    pub comment_count: u64,
}

/// Everything the detail page shows.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author_username: String,
    pub category: Option<Category>,
    pub location: Option<Location>,
    pub comments: Vec<CommentView>,
}
