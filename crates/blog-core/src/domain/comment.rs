use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSAVED_ID;

/// A comment left on a post. `created_at` never changes after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub text: String,
    pub post_id: i64,
    pub author_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(post_id: i64, author_id: i64, text: String) -> Self {
        Self {
            id: UNSAVED_ID,
            text,
            post_id,
            author_id,
            created_at: Utc::now(),
        }
    }
}

/// A comment together with its author's username.
#[derive(Debug, Clone)]
pub struct CommentView {
    pub comment: Comment,
    pub author_username: String,
}
