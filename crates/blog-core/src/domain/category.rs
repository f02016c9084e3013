use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSAVED_ID;

/// A thematic category; its slug addresses the category page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

/// Staff-submitted category fields.
#[derive(Debug, Clone)]
pub struct CategoryDraft {
    pub title: String,
    pub description: String,
    pub slug: String,
    pub is_published: bool,
}

impl Category {
    pub fn new(draft: CategoryDraft) -> Self {
        Self {
            id: UNSAVED_ID,
            title: draft.title,
            description: draft.description,
            slug: draft.slug,
            is_published: draft.is_published,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, draft: CategoryDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.slug = draft.slug;
        self.is_published = draft.is_published;
    }
}
