use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::UNSAVED_ID;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub id: i64,
    pub name: String,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct LocationDraft {
    pub name: String,
    pub is_published: bool,
}

impl Location {
    pub fn new(draft: LocationDraft) -> Self {
        Self {
            id: UNSAVED_ID,
            name: draft.name,
            is_published: draft.is_published,
            created_at: Utc::now(),
        }
    }

    pub fn apply(&mut self, draft: LocationDraft) {
        self.name = draft.name;
        self.is_published = draft.is_published;
    }
}
