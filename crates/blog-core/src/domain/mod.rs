//! Domain entities - the core business objects.

mod category;
mod comment;
mod location;
mod post;
mod user;
mod viewer;

pub use category::{Category, CategoryDraft};
pub use comment::{Comment, CommentView};
pub use location::{Location, LocationDraft};
pub use post::{Post, PostDetail, PostDraft, PostPreview};
pub use user::{ProfileChanges, User};
pub use viewer::Viewer;

/// Id carried by an entity that has not been persisted yet.
pub const UNSAVED_ID: i64 = 0;
