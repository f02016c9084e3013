//! SeaORM entities, one per table.

pub mod category;
pub mod comment;
pub mod location;
pub mod post;
pub mod user;

use sea_orm::ActiveValue;

use blog_core::domain::UNSAVED_ID;

/// Leave the key unset for new rows so the database assigns it.
pub(crate) fn primary_key(id: i64) -> ActiveValue<i64> {
    if id == UNSAVED_ID {
        ActiveValue::NotSet
    } else {
        ActiveValue::Unchanged(id)
    }
}
