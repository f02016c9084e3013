//! Authorization checks run before any mutation.
//!
//! Handlers resolve the target with the viewer's visibility first, so these
//! checks only ever see resources the viewer is allowed to know about.

use crate::domain::Viewer;
use crate::error::DomainError;

/// The viewer must be logged in. Returns their user id.
pub fn require_login(viewer: &Viewer) -> Result<i64, DomainError> {
    viewer.user_id().ok_or(DomainError::Unauthenticated)
}

/// The viewer must be `author_id`. `post_id` is where a refused viewer is sent back to.
pub fn require_author(viewer: &Viewer, author_id: i64, post_id: i64) -> Result<i64, DomainError> {
    let user_id = require_login(viewer)?;
    if user_id != author_id {
        tracing::debug!(user_id, author_id, post_id, "Mutation refused: not the author");
        return Err(DomainError::NotAuthor { post_id });
    }
    Ok(user_id)
}
