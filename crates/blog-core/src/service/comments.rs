use super::BlogService;
use crate::domain::{Comment, CommentView, Viewer};
use crate::error::DomainError;
use crate::policy;
use crate::validation;

impl BlogService {
    pub async fn add_comment(
        &self,
        viewer: &Viewer,
        post_id: i64,
        text: String,
    ) -> Result<Comment, DomainError> {
        let author_id = policy::require_login(viewer)?;
        let post = self.visible_post(post_id, viewer).await?;
        validation::validate_comment(&text)?;

        let comment = self
            .repos
            .comments
            .save(Comment::new(post.id, author_id, text))
            .await?;
        tracing::info!(post_id, comment_id = comment.id, author_id, "Comment added");
        Ok(comment)
    }

    /// The comment as its author is about to edit it.
    pub async fn comment_for_edit(
        &self,
        viewer: &Viewer,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        self.owned_comment(viewer, post_id, comment_id).await
    }

    /// Change the text of a comment. Its creation time is kept.
    pub async fn update_comment(
        &self,
        viewer: &Viewer,
        post_id: i64,
        comment_id: i64,
        text: String,
    ) -> Result<Comment, DomainError> {
        let mut comment = self.owned_comment(viewer, post_id, comment_id).await?;
        validation::validate_comment(&text)?;

        comment.text = text;
        let comment = self.repos.comments.save(comment).await?;
        tracing::info!(post_id, comment_id, "Comment updated");
        Ok(comment)
    }

    pub async fn delete_comment(
        &self,
        viewer: &Viewer,
        post_id: i64,
        comment_id: i64,
    ) -> Result<(), DomainError> {
        let comment = self.owned_comment(viewer, post_id, comment_id).await?;
        self.repos.comments.delete(comment.id).await?;
        tracing::info!(post_id, comment_id, "Comment deleted");
        Ok(())
    }

    /// Comments of a post, oldest first, with author names.
    pub(super) async fn comments_of(&self, post_id: i64) -> Result<Vec<CommentView>, DomainError> {
        let comments = self.repos.comments.list_for_post(post_id).await?;
        let author_ids: Vec<i64> = comments.iter().map(|c| c.author_id).collect();
        let names = self.usernames(&author_ids).await?;

        Ok(comments
            .into_iter()
            .map(|comment| CommentView {
                author_username: names.get(&comment.author_id).cloned().unwrap_or_default(),
                comment,
            })
            .collect())
    }

    /// A comment on a post the viewer can see, belonging to the viewer.
    async fn owned_comment(
        &self,
        viewer: &Viewer,
        post_id: i64,
        comment_id: i64,
    ) -> Result<Comment, DomainError> {
        policy::require_login(viewer)?;
        let post = self.visible_post(post_id, viewer).await?;

        let comment = self
            .repos
            .comments
            .find_by_id(comment_id)
            .await?
            .filter(|c| c.post_id == post.id)
            .ok_or_else(|| DomainError::not_found("comment", comment_id))?;

        policy::require_author(viewer, comment.author_id, post.id)?;
        Ok(comment)
    }
}
