//! Comment forms. Every success leads back to the post.

use actix_web::{HttpResponse, web};

use blog_core::domain::CommentView;
use blog_shared::ApiResponse;
use blog_shared::dto::CommentForm;

use super::{redirect, views};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppResult, post_path};
use crate::state::AppState;

/// POST /posts/{post_id}/comment/
pub async fn add(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    form: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    state
        .blog
        .add_comment(&identity.viewer(), post_id, form.into_inner().text)
        .await?;
    Ok(redirect(post_path(post_id)))
}

/// GET /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    let viewer = identity.viewer();
    let comment = state
        .blog
        .comment_for_edit(&viewer, post_id, comment_id)
        .await?;
    let author = state.blog.current_profile(&viewer).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::comment(CommentView {
        comment,
        author_username: author.username,
    }))))
}

/// POST /posts/{post_id}/edit_comment/{comment_id}/
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
    form: web::Json<CommentForm>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .blog
        .update_comment(&identity.viewer(), post_id, comment_id, form.into_inner().text)
        .await?;
    Ok(redirect(post_path(post_id)))
}

/// POST /posts/{post_id}/delete_comment/{comment_id}/
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(i64, i64)>,
) -> AppResult<HttpResponse> {
    let (post_id, comment_id) = path.into_inner();
    state
        .blog
        .delete_comment(&identity.viewer(), post_id, comment_id)
        .await?;
    Ok(redirect(post_path(post_id)))
}
