//! Post pages and forms.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use blog_core::domain::PostDraft;
use blog_shared::ApiResponse;
use blog_shared::dto::{PageQuery, PostEditResponse, PostForm, PostFormChoicesResponse};

use super::{own_profile_path, redirect, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppResult, post_path};
use crate::state::AppState;

fn draft(form: PostForm) -> PostDraft {
    PostDraft {
        title: form.title,
        text: form.text,
        pub_date: form.pub_date,
        location_id: form.location_id,
        category_id: form.category_id,
        is_published: form.is_published,
    }
}

/// GET /
pub async fn index(
    state: web::Data<AppState>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state.blog.index(query.page).await?;
    let body = views::page(posts, |p| views::post_summary(&state, p));
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body)))
}

/// GET /posts/create/
pub async fn create_form(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let choices = state.blog.form_choices().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostFormChoicesResponse {
        categories: choices.categories.into_iter().map(views::category).collect(),
        locations: choices.locations.into_iter().map(views::location).collect(),
    })))
}

/// POST /posts/create/
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    state
        .blog
        .create_post(&identity.viewer(), draft(form.into_inner()))
        .await?;
    Ok(redirect(own_profile_path(&state, &identity).await?))
}

/// GET /posts/{post_id}/
pub async fn detail(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let detail = state
        .blog
        .post_detail(path.into_inner(), &identity.viewer())
        .await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::post_detail(&state, detail))))
}

/// GET /posts/{post_id}/edit/
pub async fn edit_form(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    let post = state
        .blog
        .post_for_edit(&identity.viewer(), path.into_inner())
        .await?;
    let choices = state.blog.form_choices().await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostEditResponse {
        id: post.id,
        form: views::post_form(&post),
        image_url: post.image.as_deref().map(|p| state.media_link(p)),
        categories: choices.categories.into_iter().map(views::category).collect(),
        locations: choices.locations.into_iter().map(views::location).collect(),
    })))
}

/// POST /posts/{post_id}/edit/
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    form: web::Json<PostForm>,
) -> AppResult<HttpResponse> {
    state
        .blog
        .update_post(&identity.viewer(), path.into_inner(), draft(form.into_inner()))
        .await?;
    Ok(redirect(own_profile_path(&state, &identity).await?))
}

/// POST /posts/{post_id}/delete/
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    state
        .blog
        .delete_post(&identity.viewer(), path.into_inner())
        .await?;
    Ok(redirect(own_profile_path(&state, &identity).await?))
}

/// POST /posts/{post_id}/image/ with the raw image as body.
pub async fn upload_image(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();

    state
        .blog
        .attach_image(&identity.viewer(), post_id, content_type, body.to_vec())
        .await?;
    Ok(redirect(post_path(post_id)))
}
