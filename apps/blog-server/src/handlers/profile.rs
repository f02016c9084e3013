//! Profile pages and the own-profile form.

use actix_web::{HttpResponse, web};

use blog_core::domain::ProfileChanges;
use blog_shared::ApiResponse;
use blog_shared::dto::{PageQuery, ProfileForm, ProfilePageResponse};

use super::{profile_path, redirect, views};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /profile/{username}/
pub async fn profile(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let (owner, posts) = state
        .blog
        .profile(&path, &identity.viewer(), query.page)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(ProfilePageResponse {
        profile: views::public_user(owner),
        posts: views::page(posts, |p| views::post_summary(&state, p)),
    })))
}

/// GET /edit/
pub async fn edit_form(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.blog.current_profile(&identity.viewer()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::account(user))))
}

/// POST /edit/
pub async fn edit(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Json<ProfileForm>,
) -> AppResult<HttpResponse> {
    let form = form.into_inner();
    let user = state
        .blog
        .update_profile(
            &identity.viewer(),
            ProfileChanges {
                username: form.username,
                email: form.email,
                first_name: form.first_name,
                last_name: form.last_name,
            },
        )
        .await?;
    Ok(redirect(profile_path(&user.username)))
}
