use actix_web::{HttpResponse, web};

use blog_shared::ApiResponse;
use blog_shared::dto::{CategoryPageResponse, PageQuery};

use super::views;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /category/{slug}/
pub async fn category_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let (category, posts) = state.blog.category_posts(&path, query.page).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryPageResponse {
        category: views::category(category),
        posts: views::page(posts, |p| views::post_summary(&state, p)),
    })))
}
