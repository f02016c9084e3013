//! Catalogue management for staff users.

use actix_web::{HttpResponse, web};

use blog_core::domain::{CategoryDraft, LocationDraft};
use blog_core::ports::AuthError;
use blog_shared::ApiResponse;
use blog_shared::dto::{CategoryForm, LocationForm};

use super::{redirect, views};
use crate::middleware::auth::{Identity, STAFF_ROLE};
use crate::middleware::error::AppResult;
use crate::state::AppState;

const CATEGORIES_PATH: &str = "/staff/categories/";
const LOCATIONS_PATH: &str = "/staff/locations/";

fn require_staff(identity: &Identity) -> AppResult<()> {
    if identity.has_role(STAFF_ROLE) {
        Ok(())
    } else {
        tracing::info!(user_id = identity.user_id, "Staff page refused");
        Err(AuthError::InsufficientPermissions.into())
    }
}

fn category_draft(form: CategoryForm) -> CategoryDraft {
    CategoryDraft {
        title: form.title,
        description: form.description,
        slug: form.slug,
        is_published: form.is_published,
    }
}

fn location_draft(form: LocationForm) -> LocationDraft {
    LocationDraft {
        name: form.name,
        is_published: form.is_published,
    }
}

/// GET /staff/categories/
pub async fn list_categories(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    let choices = state.blog.catalogue().await?;
    let categories: Vec<_> = choices.categories.into_iter().map(views::category).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// POST /staff/categories/
pub async fn create_category(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Json<CategoryForm>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    state
        .blog
        .create_category(category_draft(form.into_inner()))
        .await?;
    Ok(redirect(CATEGORIES_PATH))
}

/// POST /staff/categories/{id}/
pub async fn update_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    form: web::Json<CategoryForm>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    state
        .blog
        .update_category(path.into_inner(), category_draft(form.into_inner()))
        .await?;
    Ok(redirect(CATEGORIES_PATH))
}

/// POST /staff/categories/{id}/delete/
pub async fn delete_category(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    state.blog.delete_category(path.into_inner()).await?;
    Ok(redirect(CATEGORIES_PATH))
}

/// GET /staff/locations/
pub async fn list_locations(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    let choices = state.blog.catalogue().await?;
    let locations: Vec<_> = choices.locations.into_iter().map(views::location).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(locations)))
}

/// POST /staff/locations/
pub async fn create_location(
    state: web::Data<AppState>,
    identity: Identity,
    form: web::Json<LocationForm>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    state
        .blog
        .create_location(location_draft(form.into_inner()))
        .await?;
    Ok(redirect(LOCATIONS_PATH))
}

/// POST /staff/locations/{id}/
pub async fn update_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
    form: web::Json<LocationForm>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    state
        .blog
        .update_location(path.into_inner(), location_draft(form.into_inner()))
        .await?;
    Ok(redirect(LOCATIONS_PATH))
}

/// POST /staff/locations/{id}/delete/
pub async fn delete_location(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<i64>,
) -> AppResult<HttpResponse> {
    require_staff(&identity)?;
    state.blog.delete_location(path.into_inner()).await?;
    Ok(redirect(LOCATIONS_PATH))
}
