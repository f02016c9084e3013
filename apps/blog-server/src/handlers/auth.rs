//! Registration, login and the current account.

use std::sync::Arc;

use actix_web::{HttpResponse, web};

use blog_core::ports::{AuthError, PasswordService, TokenService};
use blog_core::validation;
use blog_shared::ApiResponse;
use blog_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use super::views;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(
    tokens: &Arc<dyn TokenService>,
    user_id: i64,
    username: &str,
    roles: Vec<String>,
) -> AppResult<AuthResponse> {
    let access_token = tokens
        .generate_token(user_id, username, roles)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expiration_seconds().max(0) as u64,
    })
}

/// POST /auth/register/
pub async fn register(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    validation::validate_registration(&req.username, &req.email, &req.password)?;

    let password_hash = passwords.hash(&req.password)?;
    let user = state
        .blog
        .register_user(req.username, req.email, password_hash)
        .await?;

    let auth = issue_token(&tokens, user.id, &user.username, user.roles())?;
    Ok(HttpResponse::Created().json(auth))
}

/// POST /auth/login/
pub async fn login(
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    passwords: web::Data<Arc<dyn PasswordService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .blog
        .find_user(&req.username)
        .await?
        .ok_or(AuthError::InvalidCredentials)?;

    if !passwords.verify(&req.password, &user.password_hash)? {
        tracing::info!(user_id = user.id, "Rejected login attempt");
        return Err(AuthError::InvalidCredentials.into());
    }

    let auth = issue_token(&tokens, user.id, &user.username, user.roles())?;
    Ok(HttpResponse::Ok().json(auth))
}

/// GET /auth/me/
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.blog.current_profile(&identity.viewer()).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(views::account(user))))
}
