//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod media;
mod posts;
mod profile;
mod staff;
mod views;

#[cfg(test)]
mod tests;

use actix_web::{HttpResponse, http::header, web};

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

#[cfg(feature = "rate-limit")]
use crate::middleware::rate_limit::RateLimitMiddleware;

/// Register every route. Stored media is served under `media_url`, the same
/// prefix [`AppState::media_link`] puts in front of image paths.
pub fn configure_routes(cfg: &mut web::ServiceConfig, media_url: &str) {
    let auth = web::scope("/auth")
        .route("/register/", web::post().to(auth::register))
        .route("/login/", web::post().to(auth::login))
        .route("/me/", web::get().to(auth::me));
    #[cfg(feature = "rate-limit")]
    let auth = auth.wrap(RateLimitMiddleware);

    cfg.route("/health", web::get().to(health::health_check))
        .service(auth)
        .route("/", web::get().to(posts::index))
        .service(
            web::scope("/posts")
                .route("/create/", web::get().to(posts::create_form))
                .route("/create/", web::post().to(posts::create))
                .route("/{post_id}/", web::get().to(posts::detail))
                .route("/{post_id}/edit/", web::get().to(posts::edit_form))
                .route("/{post_id}/edit/", web::post().to(posts::edit))
                .route("/{post_id}/delete/", web::post().to(posts::delete))
                .route("/{post_id}/image/", web::post().to(posts::upload_image))
                .route("/{post_id}/comment/", web::post().to(comments::add))
                .route(
                    "/{post_id}/edit_comment/{comment_id}/",
                    web::get().to(comments::edit_form),
                )
                .route(
                    "/{post_id}/edit_comment/{comment_id}/",
                    web::post().to(comments::edit),
                )
                .route(
                    "/{post_id}/delete_comment/{comment_id}/",
                    web::post().to(comments::delete),
                ),
        )
        .route("/category/{slug}/", web::get().to(categories::category_posts))
        .route("/profile/{username}/", web::get().to(profile::profile))
        .route("/edit/", web::get().to(profile::edit_form))
        .route("/edit/", web::post().to(profile::edit))
        .route(&format!("{media_url}{{path:.*}}"), web::get().to(media::serve))
        .service(
            web::scope("/staff")
                .route("/categories/", web::get().to(staff::list_categories))
                .route("/categories/", web::post().to(staff::create_category))
                .route("/categories/{id}/", web::post().to(staff::update_category))
                .route("/categories/{id}/delete/", web::post().to(staff::delete_category))
                .route("/locations/", web::get().to(staff::list_locations))
                .route("/locations/", web::post().to(staff::create_location))
                .route("/locations/{id}/", web::post().to(staff::update_location))
                .route("/locations/{id}/delete/", web::post().to(staff::delete_location)),
        );
}

/// `302 Found` to `location`, the answer to every successful form.
fn redirect(location: impl Into<String>) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location.into()))
        .finish()
}

/// The caller's profile page, by their current username.
async fn own_profile_path(state: &AppState, identity: &Identity) -> AppResult<String> {
    let user = state.blog.current_profile(&identity.viewer()).await?;
    Ok(profile_path(&user.username))
}

fn profile_path(username: &str) -> String {
    format!("/profile/{username}/")
}
