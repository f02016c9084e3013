//! # Blog API Server
//!
//! Actix-web entry point.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use blog_core::ports::{PasswordService, TokenService};
use blog_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    telemetry::init_telemetry(&config.telemetry);

    if config.jwt.uses_default_secret() {
        if config.is_production() {
            tracing::error!(
                "SECURITY: Using default JWT secret in production! Set JWT_SECRET environment variable."
            );
        } else {
            tracing::warn!("Using default JWT secret. Set JWT_SECRET for production use.");
        }
    }

    tracing::info!("Starting blog server on {}:{}", config.host, config.port);

    let state = AppState::new(&config).await?;
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));
    let passwords: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());

    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn blog_core::ports::RateLimiter> = Arc::new(
        blog_infra::InMemoryRateLimiter::new(config.rate_limit.clone()),
    );

    let upload_limit = config.blog.max_image_bytes;

    HttpServer::new(move || {
        let app = App::new()
            .wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(tokens.clone()))
            .app_data(web::Data::new(passwords.clone()))
            .app_data(web::PayloadConfig::new(upload_limit));

        #[cfg(feature = "rate-limit")]
        let app = app.app_data(web::Data::new(limiter.clone()));

        app.configure(|cfg| handlers::configure_routes(cfg, &state.media_url))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
