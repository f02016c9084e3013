//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use blog_core::service::BlogSettings;
use blog_infra::JwtConfig;
use blog_infra::database::DatabaseConfig;

#[cfg(feature = "rate-limit")]
use blog_infra::RateLimitConfig;

use crate::telemetry::TelemetryConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// `None` runs the server on the in-memory store.
    pub database: Option<DatabaseConfig>,
    pub media_root: PathBuf,
    /// Public prefix of stored media, e.g. `/media/`.
    pub media_url: String,
    pub blog: BlogSettings,
    pub jwt: JwtConfig,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let database = lookup("DATABASE_URL").map(|url| DatabaseConfig {
            url,
            max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 20),
            min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 2),
            sqlx_logging: parse_or(&lookup, "DB_LOG_STATEMENTS", false),
        });

        let mut media_url = lookup("MEDIA_URL").unwrap_or_else(|| "/media/".to_string());
        if !media_url.starts_with('/') {
            media_url.insert(0, '/');
        }
        if !media_url.ends_with('/') {
            media_url.push('/');
        }

        let defaults = JwtConfig::default();
        let jwt = JwtConfig {
            secret: lookup("JWT_SECRET").unwrap_or(defaults.secret),
            expiration_hours: parse_or(&lookup, "JWT_EXPIRATION_HOURS", defaults.expiration_hours),
            issuer: lookup("JWT_ISSUER").unwrap_or(defaults.issuer),
        };

        Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080),
            database,
            media_root: lookup("MEDIA_ROOT")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("media")),
            media_url,
            blog: BlogSettings {
                page_size: parse_or(&lookup, "PAGE_SIZE", 10u64).max(1),
                max_image_bytes: parse_or(&lookup, "MAX_UPLOAD_BYTES", 5 * 1024 * 1024),
            },
            jwt,
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig {
                max_requests: parse_or(&lookup, "RATE_LIMIT_MAX_REQUESTS", 20),
                window: std::time::Duration::from_secs(parse_or(
                    &lookup,
                    "RATE_LIMIT_WINDOW_SECS",
                    60,
                )),
            },
            telemetry: TelemetryConfig::from_lookup(&lookup),
        }
    }

    pub fn is_production(&self) -> bool {
        self.telemetry.environment == "production" || self.telemetry.environment == "prod"
    }
}

fn parse_or<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T {
    lookup(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}
