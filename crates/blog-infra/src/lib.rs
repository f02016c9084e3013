//! # Blog Infrastructure
//!
//! Concrete implementations of the ports defined in `blog-core`.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No database, in-memory storage only
//! - `postgres` - PostgreSQL repositories via SeaORM
//! - `rate-limit` - Rate limiting via governor

pub mod auth;
pub mod database;
pub mod media;
pub mod memory;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use auth::{Argon2PasswordService, DEFAULT_JWT_SECRET, JwtConfig, JwtTokenService};
pub use media::{InMemoryMediaStorage, LocalMediaStorage};
pub use memory::InMemoryStore;

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
