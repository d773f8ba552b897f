//! # PostSystem Infrastructure
//!
//! Concrete implementations of the ports defined in `postsys-core`:
//! storage, token and password handling, request throttling.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory stores only
//! - `postgres` - PostgreSQL storage via SeaORM
//! - `auth` - JWT + Argon2 authentication
//! - `rate-limit` - Rate limiting via governor

pub mod database;

#[cfg(feature = "auth")]
pub mod auth;

#[cfg(feature = "rate-limit")]
pub mod rate_limit;

pub use database::{DatabaseConfig, InMemoryRepository, in_memory_stores};

#[cfg(feature = "postgres")]
pub use database::{DatabaseConnection, postgres_stores};

#[cfg(feature = "auth")]
pub use auth::{Argon2Config, Argon2PasswordService, JwtConfig, JwtTokenService};

#[cfg(feature = "rate-limit")]
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};
