//! Application configuration loaded from environment variables.

use std::env;

use postsys_core::service::bootstrap::AdminSeed;
use postsys_infra::{Argon2Config, DatabaseConfig, JwtConfig};

#[cfg(feature = "rate-limit")]
use postsys_infra::RateLimitConfig;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Absent when `DATABASE_URL` is unset; the server then runs on in-memory stores.
    pub database: Option<DatabaseConfig>,
    pub jwt: JwtConfig,
    pub argon2: Argon2Config,
    #[cfg(feature = "rate-limit")]
    pub rate_limit: RateLimitConfig,
    pub admin: AdminSeed,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            jwt: JwtConfig::from_env(),
            argon2: Argon2Config::from_env(),
            #[cfg(feature = "rate-limit")]
            rate_limit: RateLimitConfig::from_env(),
            admin: Self::admin_seed(),
        }
    }

    /// `ADMIN_EMAIL` / `ADMIN_PASSWORD` override the seeded administrator's credentials.
    fn admin_seed() -> AdminSeed {
        let defaults = AdminSeed::default();
        AdminSeed {
            email: env::var("ADMIN_EMAIL").unwrap_or(defaults.email),
            password: env::var("ADMIN_PASSWORD").unwrap_or(defaults.password),
            ..defaults
        }
    }
}
