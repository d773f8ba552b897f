//! # PostSystem API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use postsys_core::ports::{PasswordService, TokenService};
use postsys_infra::{Argon2PasswordService, JwtTokenService};

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[cfg(feature = "rate-limit")]
use middleware::rate_limit::RateLimitMiddleware;
#[cfg(feature = "rate-limit")]
use postsys_core::ports::RateLimiter;
#[cfg(feature = "rate-limit")]
use postsys_infra::InMemoryRateLimiter;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting PostSystem API Server on {}:{}",
        config.host,
        config.port
    );

    let passwords = Argon2PasswordService::with_config(config.argon2).map_err(|e| {
        tracing::error!(error = %e, "Invalid password hashing configuration");
        std::io::Error::other(e.to_string())
    })?;
    let passwords: Arc<dyn PasswordService> = Arc::new(passwords);
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(config.jwt.clone()));

    let state = AppState::init(&config, passwords, tokens.clone())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Startup failed");
            std::io::Error::other(e.to_string())
        })?;

    #[cfg(feature = "rate-limit")]
    let limiter: Arc<dyn RateLimiter> =
        Arc::new(InMemoryRateLimiter::new(config.rate_limit.clone()));

    let state = web::Data::new(state);
    let tokens = web::Data::new(tokens);

    HttpServer::new(move || {
        let app = App::new();
        #[cfg(feature = "rate-limit")]
        let app = app.wrap(RateLimitMiddleware::new(limiter.clone()));

        app.wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .app_data(state.clone())
            .app_data(tokens.clone())
            .app_data(handlers::json_config())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
