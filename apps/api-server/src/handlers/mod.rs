//! HTTP handlers and route configuration.

mod auth;
mod categories;
mod comments;
mod health;
mod posts;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;
use postsys_core::domain::Pagination;
use postsys_shared::dto::ListQuery;

use crate::middleware::error::json_error_handler;

pub const API_PREFIX: &str = "/postSystem/v1";

/// Body extractor settings shared by every JSON route.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(64 * 1024)
        .error_handler(json_error_handler)
}

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(health::health_check))
        .service(
            web::scope(API_PREFIX)
                .service(
                    web::scope("/auth")
                        .route("/register", web::post().to(auth::register))
                        .route("/login", web::post().to(auth::login)),
                )
                .service(
                    web::scope("/users")
                        .route("", web::post().to(users::create))
                        .route("", web::get().to(users::list))
                        .route("/findUser/{id}", web::get().to(users::find))
                        // Must precede `/{id}`
                        .route("/unsubscribe", web::delete().to(users::unsubscribe))
                        .route("/{id}", web::put().to(users::update))
                        .route("/{id}", web::delete().to(users::remove)),
                )
                .service(
                    web::scope("/posts")
                        .route("", web::post().to(posts::create))
                        .route("", web::get().to(posts::list))
                        .route("/findPost/{id}", web::get().to(posts::find))
                        .route("/{id}", web::put().to(posts::update))
                        .route("/{id}", web::delete().to(posts::remove)),
                )
                .service(
                    web::scope("/comments")
                        .route("", web::post().to(comments::create))
                        .route("", web::get().to(comments::list))
                        .route("/findComment/{id}", web::get().to(comments::find))
                        .route("/{id}", web::put().to(comments::update))
                        .route("/{id}", web::delete().to(comments::remove)),
                )
                .service(
                    web::scope("/categories")
                        .route("", web::post().to(categories::create))
                        .route("", web::get().to(categories::list))
                        .route("/findCategory/{id}", web::get().to(categories::find))
                        .route("/{id}", web::put().to(categories::update))
                        .route("/{id}", web::delete().to(categories::remove)),
                ),
        );
}

fn pagination(query: &ListQuery) -> Pagination {
    Pagination::from_raw(query.offset.as_deref(), query.limit.as_deref())
}
