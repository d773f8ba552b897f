use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use serde_json::{Value, json};
use uuid::Uuid;

use postsys_core::ports::{CategoryRepository, PasswordService, TokenService, UserRepository};
use postsys_core::service::Stores;
use postsys_core::service::bootstrap::{AdminSeed, DEFAULT_CATEGORY};
use postsys_infra::{
    Argon2Config, Argon2PasswordService, JwtConfig, JwtTokenService, in_memory_stores,
};

use super::{API_PREFIX, configure_routes, json_config};
use crate::state::{AppState, StoreBackend, seed};

struct Ctx {
    stores: Stores,
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    admin_token: String,
}

impl Ctx {
    async fn new() -> Self {
        let stores = in_memory_stores();
        // Minimum Argon2 cost keeps request-level tests fast.
        let passwords: Arc<dyn PasswordService> = Arc::new(
            Argon2PasswordService::with_config(Argon2Config {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            })
            .unwrap(),
        );
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "handler-tests".to_string(),
            ..JwtConfig::default()
        }));

        seed(&stores, passwords.as_ref(), &AdminSeed::default())
            .await
            .unwrap();
        let state = AppState::new(&stores, StoreBackend::Memory, passwords, tokens.clone());
        let admin_token = state
            .accounts
            .login("admin@gmail.com", "Admin123")
            .await
            .unwrap()
            .token;

        Self {
            stores,
            state: web::Data::new(state),
            tokens: web::Data::new(tokens),
            admin_token,
        }
    }

    async fn general_category(&self) -> Uuid {
        self.stores
            .categories
            .find_by_name(DEFAULT_CATEGORY)
            .await
            .unwrap()
            .unwrap()
            .id
    }
}

macro_rules! init_app {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .app_data($ctx.tokens.clone())
                .app_data(json_config())
                .configure(configure_routes),
        )
        .await
    };
}

fn url(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Register a fresh account and return `(user id, token)`.
macro_rules! register {
    ($app:expr, $email:expr) => {{
        let req = test::TestRequest::post()
            .uri(&url("/auth/register"))
            .set_json(json!({
                "name": "Ada",
                "surname": "Lovelace",
                "username": "ada",
                "email": $email,
                "password": "correct-horse"
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let id: Uuid = body["user"]["id"].as_str().unwrap().parse().unwrap();
        (id, body["accessToken"].as_str().unwrap().to_string())
    }};
}

macro_rules! create_post {
    ($app:expr, $token:expr, $category:expr, $title:expr) => {{
        let req = test::TestRequest::post()
            .uri(&url("/posts"))
            .insert_header(bearer($token))
            .set_json(json!({ "title": $title, "category": $category, "content": "body" }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["post"]["id"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn health_reports_store_backend() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/health").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"], "memory");
}

#[actix_web::test]
async fn register_returns_token_without_password() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&url("/auth/register"))
        .set_json(json!({
            "name": "Ada",
            "surname": "Lovelace",
            "username": "ada",
            "email": "ada@example.com",
            "password": "correct-horse"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["role"], "USER_ROLE");
    assert_eq!(body["tokenType"], "Bearer");
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());

    let stored = ctx
        .stores
        .users
        .find_by_email("ada@example.com")
        .await
        .unwrap()
        .unwrap();
    assert!(stored.password_hash.starts_with("$argon2id$v=19$m=8,t=1,p=1$"));
}

#[actix_web::test]
async fn duplicate_email_is_rejected() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    register!(app, "dup@example.com");

    let req = test::TestRequest::post()
        .uri(&url("/auth/register"))
        .set_json(json!({
            "name": "Other",
            "surname": "Person",
            "username": "other",
            "email": "dup@example.com",
            "password": "another-pass"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn login_with_wrong_password_is_unauthorized() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&url("/auth/login"))
        .set_json(json!({ "email": "admin@gmail.com", "password": "nope" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["status"], 401);
}

#[actix_web::test]
async fn mutations_require_bearer_token() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;

    let req = test::TestRequest::post()
        .uri(&url("/posts"))
        .set_json(json!({ "title": "t", "category": category, "content": "c" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri(&url("/posts"))
        .insert_header((header::AUTHORIZATION, "Token abc"))
        .set_json(json!({ "title": "t", "category": category, "content": "c" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn post_owner_is_taken_from_token() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;
    let (user_id, token) = register!(app, "owner@example.com");

    let req = test::TestRequest::post()
        .uri(&url("/posts"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "Hello", "category": category, "content": "World" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["keeper"], user_id.to_string());
    assert_eq!(body["post"]["active"], true);
    assert_eq!(body["post"]["title"], "Hello");
}

#[actix_web::test]
async fn post_with_unknown_category_is_rejected() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (_, token) = register!(app, "writer@example.com");

    let req = test::TestRequest::post()
        .uri(&url("/posts"))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "t", "category": Uuid::new_v4(), "content": "c" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "category");

    let resp = test::call_service(&app, test::TestRequest::get().uri(&url("/posts")).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 0);
}

#[actix_web::test]
async fn missing_title_is_a_validation_error() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;
    let (_, token) = register!(app, "writer@example.com");

    let req = test::TestRequest::post()
        .uri(&url("/posts"))
        .insert_header(bearer(&token))
        .set_json(json!({ "category": category, "content": "c" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["message"], "title is required");
}

#[actix_web::test]
async fn malformed_body_uses_error_envelope() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::post()
        .uri(&url("/auth/login"))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn list_is_paginated() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;
    let (_, token) = register!(app, "writer@example.com");
    for i in 0..5 {
        create_post!(app, &token, category, format!("post {i}"));
    }

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&url("/posts?offset=0&limit=2")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 5);
    assert_eq!(body["posts"].as_array().unwrap().len(), 2);
    assert_eq!(body["posts"][0]["title"], "post 0");

    let resp = test::call_service(
        &app,
        test::TestRequest::get().uri(&url("/posts?offset=-3&limit=abc")).to_request(),
    )
    .await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["posts"].as_array().unwrap().len(), 5);
}

#[actix_web::test]
async fn other_user_cannot_modify_post_but_admin_can() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;
    let (_, owner) = register!(app, "owner@example.com");
    let (_, intruder) = register!(app, "intruder@example.com");
    let post_id = create_post!(app, &owner, category, "mine");

    let req = test::TestRequest::put()
        .uri(&url(&format!("/posts/{post_id}")))
        .insert_header(bearer(&intruder))
        .set_json(json!({ "title": "hijacked" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/posts/{post_id}")))
        .insert_header(bearer(&intruder))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&url(&format!("/posts/{post_id}")))
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "title": "moderated" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["title"], "moderated");
}

#[actix_web::test]
async fn soft_deleted_post_is_hidden_from_list_but_findable() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;
    let (_, token) = register!(app, "writer@example.com");
    let post_id = create_post!(app, &token, category, "short-lived");

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/posts/{post_id}")))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["post"]["active"], false);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&url("/posts")).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 0);

    let req = test::TestRequest::get()
        .uri(&url(&format!("/posts/findPost/{post_id}")))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let req = test::TestRequest::put()
        .uri(&url(&format!("/posts/{post_id}")))
        .insert_header(bearer(&token))
        .set_json(json!({ "title": "back" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn comment_on_unknown_post_is_rejected() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (_, token) = register!(app, "reader@example.com");

    let req = test::TestRequest::post()
        .uri(&url("/comments"))
        .insert_header(bearer(&token))
        .set_json(json!({ "content": "nice", "postId": Uuid::new_v4() }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["field"], "postId");
}

#[actix_web::test]
async fn comment_is_kept_by_caller_and_post() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let category = ctx.general_category().await;
    let (user_id, token) = register!(app, "reader@example.com");
    let post_id = create_post!(app, &token, category, "topic");

    let req = test::TestRequest::post()
        .uri(&url("/comments"))
        .insert_header(bearer(&token))
        .set_json(json!({ "content": "nice", "postId": post_id }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["comment"]["keeperUser"], user_id.to_string());
    assert_eq!(body["comment"]["keeperPost"], post_id);
}

#[actix_web::test]
async fn categories_are_admin_managed() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (_, token) = register!(app, "user@example.com");

    let req = test::TestRequest::post()
        .uri(&url("/categories"))
        .insert_header(bearer(&token))
        .set_json(json!({ "name": "Rust" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&url("/categories"))
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "name": "Rust" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(&url("/categories"))
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "name": "Rust" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let resp = test::call_service(&app, test::TestRequest::get().uri(&url("/categories")).to_request()).await;
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["total"], 2);
}

#[actix_web::test]
async fn find_user_rejects_non_uuid_id() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::get().uri(&url("/users/findUser/42")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&url(&format!("/users/findUser/{}", Uuid::new_v4())))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn only_admin_creates_and_deletes_users() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (victim, token) = register!(app, "user@example.com");
    let new_user = json!({
        "name": "Grace",
        "surname": "Hopper",
        "username": "grace",
        "email": "grace@example.com",
        "password": "cobol-rules",
        "role": "ADMIN_ROLE"
    });

    let req = test::TestRequest::post()
        .uri(&url("/users"))
        .insert_header(bearer(&token))
        .set_json(&new_user)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&url("/users"))
        .insert_header(bearer(&ctx.admin_token))
        .set_json(&new_user)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["role"], "ADMIN_ROLE");

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/users/{victim}")))
        .insert_header(bearer(&token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&url(&format!("/users/{victim}")))
        .insert_header(bearer(&ctx.admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn password_update_is_rehashed() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (user_id, token) = register!(app, "user@example.com");

    let req = test::TestRequest::put()
        .uri(&url(&format!("/users/{user_id}")))
        .insert_header(bearer(&token))
        .set_json(json!({ "password": "brand-new-secret" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri(&url("/auth/login"))
        .set_json(json!({ "email": "user@example.com", "password": "brand-new-secret" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn user_update_checks_target_and_ownership_before_password() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (alice, _) = register!(app, "alice@example.com");
    let (_, bob) = register!(app, "bob@example.com");

    let req = test::TestRequest::put()
        .uri(&url(&format!("/users/{alice}")))
        .insert_header(bearer(&bob))
        .set_json(json!({ "password": "x" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::put()
        .uri(&url(&format!("/users/{}", Uuid::new_v4())))
        .insert_header(bearer(&bob))
        .set_json(json!({ "password": "x" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&url(&format!("/users/{alice}")))
        .insert_header(bearer(&ctx.admin_token))
        .set_json(json!({ "password": "x" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], false);
}

#[actix_web::test]
async fn admin_cannot_unsubscribe() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);

    let req = test::TestRequest::delete()
        .uri(&url("/users/unsubscribe"))
        .insert_header(bearer(&ctx.admin_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::post()
        .uri(&url("/auth/login"))
        .set_json(json!({ "email": "admin@gmail.com", "password": "Admin123" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn unsubscribed_account_cannot_log_in() {
    let ctx = Ctx::new().await;
    let app = init_app!(ctx);
    let (_, token) = register!(app, "leaving@example.com");

    let req = test::TestRequest::delete()
        .uri(&url("/users/unsubscribe"))
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["user"]["active"], false);

    let req = test::TestRequest::post()
        .uri(&url("/auth/login"))
        .set_json(json!({ "email": "leaving@example.com", "password": "correct-horse" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);
}
