//! Registration and login.

use actix_web::{HttpResponse, web};

use postsys_core::service::{Registration, Session};
use postsys_shared::ApiResponse;
use postsys_shared::dto::{AuthResponse, LoginRequest, RegisterRequest};

use super::users::user_dto;
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn auth_response(session: Session) -> AuthResponse {
    AuthResponse {
        user: user_dto(session.user),
        access_token: session.token,
        token_type: "Bearer".to_string(),
        expires_in: session.expires_in,
    }
}

/// POST /postSystem/v1/auth/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .accounts
        .register(Registration {
            name: req.name,
            surname: req.surname,
            username: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        auth_response(session),
        "User registered",
    )))
}

/// POST /postSystem/v1/auth/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let session = state.accounts.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        auth_response(session),
        "Login successful",
    )))
}
