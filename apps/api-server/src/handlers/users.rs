//! User management.

use actix_web::{HttpResponse, web};

use postsys_core::domain::{NewUser, Role, User, UserPatch};
use postsys_core::service::guard::{self, Action};
use postsys_shared::ApiResponse;
use postsys_shared::dto::{CreateUserRequest, ListQuery, UpdateUserRequest, UserBody, UserDto, UserList};

use super::pagination;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult, parse_id};
use crate::state::AppState;

pub(crate) fn user_dto(user: User) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name,
        surname: user.surname,
        username: user.username,
        email: user.email,
        role: user.role.as_str().to_string(),
        active: user.active,
        created_at: user.created_at,
        updated_at: user.updated_at,
    }
}

fn body(user: User) -> UserBody {
    UserBody {
        user: user_dto(user),
    }
}

/// POST /users - admin only; any role may be assigned.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = payload.into_inner();
    guard::require_admin(&identity.principal, Action::Create)?;

    let role = match req.role.as_deref() {
        Some(role) => role.parse::<Role>()?,
        None => Role::default(),
    };
    let password_hash = state.accounts.hash_password(&req.password)?;

    let user = state
        .services
        .users
        .create(
            &identity.principal,
            NewUser {
                name: req.name,
                surname: req.surname,
                username: req.username,
                email: req.email,
                password_hash,
                role,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(body(user), "User created")))
}

/// GET /users
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = state.services.users.list(pagination(&query)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(UserList {
        total: page.total,
        users: page.items.into_iter().map(user_dto).collect(),
    })))
}

/// GET /users/findUser/{id}
pub async fn find(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let user = state.services.users.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body(user))))
}

/// PUT /users/{id} - self or admin. A new password is re-hashed.
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    payload: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let req = payload.into_inner();

    let accounts = &state.accounts;

    let user = state
        .services
        .users
        .update_with(&identity.principal, id, |_| {
            let password_hash = req
                .password
                .as_deref()
                .map(|password| accounts.hash_password(password))
                .transpose()?;
            Ok(UserPatch {
                name: req.name,
                surname: req.surname,
                username: req.username,
                email: req.email,
                password_hash,
            })
        })
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body(user), "User updated")))
}

/// DELETE /users/unsubscribe - deactivate the caller's own account.
/// `USER_ROLE` only.
pub async fn unsubscribe(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let principal = identity.principal;
    if principal.is_admin() {
        return Err(AppError::Forbidden);
    }
    let user = state.services.users.soft_delete(&principal, principal.id).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body(user), "Account deactivated")))
}

/// DELETE /users/{id} - admin only.
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    guard::require_admin(&identity.principal, Action::Delete)?;

    let user = state.services.users.soft_delete(&identity.principal, id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body(user), "User deactivated")))
}
