//! Posts. Mutations are restricted to the post's keeper or an administrator.

use actix_web::{HttpResponse, web};

use postsys_core::DomainError;
use postsys_core::domain::{NewPost, Post, PostPatch};
use postsys_shared::ApiResponse;
use postsys_shared::dto::{CreatePostRequest, ListQuery, PostBody, PostDto, PostList, UpdatePostRequest};

use super::pagination;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppResult, parse_id};
use crate::state::AppState;

fn post_dto(post: Post) -> PostDto {
    PostDto {
        id: post.id,
        title: post.title,
        category: post.category,
        content: post.content,
        keeper: post.keeper,
        active: post.active,
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

fn body(post: Post) -> PostBody {
    PostBody {
        post: post_dto(post),
    }
}

/// POST /posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = payload.into_inner();
    let category = req.category.ok_or_else(|| DomainError::required("category"))?;

    let post = state
        .services
        .posts
        .create(
            &identity.principal,
            NewPost {
                title: req.title,
                category,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(body(post), "Post created")))
}

/// GET /posts
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = state.services.posts.list(pagination(&query)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostList {
        total: page.total,
        posts: page.items.into_iter().map(post_dto).collect(),
    })))
}

/// GET /posts/findPost/{id}
pub async fn find(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let post = state.services.posts.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body(post))))
}

/// PUT /posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    payload: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let req = payload.into_inner();

    let post = state
        .services
        .posts
        .update(
            &identity.principal,
            id,
            PostPatch {
                title: req.title,
                category: req.category,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body(post), "Post updated")))
}

/// DELETE /posts/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let post = state.services.posts.soft_delete(&identity.principal, id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(body(post), "Post deleted")))
}
