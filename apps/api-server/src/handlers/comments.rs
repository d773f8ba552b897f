//! Comments on posts.

use actix_web::{HttpResponse, web};

use postsys_core::DomainError;
use postsys_core::domain::{Comment, CommentPatch, NewComment};
use postsys_shared::ApiResponse;
use postsys_shared::dto::{
    CommentBody, CommentDto, CommentList, CreateCommentRequest, ListQuery, UpdateCommentRequest,
};

use super::pagination;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppResult, parse_id};
use crate::state::AppState;

fn comment_dto(comment: Comment) -> CommentDto {
    CommentDto {
        id: comment.id,
        content: comment.content,
        keeper_user: comment.keeper_user,
        keeper_post: comment.keeper_post,
        active: comment.active,
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    }
}

fn body(comment: Comment) -> CommentBody {
    CommentBody {
        comment: comment_dto(comment),
    }
}

/// POST /comments
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = payload.into_inner();
    let post_id = req.post_id.ok_or_else(|| DomainError::required("postId"))?;

    let comment = state
        .services
        .comments
        .create(
            &identity.principal,
            NewComment {
                content: req.content,
                post_id,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        body(comment),
        "Comment created",
    )))
}

/// GET /comments
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = state.services.comments.list(pagination(&query)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CommentList {
        total: page.total,
        comments: page.items.into_iter().map(comment_dto).collect(),
    })))
}

/// GET /comments/findComment/{id}
pub async fn find(
    state: web::Data<AppState>,
    _identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let comment = state.services.comments.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body(comment))))
}

/// PUT /comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    payload: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let req = payload.into_inner();

    let comment = state
        .services
        .comments
        .update(
            &identity.principal,
            id,
            CommentPatch {
                content: req.content,
                post_id: req.post_id,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        body(comment),
        "Comment updated",
    )))
}

/// DELETE /comments/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let comment = state
        .services
        .comments
        .soft_delete(&identity.principal, id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        body(comment),
        "Comment deleted",
    )))
}
