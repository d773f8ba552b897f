//! Categories. Reads are public; every mutation needs an administrator.

use actix_web::{HttpResponse, web};

use postsys_core::domain::{Category, CategoryPatch, NewCategory};
use postsys_shared::ApiResponse;
use postsys_shared::dto::{
    CategoryBody, CategoryDto, CategoryList, CreateCategoryRequest, ListQuery,
    UpdateCategoryRequest,
};

use super::pagination;
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppResult, parse_id};
use crate::state::AppState;

fn category_dto(category: Category) -> CategoryDto {
    CategoryDto {
        id: category.id,
        name: category.name,
        active: category.active,
        created_at: category.created_at,
        updated_at: category.updated_at,
    }
}

fn body(category: Category) -> CategoryBody {
    CategoryBody {
        category: category_dto(category),
    }
}

/// POST /categories
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    payload: web::Json<CreateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let category = state
        .services
        .categories
        .create(
            &identity.principal,
            NewCategory {
                name: payload.into_inner().name,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(ApiResponse::ok_with_message(
        body(category),
        "Category created",
    )))
}

/// GET /categories
pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let page = state.services.categories.list(pagination(&query)).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(CategoryList {
        total: page.total,
        categories: page.items.into_iter().map(category_dto).collect(),
    })))
}

/// GET /categories/findCategory/{id}
pub async fn find(state: web::Data<AppState>, id: web::Path<String>) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let category = state.services.categories.find_by_id(id).await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(body(category))))
}

/// PUT /categories/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
    payload: web::Json<UpdateCategoryRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;

    let category = state
        .services
        .categories
        .update(
            &identity.principal,
            id,
            CategoryPatch {
                name: payload.into_inner().name,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        body(category),
        "Category updated",
    )))
}

/// DELETE /categories/{id}
pub async fn remove(
    state: web::Data<AppState>,
    identity: Identity,
    id: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&id)?;
    let category = state
        .services
        .categories
        .soft_delete(&identity.principal, id)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok_with_message(
        body(category),
        "Category deleted",
    )))
}
