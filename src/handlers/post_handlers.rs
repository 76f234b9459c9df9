use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use deadpool_postgres::Pool;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::dtos::post_dtos::{CreatePostDTO, PostOut, UpdatePostDTO};
use crate::error::{ApiError, FieldError};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::permissions;
use crate::repositories::category_repository::CategoryRepository;
use crate::repositories::post_repository::PostRepository;
use crate::AppState;

use super::clamp_page;

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub category: Option<i32>,
}

/// The category foreign key must name an existing row; a dangling id is a
/// payload problem, not a server error.
async fn ensure_category_exists(pool: &Pool, id: i32) -> Result<(), ApiError> {
    if CategoryRepository::exists(pool, id).await? {
        Ok(())
    } else {
        Err(ApiError::Validation(vec![FieldError {
            field: "category",
            message: format!("unknown category: {}", id),
        }]))
    }
}

#[get("/posts")]
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<PostListQuery>,
) -> Result<HttpResponse, ApiError> {
    let (limit, offset) = clamp_page(query.limit, query.offset);
    let posts = PostRepository::list(&state.pg_pool, limit, offset, query.category).await?;
    let out: Vec<PostOut> = posts.into_iter().map(PostOut::from).collect();
    Ok(HttpResponse::Ok().json(out))
}

#[get("/posts/{id}")]
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let post = PostRepository::get(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(PostOut::from(post)))
}

#[post("/posts")]
pub async fn create_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let dto = body.into_inner();
    dto.validate()?;
    ensure_category_exists(&state.pg_pool, dto.category).await?;

    let created = PostRepository::create(
        &state.pg_pool,
        user.user_id,
        dto.category,
        &dto.title,
        &dto.content,
    )
    .await?;
    info!("post {} created by {}", created.post.id, user.user_id);

    Ok(HttpResponse::Created().json(PostOut::from(created)))
}

#[put("/posts/{id}")]
pub async fn update_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<CreatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let existing = PostRepository::get(&state.pg_pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    permissions::ensure_author(&user, existing.post.author_id)?;

    let dto = body.into_inner();
    dto.validate()?;
    ensure_category_exists(&state.pg_pool, dto.category).await?;

    let updated = PostRepository::update(
        &state.pg_pool,
        id,
        Some(&dto.title),
        Some(&dto.content),
        Some(dto.category),
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(PostOut::from(updated)))
}

#[patch("/posts/{id}")]
pub async fn patch_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let existing = PostRepository::get(&state.pg_pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    permissions::ensure_author(&user, existing.post.author_id)?;

    let dto = body.into_inner();
    dto.validate()?;
    if let Some(category) = dto.category {
        ensure_category_exists(&state.pg_pool, category).await?;
    }

    let updated = PostRepository::update(
        &state.pg_pool,
        id,
        dto.title.as_deref(),
        dto.content.as_deref(),
        dto.category,
    )
    .await?
    .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(PostOut::from(updated)))
}

#[delete("/posts/{id}")]
pub async fn delete_post(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let existing = PostRepository::get(&state.pg_pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    permissions::ensure_author(&user, existing.post.author_id)?;

    PostRepository::delete(&state.pg_pool, id).await?;
    info!("post {} deleted by {}", id, user.user_id);

    Ok(HttpResponse::NoContent().finish())
}
