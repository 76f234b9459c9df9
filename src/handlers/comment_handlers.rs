use actix_web::{delete, get, patch, post, put, web, HttpResponse};
use deadpool_postgres::Pool;
use log::info;
use serde::Deserialize;
use uuid::Uuid;

use crate::dtos::comment_dtos::{CommentOut, CreateCommentDTO, UpdateCommentDTO};
use crate::error::{ApiError, FieldError};
use crate::middleware::auth_extractor::AuthenticatedUser;
use crate::permissions;
use crate::repositories::comment_repository::CommentRepository;
use crate::repositories::post_repository::PostRepository;
use crate::AppState;

use super::clamp_page;

#[derive(Debug, Deserialize)]
pub struct CommentListQuery {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub post: Option<Uuid>,
}

async fn ensure_post_exists(pool: &Pool, id: Uuid) -> Result<(), ApiError> {
    if PostRepository::exists(pool, id).await? {
        Ok(())
    } else {
        Err(ApiError::Validation(vec![FieldError {
            field: "post",
            message: format!("unknown post: {}", id),
        }]))
    }
}

#[get("/comments")]
pub async fn list_comments(
    state: web::Data<AppState>,
    query: web::Query<CommentListQuery>,
) -> Result<HttpResponse, ApiError> {
    let (limit, offset) = clamp_page(query.limit, query.offset);
    let comments = CommentRepository::list(&state.pg_pool, limit, offset, query.post).await?;
    let out: Vec<CommentOut> = comments.into_iter().map(CommentOut::from).collect();
    Ok(HttpResponse::Ok().json(out))
}

#[get("/comments/{id}")]
pub async fn get_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let comment = CommentRepository::get(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(CommentOut::from(comment)))
}

#[post("/comments")]
pub async fn create_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateCommentDTO>,
) -> Result<HttpResponse, ApiError> {
    let dto = body.into_inner();
    dto.validate()?;
    ensure_post_exists(&state.pg_pool, dto.post).await?;

    let created =
        CommentRepository::create(&state.pg_pool, user.user_id, dto.post, &dto.body).await?;
    info!("comment {} created by {}", created.comment.id, user.user_id);

    Ok(HttpResponse::Created().json(CommentOut::from(created)))
}

#[put("/comments/{id}")]
pub async fn update_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<CreateCommentDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let existing = CommentRepository::get(&state.pg_pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    permissions::ensure_author(&user, existing.comment.author_id)?;

    let dto = body.into_inner();
    dto.validate()?;
    ensure_post_exists(&state.pg_pool, dto.post).await?;

    let updated = CommentRepository::update(&state.pg_pool, id, Some(dto.post), Some(&dto.body))
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(CommentOut::from(updated)))
}

#[patch("/comments/{id}")]
pub async fn patch_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentDTO>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let existing = CommentRepository::get(&state.pg_pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    permissions::ensure_author(&user, existing.comment.author_id)?;

    let dto = body.into_inner();
    dto.validate()?;
    if let Some(post_id) = dto.post {
        ensure_post_exists(&state.pg_pool, post_id).await?;
    }

    let updated = CommentRepository::update(&state.pg_pool, id, dto.post, dto.body.as_deref())
        .await?
        .ok_or(ApiError::NotFound)?;

    Ok(HttpResponse::Ok().json(CommentOut::from(updated)))
}

#[delete("/comments/{id}")]
pub async fn delete_comment(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, ApiError> {
    let id = path.into_inner();
    let existing = CommentRepository::get(&state.pg_pool, id)
        .await?
        .ok_or(ApiError::NotFound)?;
    permissions::ensure_author(&user, existing.comment.author_id)?;

    CommentRepository::delete(&state.pg_pool, id).await?;
    info!("comment {} deleted by {}", id, user.user_id);

    Ok(HttpResponse::NoContent().finish())
}
