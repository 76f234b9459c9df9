use actix_web::{get, web, HttpResponse};

use crate::error::ApiError;
use crate::repositories::category_repository::CategoryRepository;
use crate::AppState;

#[get("/categories")]
pub async fn list_categories(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let categories = CategoryRepository::list(&state.pg_pool).await?;
    Ok(HttpResponse::Ok().json(categories))
}

#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, ApiError> {
    let category = CategoryRepository::get(&state.pg_pool, path.into_inner())
        .await?
        .ok_or(ApiError::NotFound)?;
    Ok(HttpResponse::Ok().json(category))
}
