mod config;
mod dtos;
mod error;
mod handlers;
mod middleware;
mod models;
mod permissions;
mod repositories;

use std::env;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use deadpool_postgres::Pool;
use log::{error, info};

use crate::handlers::category_handlers::{get_category, list_categories};
use crate::handlers::comment_handlers::{
    create_comment, delete_comment, get_comment, list_comments, patch_comment, update_comment,
};
use crate::handlers::post_handlers::{
    create_post, delete_post, get_post, list_posts, patch_post, update_post,
};

#[derive(Clone)]
pub struct AppState {
    pub pg_pool: Pool,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init();
    dotenv::dotenv().ok();

    let pg_pool = match config::get_pg_pool() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to create PG pool: {}", e);
            std::process::exit(1);
        }
    };

    let auth_config = match config::get_auth_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Failed to load auth config: {}", e);
            std::process::exit(1);
        }
    };
    let auth_data = web::Data::new(auth_config);

    let state = web::Data::new(AppState { pg_pool });

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    let port = env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_address = format!("0.0.0.0:{}", port);

    info!("Starting server on {}", bind_address);

    HttpServer::new(move || {
        let mut cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                "authorization",
                "content-type",
                "accept",
                "x-requested-with",
            ])
            .supports_credentials()
            .max_age(3600);

        for origin in allowed_origins
            .split(',')
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
        {
            cors = cors.allowed_origin(origin);
        }

        App::new()
            .wrap(cors)
            .wrap(Logger::default())
            .app_data(state.clone())
            .app_data(auth_data.clone())
            .service(
                web::scope("/api")
                    .service(list_categories) // GET /api/categories
                    .service(get_category) // GET /api/categories/{id}
                    .service(list_posts) // GET /api/posts
                    .service(get_post) // GET /api/posts/{id}
                    .service(create_post) // POST /api/posts
                    .service(update_post) // PUT /api/posts/{id}
                    .service(patch_post) // PATCH /api/posts/{id}
                    .service(delete_post) // DELETE /api/posts/{id}
                    .service(list_comments) // GET /api/comments
                    .service(get_comment) // GET /api/comments/{id}
                    .service(create_comment) // POST /api/comments
                    .service(update_comment) // PUT /api/comments/{id}
                    .service(patch_comment) // PATCH /api/comments/{id}
                    .service(delete_comment), // DELETE /api/comments/{id}
            )
    })
    .bind(&bind_address)?
    .run()
    .await
}
