use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::category::Category;
use crate::models::post::{Post, PostWithRelations};
use crate::models::user::Author;

// A user row can be missing when the auth subsystem lags behind a token;
// the read shape falls back to a placeholder name.
const SELECT_POST: &str = "\
    SELECT p.id, p.author_id, p.category_id, p.title, p.content, \
           p.created_at, p.updated_at, \
           COALESCE(u.username, 'anonymous') AS username, \
           c.name, c.slug \
    FROM posts p \
    LEFT JOIN users u ON u.id = p.author_id \
    JOIN categories c ON c.id = p.category_id";

fn row_to_post(row: &Row) -> PostWithRelations {
    let post = Post {
        id: row.get(0),
        author_id: row.get(1),
        category_id: row.get(2),
        title: row.get(3),
        content: row.get(4),
        created_at: row.get(5),
        updated_at: row.get(6),
    };
    let author = Author {
        id: post.author_id,
        username: row.get(7),
    };
    let category = Category {
        id: post.category_id,
        name: row.get(8),
        slug: row.get(9),
    };
    PostWithRelations {
        post,
        author,
        category,
    }
}

pub struct PostRepository;

impl PostRepository {
    /// Newest first; the handler clamps limit/offset.
    pub async fn list(
        pool: &Pool,
        limit: i64,
        offset: i64,
        category: Option<i32>,
    ) -> ApiResult<Vec<PostWithRelations>> {
        let client = pool.get().await?;

        let rows = match category {
            Some(category_id) => {
                let sql = format!(
                    "{} WHERE p.category_id = $3 ORDER BY p.created_at DESC LIMIT $1 OFFSET $2",
                    SELECT_POST
                );
                client.query(sql.as_str(), &[&limit, &offset, &category_id]).await?
            }
            None => {
                let sql = format!(
                    "{} ORDER BY p.created_at DESC LIMIT $1 OFFSET $2",
                    SELECT_POST
                );
                client.query(sql.as_str(), &[&limit, &offset]).await?
            }
        };

        Ok(rows.iter().map(row_to_post).collect())
    }

    pub async fn get(pool: &Pool, id: Uuid) -> ApiResult<Option<PostWithRelations>> {
        let client = pool.get().await?;
        let sql = format!("{} WHERE p.id = $1", SELECT_POST);
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        Ok(row.as_ref().map(row_to_post))
    }

    pub async fn exists(pool: &Pool, id: Uuid) -> ApiResult<bool> {
        let client = pool.get().await?;
        let row = client
            .query_opt("SELECT 1 FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(row.is_some())
    }

    pub async fn create(
        pool: &Pool,
        author_id: Uuid,
        category_id: i32,
        title: &str,
        content: &str,
    ) -> ApiResult<PostWithRelations> {
        let id = Uuid::new_v4();
        let client = pool.get().await?;
        client
            .execute(
                "INSERT INTO posts (id, author_id, category_id, title, content) \
                 VALUES ($1, $2, $3, $4, $5)",
                &[&id, &author_id, &category_id, &title, &content],
            )
            .await?;
        drop(client);

        Self::get(pool, id)
            .await?
            .ok_or_else(|| ApiError::Database("post missing after insert".to_string()))
    }

    /// Absent fields keep their current value.
    pub async fn update(
        pool: &Pool,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
        category_id: Option<i32>,
    ) -> ApiResult<Option<PostWithRelations>> {
        let client = pool.get().await?;
        let n = client
            .execute(
                "UPDATE posts SET \
                     title = COALESCE($2, title), \
                     content = COALESCE($3, content), \
                     category_id = COALESCE($4, category_id), \
                     updated_at = now() \
                 WHERE id = $1",
                &[&id, &title, &content, &category_id],
            )
            .await?;
        drop(client);

        if n == 0 {
            return Ok(None);
        }
        Self::get(pool, id).await
    }

    pub async fn delete(pool: &Pool, id: Uuid) -> ApiResult<bool> {
        let client = pool.get().await?;
        let n = client
            .execute("DELETE FROM posts WHERE id = $1", &[&id])
            .await?;
        Ok(n > 0)
    }
}
