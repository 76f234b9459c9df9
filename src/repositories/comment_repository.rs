use deadpool_postgres::Pool;
use tokio_postgres::Row;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::models::comment::{Comment, CommentWithAuthor};
use crate::models::user::Author;

const SELECT_COMMENT: &str = "\
    SELECT c.id, c.post_id, c.author_id, c.body, c.created_at, c.updated_at, \
           COALESCE(u.username, 'anonymous') AS username \
    FROM comments c \
    LEFT JOIN users u ON u.id = c.author_id";

fn row_to_comment(row: &Row) -> CommentWithAuthor {
    let comment = Comment {
        id: row.get(0),
        post_id: row.get(1),
        author_id: row.get(2),
        body: row.get(3),
        created_at: row.get(4),
        updated_at: row.get(5),
    };
    let author = Author {
        id: comment.author_id,
        username: row.get(6),
    };
    CommentWithAuthor { comment, author }
}

pub struct CommentRepository;

impl CommentRepository {
    pub async fn list(
        pool: &Pool,
        limit: i64,
        offset: i64,
        post: Option<Uuid>,
    ) -> ApiResult<Vec<CommentWithAuthor>> {
        let client = pool.get().await?;

        let rows = match post {
            Some(post_id) => {
                let sql = format!(
                    "{} WHERE c.post_id = $3 ORDER BY c.created_at DESC LIMIT $1 OFFSET $2",
                    SELECT_COMMENT
                );
                client.query(sql.as_str(), &[&limit, &offset, &post_id]).await?
            }
            None => {
                let sql = format!(
                    "{} ORDER BY c.created_at DESC LIMIT $1 OFFSET $2",
                    SELECT_COMMENT
                );
                client.query(sql.as_str(), &[&limit, &offset]).await?
            }
        };

        Ok(rows.iter().map(row_to_comment).collect())
    }

    pub async fn get(pool: &Pool, id: Uuid) -> ApiResult<Option<CommentWithAuthor>> {
        let client = pool.get().await?;
        let sql = format!("{} WHERE c.id = $1", SELECT_COMMENT);
        let row = client.query_opt(sql.as_str(), &[&id]).await?;
        Ok(row.as_ref().map(row_to_comment))
    }

    pub async fn create(
        pool: &Pool,
        author_id: Uuid,
        post_id: Uuid,
        body: &str,
    ) -> ApiResult<CommentWithAuthor> {
        let id = Uuid::new_v4();
        let client = pool.get().await?;
        client
            .execute(
                "INSERT INTO comments (id, post_id, author_id, body) VALUES ($1, $2, $3, $4)",
                &[&id, &post_id, &author_id, &body],
            )
            .await?;
        drop(client);

        Self::get(pool, id)
            .await?
            .ok_or_else(|| ApiError::Database("comment missing after insert".to_string()))
    }

    pub async fn update(
        pool: &Pool,
        id: Uuid,
        post_id: Option<Uuid>,
        body: Option<&str>,
    ) -> ApiResult<Option<CommentWithAuthor>> {
        let client = pool.get().await?;
        let n = client
            .execute(
                "UPDATE comments SET \
                     post_id = COALESCE($2, post_id), \
                     body = COALESCE($3, body), \
                     updated_at = now() \
                 WHERE id = $1",
                &[&id, &post_id, &body],
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
            .execute("DELETE FROM comments WHERE id = $1", &[&id])
            .await?;
        Ok(n > 0)
    }
}
