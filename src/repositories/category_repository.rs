use deadpool_postgres::Pool;
use tokio_postgres::Row;

use crate::error::ApiResult;
use crate::models::category::Category;

fn row_to_category(row: &Row) -> Category {
    Category {
        id: row.get(0),
        name: row.get(1),
        slug: row.get(2),
    }
}

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn list(pool: &Pool) -> ApiResult<Vec<Category>> {
        let client = pool.get().await?;
        let rows = client
            .query("SELECT id, name, slug FROM categories ORDER BY name", &[])
            .await?;
        Ok(rows.iter().map(row_to_category).collect())
    }

    pub async fn get(pool: &Pool, id: i32) -> ApiResult<Option<Category>> {
        let client = pool.get().await?;
        let row = client
            .query_opt("SELECT id, name, slug FROM categories WHERE id = $1", &[&id])
            .await?;
        Ok(row.as_ref().map(row_to_category))
    }

    pub async fn exists(pool: &Pool, id: i32) -> ApiResult<bool> {
        let client = pool.get().await?;
        let row = client
            .query_opt("SELECT 1 FROM categories WHERE id = $1", &[&id])
            .await?;
        Ok(row.is_some())
    }
}
