use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::category::Category;
use crate::models::user::Author;

#[derive(Debug, Clone, Serialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub category_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// A post together with the rows the read shape denormalizes.
#[derive(Debug)]
pub struct PostWithRelations {
    pub post: Post,
    pub author: Author,
    pub category: Category,
}
