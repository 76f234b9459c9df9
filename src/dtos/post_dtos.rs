use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::models::category::Category;
use crate::models::post::PostWithRelations;
use crate::models::user::Author;

pub const MAX_TITLE_LENGTH: usize = 200;
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// Write shape: foreign keys come in as raw identifiers.
#[derive(Debug, Deserialize)]
pub struct CreatePostDTO {
    pub title: String,
    pub content: String,
    pub category: i32,
}

/// Write shape for partial updates; any subset of the fields.
#[derive(Debug, Deserialize)]
pub struct UpdatePostDTO {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<i32>,
}

/// Read shape: author and category are nested, not raw ids.
#[derive(Debug, Serialize)]
pub struct PostOut {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author: Author,
    pub category: Category,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<PostWithRelations> for PostOut {
    fn from(p: PostWithRelations) -> Self {
        PostOut {
            id: p.post.id,
            title: p.post.title,
            content: p.post.content,
            author: p.author,
            category: p.category,
            created_at: p.post.created_at,
            updated_at: p.post.updated_at,
        }
    }
}

fn check_title(errors: &mut Vec<FieldError>, title: &str) {
    if title.trim().is_empty() {
        errors.push(FieldError {
            field: "title",
            message: "title cannot be empty".to_string(),
        });
    } else if title.len() > MAX_TITLE_LENGTH {
        errors.push(FieldError {
            field: "title",
            message: format!("title must be at most {} characters", MAX_TITLE_LENGTH),
        });
    }
}

fn check_content(errors: &mut Vec<FieldError>, content: &str) {
    if content.trim().is_empty() {
        errors.push(FieldError {
            field: "content",
            message: "content cannot be empty".to_string(),
        });
    } else if content.len() > MAX_CONTENT_LENGTH {
        errors.push(FieldError {
            field: "content",
            message: format!("content must be at most {} characters", MAX_CONTENT_LENGTH),
        });
    }
}

impl CreatePostDTO {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check_title(&mut errors, &self.title);
        check_content(&mut errors, &self.content);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

impl UpdatePostDTO {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(ref title) = self.title {
            check_title(&mut errors, title);
        }
        if let Some(ref content) = self.content {
            check_content(&mut errors, content);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_create() -> CreatePostDTO {
        CreatePostDTO {
            title: "First post".to_string(),
            content: "Hello, world.".to_string(),
            category: 1,
        }
    }

    #[test]
    fn valid_payload_passes() {
        assert!(valid_create().validate().is_ok());
    }

    #[test]
    fn empty_title_is_flagged() {
        let dto = CreatePostDTO {
            title: "   ".to_string(),
            ..valid_create()
        };
        match dto.validate() {
            Err(ApiError::Validation(fields)) => {
                assert_eq!(fields.len(), 1);
                assert_eq!(fields[0].field, "title");
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn every_bad_field_is_enumerated() {
        let dto = CreatePostDTO {
            title: "".to_string(),
            content: "".to_string(),
            category: 1,
        };
        match dto.validate() {
            Err(ApiError::Validation(fields)) => {
                let names: Vec<&str> = fields.iter().map(|f| f.field).collect();
                assert!(names.contains(&"title"));
                assert!(names.contains(&"content"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn oversize_title_is_flagged() {
        let dto = CreatePostDTO {
            title: "a".repeat(MAX_TITLE_LENGTH + 1),
            ..valid_create()
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn partial_update_allows_absent_fields() {
        let dto = UpdatePostDTO {
            title: None,
            content: None,
            category: None,
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn partial_update_rejects_empty_title() {
        let dto = UpdatePostDTO {
            title: Some("".to_string()),
            content: None,
            category: None,
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn read_shape_nests_author_and_category() {
        let out = PostOut {
            id: Uuid::new_v4(),
            title: "t".to_string(),
            content: "c".to_string(),
            author: Author {
                id: Uuid::new_v4(),
                username: "alice".to_string(),
            },
            category: Category {
                id: 3,
                name: "Rust".to_string(),
                slug: "rust".to_string(),
            },
            created_at: Utc::now(),
            updated_at: None,
        };

        let json = serde_json::to_value(&out).unwrap();
        assert_eq!(json["author"]["username"], "alice");
        assert_eq!(json["category"]["id"], 3);
        assert!(json.get("author_id").is_none());
    }
}
