use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{ApiError, FieldError};
use crate::models::comment::CommentWithAuthor;
use crate::models::user::Author;

pub const MAX_BODY_LENGTH: usize = 2_000;

#[derive(Debug, Deserialize)]
pub struct CreateCommentDTO {
    pub post: Uuid,
    pub body: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentDTO {
    pub post: Option<Uuid>,
    pub body: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct CommentOut {
    pub id: Uuid,
    pub post: Uuid,
    pub author: Author,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<CommentWithAuthor> for CommentOut {
    fn from(c: CommentWithAuthor) -> Self {
        CommentOut {
            id: c.comment.id,
            post: c.comment.post_id,
            author: c.author,
            body: c.comment.body,
            created_at: c.comment.created_at,
            updated_at: c.comment.updated_at,
        }
    }
}

fn check_body(errors: &mut Vec<FieldError>, body: &str) {
    if body.trim().is_empty() {
        errors.push(FieldError {
            field: "body",
            message: "body cannot be empty".to_string(),
        });
    } else if body.len() > MAX_BODY_LENGTH {
        errors.push(FieldError {
            field: "body",
            message: format!("body must be at most {} characters", MAX_BODY_LENGTH),
        });
    }
}

impl CreateCommentDTO {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        check_body(&mut errors, &self.body);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(ApiError::Validation(errors))
        }
    }
}

impl UpdateCommentDTO {
    pub fn validate(&self) -> Result<(), ApiError> {
        let mut errors = Vec::new();
        if let Some(ref body) = self.body {
            check_body(&mut errors, body);
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

    #[test]
    fn valid_comment_passes() {
        let dto = CreateCommentDTO {
            post: Uuid::new_v4(),
            body: "Nice write-up.".to_string(),
        };
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn empty_body_is_flagged() {
        let dto = CreateCommentDTO {
            post: Uuid::new_v4(),
            body: " ".to_string(),
        };
        match dto.validate() {
            Err(ApiError::Validation(fields)) => assert_eq!(fields[0].field, "body"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn oversize_body_is_flagged() {
        let dto = CreateCommentDTO {
            post: Uuid::new_v4(),
            body: "a".repeat(MAX_BODY_LENGTH + 1),
        };
        assert!(dto.validate().is_err());
    }

    #[test]
    fn write_shape_takes_post_as_raw_id() {
        let json = format!(
            r#"{{"post":"{}","body":"hey"}}"#,
            Uuid::new_v4()
        );
        let dto: CreateCommentDTO = serde_json::from_str(&json).unwrap();
        assert_eq!(dto.body, "hey");
    }
}
