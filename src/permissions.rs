use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::auth_extractor::AuthenticatedUser;

/// Author-or-read-only: safe methods never get here; a mutation is allowed
/// only when the caller is the record's author.
pub fn ensure_author(user: &AuthenticatedUser, author_id: Uuid) -> Result<(), ApiError> {
    if user.user_id == author_id {
        Ok(())
    } else {
        Err(ApiError::Forbidden)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn author_may_mutate_own_record() {
        let id = Uuid::new_v4();
        let user = AuthenticatedUser { user_id: id };
        assert!(ensure_author(&user, id).is_ok());
    }

    #[test]
    fn non_author_is_forbidden() {
        let user = AuthenticatedUser {
            user_id: Uuid::new_v4(),
        };
        match ensure_author(&user, Uuid::new_v4()) {
            Err(ApiError::Forbidden) => {}
            other => panic!("expected Forbidden, got {:?}", other),
        }
    }
}
