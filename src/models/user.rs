use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Row in `users` as far as this API cares. The auth subsystem owns the
/// table; we join it read-only to show who wrote a post or comment.
#[derive(Debug, Clone, Serialize)]
pub struct Author {
    pub id: Uuid,
    pub username: String,
}

/// Claims carried by the bearer tokens the auth subsystem issues.
#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    /// subject / user id
    pub sub: String,
    pub exp: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}
