use serde::Serialize;

/// Row in `categories`. The table is managed by data administration;
/// the API only ever reads it.
#[derive(Debug, Clone, Serialize)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
}
