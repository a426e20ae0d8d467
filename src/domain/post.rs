use chrono::NaiveDateTime;

use crate::domain::types::{CategoryId, PostId};

/// A blog post filed under a category.
///
/// Posts are authored elsewhere; categories only hold and detach them.
#[derive(Debug, Clone, PartialEq)]
pub struct Post {
    pub id: PostId,
    pub category_id: CategoryId,
    pub title: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
}
