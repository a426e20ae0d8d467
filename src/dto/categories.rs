use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::category::Category;

/// Category data handed to templates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: Option<i32>,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
    pub post_count: usize,
}

impl From<&Category> for CategoryDto {
    fn from(value: &Category) -> Self {
        Self {
            id: value.id().map(|id| id.get()),
            name: value.name().to_string(),
            slug: value.slug().to_string(),
            created_at: value.created_at(),
            post_count: value.posts().len(),
        }
    }
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self::from(&value)
    }
}
