use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::post::Post as DomainPost;
use crate::domain::types::TypeConstraintError;
use crate::models::category::Category;

/// Diesel model representing the `posts` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Category))]
#[diesel(table_name = crate::schema::posts)]
pub struct Post {
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Post> for DomainPost {
    type Error = TypeConstraintError;

    fn try_from(post: Post) -> Result<Self, Self::Error> {
        Ok(Self {
            id: post.id.try_into()?,
            category_id: post.category_id.try_into()?,
            title: post.title,
            slug: post.slug,
            created_at: post.created_at,
        })
    }
}
