use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::category::Category as DomainCategory;
use crate::domain::post::Post as DomainPost;
use crate::domain::types::TypeConstraintError;

/// Diesel model representing the `categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::categories)]
pub struct Category {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub created_at: NaiveDateTime,
}

/// Insertable form of [`Category`].
#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::categories)]
pub struct NewCategory<'a> {
    pub name: &'a str,
    pub slug: &'a str,
    pub created_at: NaiveDateTime,
}

/// Changeset applied when an already stored category is saved again.
///
/// `created_at` is deliberately absent: it never changes after insert.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = crate::schema::categories)]
pub struct CategoryChangeset<'a> {
    pub name: &'a str,
    pub slug: &'a str,
}

impl<'a> From<&'a DomainCategory> for NewCategory<'a> {
    fn from(category: &'a DomainCategory) -> Self {
        Self {
            name: category.name(),
            slug: category.slug(),
            created_at: category.created_at(),
        }
    }
}

impl<'a> From<&'a DomainCategory> for CategoryChangeset<'a> {
    fn from(category: &'a DomainCategory) -> Self {
        Self {
            name: category.name(),
            slug: category.slug(),
        }
    }
}

impl TryFrom<(Category, Vec<DomainPost>)> for DomainCategory {
    type Error = TypeConstraintError;

    fn try_from((category, posts): (Category, Vec<DomainPost>)) -> Result<Self, Self::Error> {
        Ok(Self::restore(
            category.id.try_into()?,
            category.name,
            category.slug,
            category.created_at,
            posts,
        ))
    }
}
