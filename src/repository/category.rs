use diesel::prelude::*;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::Category;
use crate::domain::post::Post;
use crate::domain::types::{CategoryId, EntityState};
use crate::models::category::{
    Category as DbCategory, CategoryChangeset as DbCategoryChangeset,
    NewCategory as DbNewCategory,
};
use crate::models::post::Post as DbPost;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository};

/// Upper bound on ids bound into one `IN (...)` list, below SQLite's
/// default limit of 999 variables.
const DELETE_CHUNK_SIZE: usize = 500;

/// Attach posts to their categories and convert both into domain values.
fn into_domain(
    categories: Vec<DbCategory>,
    posts: Vec<DbPost>,
) -> RepositoryResult<Vec<Category>> {
    let grouped = posts.grouped_by(&categories);

    categories
        .into_iter()
        .zip(grouped)
        .map(|(category, posts)| -> RepositoryResult<Category> {
            let posts = posts
                .into_iter()
                .map(TryInto::try_into)
                .collect::<Result<Vec<Post>, _>>()?;
            Ok(Category::try_from((category, posts))?)
        })
        .collect()
}

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::{categories, posts};

        let mut conn = self.conn()?;

        // Every category is listed, so every post is loaded without an `IN`
        // list of ids. Both reads share one snapshot so no post can point at a
        // category missing from `items`.
        let (items, posts) = conn.transaction::<_, RepositoryError, _>(|conn| {
            let items = categories::table
                .order((categories::name.asc(), categories::id.asc()))
                .select(DbCategory::as_select())
                .load::<DbCategory>(conn)?;

            let posts = posts::table
                .order(posts::id.asc())
                .select(DbPost::as_select())
                .load::<DbPost>(conn)?;

            Ok((items, posts))
        })?;

        into_domain(items, posts)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::{categories, posts};

        let mut conn = self.conn()?;

        let category = categories::table
            .find(id.get())
            .select(DbCategory::as_select())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let Some(category) = category else {
            return Ok(None);
        };

        let posts = DbPost::belonging_to(&category)
            .order(posts::id.asc())
            .select(DbPost::as_select())
            .load::<DbPost>(&mut conn)?;

        Ok(into_domain(vec![category], posts)?.pop())
    }
}

impl CategoryWriter for DieselRepository {
    fn save_category(&self, category: &mut Category) -> RepositoryResult<CategoryId> {
        use crate::schema::{categories, posts};

        if category.name().trim().is_empty() {
            return Err(RepositoryError::ValidationError(
                "category name is not set".to_string(),
            ));
        }

        let mut conn = self.conn()?;

        let id = conn.transaction::<_, RepositoryError, _>(|conn| {
            let id = match category.state() {
                EntityState::Transient => diesel::insert_into(categories::table)
                    .values(DbNewCategory::from(&*category))
                    .returning(categories::id)
                    .get_result::<i32>(conn)?,
                EntityState::Persisted(id) => {
                    let affected = diesel::update(categories::table.find(id.get()))
                        .set(DbCategoryChangeset::from(&*category))
                        .execute(conn)?;
                    if affected == 0 {
                        return Err(RepositoryError::NotFound);
                    }
                    id.get()
                }
            };

            let removed = category
                .removed_posts()
                .iter()
                .map(|post_id| post_id.get())
                .collect::<Vec<i32>>();
            for chunk in removed.chunks(DELETE_CHUNK_SIZE) {
                diesel::delete(
                    posts::table
                        .filter(posts::category_id.eq(id))
                        .filter(posts::id.eq_any(chunk)),
                )
                .execute(conn)?;
            }

            Ok(CategoryId::new(id)?)
        })?;

        category.mark_persisted(id);
        Ok(id)
    }
}
