use pushkind_common::db::{DbConnection, DbPool};
use pushkind_common::repository::errors::RepositoryResult;

use crate::domain::category::Category;
use crate::domain::types::CategoryId;

pub mod category;
#[cfg(test)]
pub mod test;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List every category with its posts, ordered by name ascending.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category and its posts by identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Insert a transient category or update a persisted one.
    ///
    /// Posts detached from the category since it was loaded are deleted in the
    /// same transaction. On success the category is marked persisted and its
    /// identifier returned.
    fn save_category(&self, category: &mut Category) -> RepositoryResult<CategoryId>;
}
