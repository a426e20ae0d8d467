use std::cell::{Cell, RefCell};

use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};

use crate::domain::category::Category;
use crate::domain::types::{CategoryId, EntityState};
use crate::repository::{CategoryReader, CategoryWriter};

/// Simple in-memory repository used for unit tests.
#[derive(Default)]
pub struct TestRepository {
    categories: RefCell<Vec<Category>>,
    next_id: Cell<i32>,
    fail_writes: bool,
}

impl TestRepository {
    pub fn new(categories: Vec<Category>) -> Self {
        let next_id = categories
            .iter()
            .filter_map(|c| c.id())
            .map(|id| id.get())
            .max()
            .unwrap_or(0);
        Self {
            categories: RefCell::new(categories),
            next_id: Cell::new(next_id),
            fail_writes: false,
        }
    }

    /// Make every subsequent save fail as if the database were unavailable.
    pub fn failing_writes(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    /// Snapshot of the stored categories in insertion order.
    pub fn stored(&self) -> Vec<Category> {
        self.categories.borrow().clone()
    }
}

impl CategoryReader for TestRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        let mut items = self.stored();
        items.sort_by(|a, b| a.name().cmp(b.name()));
        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        Ok(self
            .categories
            .borrow()
            .iter()
            .find(|c| c.id() == Some(id))
            .cloned())
    }
}

impl CategoryWriter for TestRepository {
    fn save_category(&self, category: &mut Category) -> RepositoryResult<CategoryId> {
        if self.fail_writes {
            return Err(RepositoryError::ValidationError(
                "writes disabled".to_string(),
            ));
        }

        let mut categories = self.categories.borrow_mut();
        let id = match category.state() {
            EntityState::Transient => {
                self.next_id.set(self.next_id.get() + 1);
                CategoryId::new(self.next_id.get())?
            }
            EntityState::Persisted(id) => id,
        };

        let mut stored = category.clone();
        stored.mark_persisted(id);

        match category.state() {
            EntityState::Transient => categories.push(stored),
            EntityState::Persisted(_) => {
                let slot = categories
                    .iter_mut()
                    .find(|c| c.id() == Some(id))
                    .ok_or(RepositoryError::NotFound)?;
                *slot = stored;
            }
        }

        category.mark_persisted(id);
        Ok(id)
    }
}
