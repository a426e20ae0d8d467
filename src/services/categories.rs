use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_common::repository::errors::RepositoryError;
use pushkind_common::routes::check_role;

use crate::SERVICE_ACCESS_ROLE;
use crate::domain::category::Category;
use crate::domain::types::CategoryId;
use crate::dto::categories::CategoryDto;
use crate::forms::categories::{CategoryForm, CategoryFormPayload, FieldErrors};
use crate::repository::{CategoryReader, CategoryWriter};

use super::{ServiceError, ServiceResult};

/// Whether a successful submission inserted or updated the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveAction {
    Created,
    Updated,
}

impl SaveAction {
    /// Confirmation shown to the user after the save.
    pub const fn success_message(self) -> &'static str {
        match self {
            Self::Created => "Category created.",
            Self::Updated => "Category updated.",
        }
    }
}

/// Outcome of [`submit_category`].
#[derive(Debug)]
pub enum CategorySubmission {
    /// The category was written; the caller should redirect to the list.
    Saved { id: CategoryId, action: SaveAction },
    /// The form did not validate; nothing was written.
    Invalid {
        category: Category,
        form: CategoryForm,
        errors: FieldErrors,
    },
}

fn ensure_access(user: &AuthenticatedUser) -> ServiceResult<()> {
    if check_role(SERVICE_ACCESS_ROLE, &user.roles) {
        Ok(())
    } else {
        Err(ServiceError::Unauthorized)
    }
}

/// List every category ordered by name for the admin index page.
pub fn show_categories<R>(user: &AuthenticatedUser, repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    ensure_access(user)?;

    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Seed the create form with a fresh, unsaved category.
pub fn new_category(user: &AuthenticatedUser) -> ServiceResult<Category> {
    ensure_access(user)?;
    Ok(Category::new())
}

/// Load an existing category for the edit form.
pub fn edit_category<R>(
    category_id: CategoryId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Category>
where
    R: CategoryReader,
{
    ensure_access(user)?;

    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(category),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Validate `form`, apply it to `category` and store the result.
///
/// Invalid input hands the untouched category back together with the submitted
/// form and its field errors. Valid input renames the category, which
/// re-derives the slug, and saves it: transient categories are inserted,
/// persisted ones updated in place.
pub fn submit_category<R>(
    mut category: Category,
    form: CategoryForm,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<CategorySubmission>
where
    R: CategoryWriter,
{
    ensure_access(user)?;

    let payload = match CategoryFormPayload::try_from(form.clone()) {
        Ok(payload) => payload,
        Err(e) => {
            log::debug!("Rejected category form: {e}");
            return Ok(CategorySubmission::Invalid {
                category,
                form,
                errors: e.field_errors(),
            });
        }
    };

    let action = if category.is_persisted() {
        SaveAction::Updated
    } else {
        SaveAction::Created
    };

    category.rename(payload.name);

    match repo.save_category(&mut category) {
        Ok(id) => {
            log::info!(
                "Category {id} {} by {}: '{}' ({})",
                match action {
                    SaveAction::Created => "created",
                    SaveAction::Updated => "updated",
                },
                user.email,
                category.name(),
                category.slug(),
            );
            Ok(CategorySubmission::Saved { id, action })
        }
        Err(RepositoryError::NotFound) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to save category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::slug::slugify;
    use crate::domain::types::CategoryName;
    use crate::repository::test::TestRepository;

    fn sample_user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "1".into(),
            email: "test@example.com".into(),
            hub_id: 1,
            name: "Test".into(),
            roles: vec![SERVICE_ACCESS_ROLE.into()],
            exp: 0,
        }
    }

    fn guest_user() -> AuthenticatedUser {
        AuthenticatedUser {
            roles: vec!["user".into()],
            ..sample_user()
        }
    }

    fn stored_category(repo: &TestRepository, name: &str) -> Category {
        let mut category = Category::new();
        category.rename(CategoryName::new(name).unwrap());
        repo.save_category(&mut category).unwrap();
        category
    }

    #[test]
    fn shows_categories_sorted_by_name() {
        let repo = TestRepository::default();
        for name in ["Zebra", "Apple", "Mango"] {
            stored_category(&repo, name);
        }

        let categories = show_categories(&sample_user(), &repo).unwrap();
        let names = categories.iter().map(|c| c.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["Apple", "Mango", "Zebra"]);
    }

    #[test]
    fn show_categories_requires_admin_role() {
        let repo = TestRepository::default();
        let err = show_categories(&guest_user(), &repo).unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
    }

    #[test]
    fn new_category_is_transient() {
        let category = new_category(&sample_user()).unwrap();
        assert!(!category.is_persisted());
        assert!(category.posts().is_empty());
    }

    #[test]
    fn submit_inserts_transient_category() {
        let repo = TestRepository::default();
        let category = new_category(&sample_user()).unwrap();

        let outcome = submit_category(
            category,
            CategoryForm::with_name("Rust Tips"),
            &sample_user(),
            &repo,
        )
        .unwrap();

        let CategorySubmission::Saved { id, action } = outcome else {
            panic!("expected a saved category");
        };
        assert_eq!(action, SaveAction::Created);

        let stored = repo.get_category_by_id(id).unwrap().unwrap();
        assert!(stored.is_persisted());
        assert_eq!(stored.name(), "Rust Tips");
        assert_eq!(stored.slug(), slugify("Rust Tips"));
    }

    #[test]
    fn submit_updates_persisted_category_without_duplicating() {
        let repo = TestRepository::default();
        let original = stored_category(&repo, "Old Name");
        let id = original.id().unwrap();

        let category = edit_category(id, &sample_user(), &repo).unwrap();
        let outcome = submit_category(
            category,
            CategoryForm::with_name("New Name"),
            &sample_user(),
            &repo,
        )
        .unwrap();

        assert!(matches!(
            outcome,
            CategorySubmission::Saved {
                action: SaveAction::Updated,
                ..
            }
        ));

        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].id(), Some(id));
        assert_eq!(stored[0].name(), "New Name");
        assert_eq!(stored[0].slug(), "new-name");
        assert_eq!(stored[0].created_at(), original.created_at());
    }

    #[test]
    fn submit_with_short_name_leaves_storage_unchanged() {
        let repo = TestRepository::default();
        let category = new_category(&sample_user()).unwrap();

        let outcome =
            submit_category(category, CategoryForm::with_name("a"), &sample_user(), &repo)
                .unwrap();

        let CategorySubmission::Invalid {
            category,
            form,
            errors,
        } = outcome
        else {
            panic!("expected validation errors");
        };
        assert!(!category.is_persisted());
        assert_eq!(form.name, "a");
        assert!(errors.contains_key("name"));
        assert!(repo.stored().is_empty());
    }

    #[test]
    fn submit_with_long_name_leaves_storage_unchanged() {
        let repo = TestRepository::default();
        let original = stored_category(&repo, "Keep Me");
        let category = edit_category(original.id().unwrap(), &sample_user(), &repo).unwrap();

        let outcome = submit_category(
            category,
            CategoryForm::with_name("x".repeat(51)),
            &sample_user(),
            &repo,
        )
        .unwrap();

        let CategorySubmission::Invalid { category, .. } = outcome else {
            panic!("expected validation errors");
        };
        assert_eq!(category.name(), "Keep Me");
        assert_eq!(category.slug(), "keep-me");

        let stored = repo.stored();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].name(), "Keep Me");
    }

    #[test]
    fn edit_missing_category_is_not_found() {
        let repo = TestRepository::default();
        let err = edit_category(CategoryId::new(99999).unwrap(), &sample_user(), &repo)
            .unwrap_err();
        assert!(matches!(err, ServiceError::NotFound));
    }

    #[test]
    fn submit_reports_storage_failure_as_internal() {
        let repo = TestRepository::default().failing_writes();
        let category = new_category(&sample_user()).unwrap();

        let err = submit_category(
            category,
            CategoryForm::with_name("Rust Tips"),
            &sample_user(),
            &repo,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Internal));
    }

    #[test]
    fn submit_requires_admin_role() {
        let repo = TestRepository::default();
        let err = submit_category(
            Category::new(),
            CategoryForm::with_name("Rust Tips"),
            &guest_user(),
            &repo,
        )
        .unwrap_err();
        assert!(matches!(err, ServiceError::Unauthorized));
        assert!(repo.stored().is_empty());
    }

    #[test]
    fn success_messages_differ_by_action() {
        assert_ne!(
            SaveAction::Created.success_message(),
            SaveAction::Updated.success_message()
        );
    }
}
