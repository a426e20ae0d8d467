use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::types::{CategoryName, TypeConstraintError};

/// Field name mapped to the messages shown next to it in the form.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Raw category form as submitted by the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CategoryForm {
    #[validate(length(
        min = 2,
        max = 50,
        message = "Category name must be between 2 and 50 characters long"
    ))]
    pub name: String,
}

impl CategoryForm {
    /// Prefill the form with an existing category name.
    pub fn with_name(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
}

#[derive(Debug, Error)]
pub enum CategoryFormError {
    #[error("Category form validation failed: {0}")]
    Validation(ValidationErrors),
    #[error("Category form contains invalid data: {0}")]
    TypeConstraint(String),
}

impl CategoryFormError {
    /// Messages grouped by form field for re-rendering the form.
    pub fn field_errors(&self) -> FieldErrors {
        let mut fields = FieldErrors::new();
        match self {
            Self::Validation(errors) => {
                for (field, errors) in errors.field_errors() {
                    let messages = errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .collect::<Vec<_>>();
                    fields.entry(field.to_string()).or_default().extend(messages);
                }
            }
            Self::TypeConstraint(message) => {
                fields.insert("name".to_string(), vec![message.clone()]);
            }
        }
        fields
    }
}

impl From<ValidationErrors> for CategoryFormError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

impl From<TypeConstraintError> for CategoryFormError {
    fn from(value: TypeConstraintError) -> Self {
        Self::TypeConstraint(value.to_string())
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = CategoryFormError;

    fn try_from(value: CategoryForm) -> Result<Self, Self::Error> {
        let trimmed = CategoryForm {
            name: value.name.trim().to_string(),
        };
        trimmed.validate()?;

        Ok(Self {
            name: CategoryName::new(trimmed.name)?,
        })
    }
}
