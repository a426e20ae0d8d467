pub mod categories;

pub use pushkind_common::services::errors::{ServiceError, ServiceResult};
