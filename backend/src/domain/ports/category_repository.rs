//! Port for category persistence.

use async_trait::async_trait;

use crate::domain::{Category, CategoryDraft, CategoryId};

use super::RepositoryError;

/// Storage for categories.
///
/// The store writes `is_predefined` exactly as given; protecting the flag on
/// update is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Insert a new category.
    async fn create(&self, draft: &CategoryDraft) -> Result<Category, RepositoryError>;

    /// Categories in id order, optionally only the predefined ones.
    async fn list(&self, predefined_only: bool) -> Result<Vec<Category>, RepositoryError>;

    /// Look up one category.
    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError>;

    /// Number of predefined categories currently stored.
    async fn count_predefined(&self) -> Result<i64, RepositoryError>;

    /// Replace all fields; `None` when the row does not exist.
    async fn update(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, RepositoryError>;

    /// Remove a category; `false` when the row does not exist.
    async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError>;
}
