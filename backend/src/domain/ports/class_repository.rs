//! Port for class persistence.

use async_trait::async_trait;

use crate::domain::{Class, ClassDraft, ClassId, SchoolYearId};

use super::RepositoryError;

/// Storage for classes.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClassRepository: Send + Sync {
    /// Insert a new class.
    ///
    /// Fails with [`RepositoryError::MissingReference`] when the school year
    /// vanished after the caller checked it.
    async fn create(&self, draft: &ClassDraft) -> Result<Class, RepositoryError>;

    /// Classes in id order, optionally limited to one school year.
    async fn list(&self, school_year_id: Option<SchoolYearId>)
    -> Result<Vec<Class>, RepositoryError>;

    /// Look up one class.
    async fn find(&self, id: ClassId) -> Result<Option<Class>, RepositoryError>;

    /// Replace all fields; `None` when the row does not exist.
    async fn update(&self, id: ClassId, draft: &ClassDraft)
    -> Result<Option<Class>, RepositoryError>;

    /// Remove a class; `false` when the row does not exist.
    async fn delete(&self, id: ClassId) -> Result<bool, RepositoryError>;
}
