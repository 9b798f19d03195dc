//! Port for school year persistence.

use async_trait::async_trait;

use crate::domain::{SchoolYear, SchoolYearDraft, SchoolYearId};

use super::RepositoryError;

/// Storage for school years.
///
/// Writing a draft with `is_active = true` must clear the flag on every other
/// school year in the same transaction.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SchoolYearRepository: Send + Sync {
    /// Insert a new school year.
    async fn create(&self, draft: &SchoolYearDraft) -> Result<SchoolYear, RepositoryError>;

    /// All school years in id order.
    async fn list(&self) -> Result<Vec<SchoolYear>, RepositoryError>;

    /// Look up one school year.
    async fn find(&self, id: SchoolYearId) -> Result<Option<SchoolYear>, RepositoryError>;

    /// The school year flagged active, if any.
    async fn find_active(&self) -> Result<Option<SchoolYear>, RepositoryError>;

    /// Replace all fields; `None` when the row does not exist.
    async fn update(
        &self,
        id: SchoolYearId,
        draft: &SchoolYearDraft,
    ) -> Result<Option<SchoolYear>, RepositoryError>;

    /// Remove a school year; `false` when the row does not exist.
    ///
    /// Fails with [`RepositoryError::StillReferenced`] while classes point at
    /// the row.
    async fn delete(&self, id: SchoolYearId) -> Result<bool, RepositoryError>;
}
