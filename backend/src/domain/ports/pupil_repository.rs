//! Port for pupil persistence.

use async_trait::async_trait;

use crate::domain::{ClassId, Pupil, PupilDraft, PupilId};

use super::RepositoryError;

/// Storage for pupils.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PupilRepository: Send + Sync {
    /// Insert a new pupil.
    async fn create(&self, draft: &PupilDraft) -> Result<Pupil, RepositoryError>;

    /// Pupils in id order, optionally limited to one class.
    async fn list(&self, class_id: Option<ClassId>) -> Result<Vec<Pupil>, RepositoryError>;

    /// Look up one pupil.
    async fn find(&self, id: PupilId) -> Result<Option<Pupil>, RepositoryError>;

    /// Replace all fields; `None` when the row does not exist.
    async fn update(&self, id: PupilId, draft: &PupilDraft)
    -> Result<Option<Pupil>, RepositoryError>;

    /// Remove a pupil; `false` when the row does not exist.
    async fn delete(&self, id: PupilId) -> Result<bool, RepositoryError>;
}
