//! Port for entry persistence.

use async_trait::async_trait;
use chrono::NaiveDate;

use crate::domain::{Entry, EntryDraft, EntryFilter, EntryId, PupilId};

use super::RepositoryError;

/// Storage for entries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert a new entry.
    async fn create(&self, draft: &EntryDraft) -> Result<Entry, RepositoryError>;

    /// Entries in id order matching `filter`.
    async fn list(&self, filter: EntryFilter) -> Result<Vec<Entry>, RepositoryError>;

    /// Entries about one pupil dated within `[start, end]`, in id order.
    async fn list_for_pupil_between(
        &self,
        pupil_id: PupilId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Entry>, RepositoryError>;

    /// Look up one entry.
    async fn find(&self, id: EntryId) -> Result<Option<Entry>, RepositoryError>;

    /// Replace all fields; `None` when the row does not exist.
    async fn update(&self, id: EntryId, draft: &EntryDraft)
    -> Result<Option<Entry>, RepositoryError>;

    /// Remove an entry; `false` when the row does not exist.
    async fn delete(&self, id: EntryId) -> Result<bool, RepositoryError>;
}
