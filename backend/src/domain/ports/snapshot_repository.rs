//! Ports for whole-store export and transactional import.

use async_trait::async_trait;

use crate::domain::{
    CategoryDraft, CategoryId, ClassDraft, ClassId, EntryDraft, EntryId, ImportError,
    ImportSummary, PupilDraft, PupilId, SchoolYearDraft, SchoolYearId, Snapshot,
};

use super::RepositoryError;

/// A parent row the reconciler must see before inserting a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reference {
    /// A school year referenced by a class.
    SchoolYear(SchoolYearId),
    /// A class referenced by a pupil.
    Class(ClassId),
    /// A pupil referenced by an entry.
    Pupil(PupilId),
    /// A category referenced by an entry.
    Category(CategoryId),
}

/// Write handle scoped to one open import transaction.
///
/// Every call observes the rows inserted earlier through the same sink;
/// nothing becomes visible to other readers until the owning
/// [`SnapshotRepository`] commits.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImportSink: Send {
    /// Insert a school year, clearing other active flags when it is active.
    async fn insert_school_year(
        &mut self,
        draft: &SchoolYearDraft,
    ) -> Result<SchoolYearId, RepositoryError>;

    /// Insert a class.
    async fn insert_class(&mut self, draft: &ClassDraft) -> Result<ClassId, RepositoryError>;

    /// Insert a pupil.
    async fn insert_pupil(&mut self, draft: &PupilDraft) -> Result<PupilId, RepositoryError>;

    /// Insert a category.
    async fn insert_category(&mut self, draft: &CategoryDraft)
    -> Result<CategoryId, RepositoryError>;

    /// Insert an entry.
    async fn insert_entry(&mut self, draft: &EntryDraft) -> Result<EntryId, RepositoryError>;

    /// An existing predefined category carrying exactly these labels.
    async fn find_predefined_category(
        &mut self,
        name_de: &str,
        name_en: &str,
    ) -> Result<Option<CategoryId>, RepositoryError>;

    /// Whether the referenced row exists.
    async fn contains(&mut self, reference: Reference) -> Result<bool, RepositoryError>;
}

/// Reads and writes the complete data set.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Every row of every table, read in one consistent transaction.
    async fn load_snapshot(&self) -> Result<Snapshot, RepositoryError>;

    /// Reconcile `snapshot` into the store inside one transaction.
    ///
    /// Either every row is written or none is.
    async fn import_snapshot(&self, snapshot: &Snapshot) -> Result<ImportSummary, ImportError>;
}
