//! In-process store implementing every repository port.
//!
//! Used when no database URL is configured and by HTTP test suites. It
//! enforces the same referential rules as the PostgreSQL schema. Imports run
//! against a staged copy that replaces the live state only on success.

mod state;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::Mutex;

use crate::domain::ports::{
    CategoryRepository, ClassRepository, EntryRepository, ImportSink, PupilRepository, Reference,
    RepositoryError, SchoolYearRepository, SnapshotRepository,
};
use crate::domain::{
    Category, CategoryDraft, CategoryId, Class, ClassDraft, ClassId, Entry, EntryDraft,
    EntryFilter, EntryId, ImportError, ImportSummary, Pupil, PupilDraft, PupilId, SchoolYear,
    SchoolYearDraft, SchoolYearId, Snapshot, reconcile,
};

use self::state::MemoryState;

/// Shared handle to the in-memory tables.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SchoolYearRepository for InMemoryStore {
    async fn create(&self, draft: &SchoolYearDraft) -> Result<SchoolYear, RepositoryError> {
        Ok(self.state.lock().await.insert_school_year(draft))
    }

    async fn list(&self) -> Result<Vec<SchoolYear>, RepositoryError> {
        Ok(self.state.lock().await.school_years())
    }

    async fn find(&self, id: SchoolYearId) -> Result<Option<SchoolYear>, RepositoryError> {
        Ok(self.state.lock().await.school_year(id))
    }

    async fn find_active(&self) -> Result<Option<SchoolYear>, RepositoryError> {
        Ok(self.state.lock().await.active_school_year())
    }

    async fn update(
        &self,
        id: SchoolYearId,
        draft: &SchoolYearDraft,
    ) -> Result<Option<SchoolYear>, RepositoryError> {
        Ok(self.state.lock().await.update_school_year(id, draft))
    }

    async fn delete(&self, id: SchoolYearId) -> Result<bool, RepositoryError> {
        self.state.lock().await.delete_school_year(id)
    }
}

#[async_trait]
impl ClassRepository for InMemoryStore {
    async fn create(&self, draft: &ClassDraft) -> Result<Class, RepositoryError> {
        self.state.lock().await.insert_class(draft)
    }

    async fn list(
        &self,
        school_year_id: Option<SchoolYearId>,
    ) -> Result<Vec<Class>, RepositoryError> {
        Ok(self.state.lock().await.classes(school_year_id))
    }

    async fn find(&self, id: ClassId) -> Result<Option<Class>, RepositoryError> {
        Ok(self.state.lock().await.class(id))
    }

    async fn update(
        &self,
        id: ClassId,
        draft: &ClassDraft,
    ) -> Result<Option<Class>, RepositoryError> {
        self.state.lock().await.update_class(id, draft)
    }

    async fn delete(&self, id: ClassId) -> Result<bool, RepositoryError> {
        self.state.lock().await.delete_class(id)
    }
}

#[async_trait]
impl PupilRepository for InMemoryStore {
    async fn create(&self, draft: &PupilDraft) -> Result<Pupil, RepositoryError> {
        self.state.lock().await.insert_pupil(draft)
    }

    async fn list(&self, class_id: Option<ClassId>) -> Result<Vec<Pupil>, RepositoryError> {
        Ok(self.state.lock().await.pupils(class_id))
    }

    async fn find(&self, id: PupilId) -> Result<Option<Pupil>, RepositoryError> {
        Ok(self.state.lock().await.pupil(id))
    }

    async fn update(
        &self,
        id: PupilId,
        draft: &PupilDraft,
    ) -> Result<Option<Pupil>, RepositoryError> {
        self.state.lock().await.update_pupil(id, draft)
    }

    async fn delete(&self, id: PupilId) -> Result<bool, RepositoryError> {
        self.state.lock().await.delete_pupil(id)
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn create(&self, draft: &CategoryDraft) -> Result<Category, RepositoryError> {
        Ok(self.state.lock().await.insert_category(draft))
    }

    async fn list(&self, predefined_only: bool) -> Result<Vec<Category>, RepositoryError> {
        Ok(self.state.lock().await.categories(predefined_only))
    }

    async fn find(&self, id: CategoryId) -> Result<Option<Category>, RepositoryError> {
        Ok(self.state.lock().await.category(id))
    }

    async fn count_predefined(&self) -> Result<i64, RepositoryError> {
        let count = self.state.lock().await.categories(true).len();
        i64::try_from(count).map_err(|err| RepositoryError::query(err.to_string()))
    }

    async fn update(
        &self,
        id: CategoryId,
        draft: &CategoryDraft,
    ) -> Result<Option<Category>, RepositoryError> {
        Ok(self.state.lock().await.update_category(id, draft))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, RepositoryError> {
        self.state.lock().await.delete_category(id)
    }
}

#[async_trait]
impl EntryRepository for InMemoryStore {
    async fn create(&self, draft: &EntryDraft) -> Result<Entry, RepositoryError> {
        self.state.lock().await.insert_entry(draft)
    }

    async fn list(&self, filter: EntryFilter) -> Result<Vec<Entry>, RepositoryError> {
        Ok(self.state.lock().await.entries(filter))
    }

    async fn list_for_pupil_between(
        &self,
        pupil_id: PupilId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Entry>, RepositoryError> {
        Ok(self.state.lock().await.entries_between(pupil_id, start, end))
    }

    async fn find(&self, id: EntryId) -> Result<Option<Entry>, RepositoryError> {
        Ok(self.state.lock().await.entry(id))
    }

    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
    ) -> Result<Option<Entry>, RepositoryError> {
        self.state.lock().await.update_entry(id, draft)
    }

    async fn delete(&self, id: EntryId) -> Result<bool, RepositoryError> {
        Ok(self.state.lock().await.delete_entry(id))
    }
}

/// Import sink writing into a staged copy of the tables.
struct StagedSink<'a> {
    staged: &'a mut MemoryState,
}

#[async_trait]
impl ImportSink for StagedSink<'_> {
    async fn insert_school_year(
        &mut self,
        draft: &SchoolYearDraft,
    ) -> Result<SchoolYearId, RepositoryError> {
        Ok(self.staged.insert_school_year(draft).id)
    }

    async fn insert_class(&mut self, draft: &ClassDraft) -> Result<ClassId, RepositoryError> {
        Ok(self.staged.insert_class(draft)?.id)
    }

    async fn insert_pupil(&mut self, draft: &PupilDraft) -> Result<PupilId, RepositoryError> {
        Ok(self.staged.insert_pupil(draft)?.id)
    }

    async fn insert_category(
        &mut self,
        draft: &CategoryDraft,
    ) -> Result<CategoryId, RepositoryError> {
        Ok(self.staged.insert_category(draft).id)
    }

    async fn insert_entry(&mut self, draft: &EntryDraft) -> Result<EntryId, RepositoryError> {
        Ok(self.staged.insert_entry(draft)?.id)
    }

    async fn find_predefined_category(
        &mut self,
        name_de: &str,
        name_en: &str,
    ) -> Result<Option<CategoryId>, RepositoryError> {
        Ok(self.staged.predefined_category(name_de, name_en))
    }

    async fn contains(&mut self, reference: Reference) -> Result<bool, RepositoryError> {
        Ok(self.staged.contains(reference))
    }
}

#[async_trait]
impl SnapshotRepository for InMemoryStore {
    async fn load_snapshot(&self) -> Result<Snapshot, RepositoryError> {
        let state = self.state.lock().await;
        Ok(Snapshot::from_rows(
            state.school_years(),
            state.classes(None),
            state.pupils(None),
            state.categories(false),
            state.entries(EntryFilter::default()),
        ))
    }

    async fn import_snapshot(&self, snapshot: &Snapshot) -> Result<ImportSummary, ImportError> {
        let mut live = self.state.lock().await;
        let mut staged = live.clone();
        let summary = reconcile(snapshot, &mut StagedSink { staged: &mut staged }).await?;
        *live = staged;
        Ok(summary)
    }
}
