//! Use cases for entries.

use std::sync::Arc;

use tracing::info;

use super::ports::{CategoryRepository, EntryRepository, PupilRepository};
use super::repository_errors::map_repository_error;
use super::{Entry, EntryDraft, EntryFilter, EntryId, Error, Validate};

const ENTITY: &str = "Entry";

fn not_found() -> Error {
    Error::not_found("Entry not found")
}

/// Entry CRUD with explicit pupil and category checks.
#[derive(Clone)]
pub struct EntryService {
    entries: Arc<dyn EntryRepository>,
    pupils: Arc<dyn PupilRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl EntryService {
    /// Create a service over the given repositories.
    pub fn new(
        entries: Arc<dyn EntryRepository>,
        pupils: Arc<dyn PupilRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            entries,
            pupils,
            categories,
        }
    }

    async fn check_parents(&self, draft: &EntryDraft) -> Result<(), Error> {
        let map_error = map_repository_error(ENTITY);
        let pupil = self.pupils.find(draft.pupil_id).await.map_err(&map_error)?;
        if pupil.is_none() {
            return Err(Error::unknown_reference(
                "pupil_id",
                "pupil",
                draft.pupil_id.get(),
            ));
        }
        let category = self
            .categories
            .find(draft.category_id)
            .await
            .map_err(&map_error)?;
        if category.is_none() {
            return Err(Error::unknown_reference(
                "category_id",
                "category",
                draft.category_id.get(),
            ));
        }
        Ok(())
    }

    /// Validate and store a new entry.
    pub async fn create(&self, draft: EntryDraft) -> Result<Entry, Error> {
        draft.validate()?;
        self.check_parents(&draft).await?;
        let entry = self
            .entries
            .create(&draft)
            .await
            .map_err(map_repository_error(ENTITY))?;
        info!(entry_id = %entry.id, pupil_id = %entry.pupil_id, "entry created");
        Ok(entry)
    }

    /// Entries matching `filter`.
    pub async fn list(&self, filter: EntryFilter) -> Result<Vec<Entry>, Error> {
        self.entries
            .list(filter)
            .await
            .map_err(map_repository_error(ENTITY))
    }

    /// One entry.
    pub async fn get(&self, id: EntryId) -> Result<Entry, Error> {
        self.entries
            .find(id)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)
    }

    /// Replace every field of an entry.
    pub async fn update(&self, id: EntryId, draft: EntryDraft) -> Result<Entry, Error> {
        draft.validate()?;
        self.get(id).await?;
        self.check_parents(&draft).await?;
        let entry = self
            .entries
            .update(id, &draft)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)?;
        info!(entry_id = %entry.id, "entry updated");
        Ok(entry)
    }

    /// Delete an entry.
    pub async fn delete(&self, id: EntryId) -> Result<(), Error> {
        if !self
            .entries
            .delete(id)
            .await
            .map_err(map_repository_error(ENTITY))?
        {
            return Err(not_found());
        }
        info!(entry_id = %id, "entry deleted");
        Ok(())
    }
}
