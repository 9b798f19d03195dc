//! Use cases for school years.

use std::sync::Arc;

use tracing::info;

use super::ports::SchoolYearRepository;
use super::repository_errors::map_repository_error;
use super::{Error, SchoolYear, SchoolYearDraft, SchoolYearId, Validate};

const ENTITY: &str = "School year";

fn not_found() -> Error {
    Error::not_found("School year not found")
}

/// School year CRUD plus the active-year lookup.
#[derive(Clone)]
pub struct SchoolYearService {
    repo: Arc<dyn SchoolYearRepository>,
}

impl SchoolYearService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn SchoolYearRepository>) -> Self {
        Self { repo }
    }

    /// Validate and store a new school year.
    pub async fn create(&self, draft: SchoolYearDraft) -> Result<SchoolYear, Error> {
        draft.validate()?;
        let year = self
            .repo
            .create(&draft)
            .await
            .map_err(map_repository_error(ENTITY))?;
        info!(school_year_id = %year.id, active = year.is_active, "school year created");
        Ok(year)
    }

    /// All school years.
    pub async fn list(&self) -> Result<Vec<SchoolYear>, Error> {
        self.repo.list().await.map_err(map_repository_error(ENTITY))
    }

    /// One school year.
    pub async fn get(&self, id: SchoolYearId) -> Result<SchoolYear, Error> {
        self.repo
            .find(id)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)
    }

    /// The school year flagged active.
    pub async fn get_active(&self) -> Result<SchoolYear, Error> {
        self.repo
            .find_active()
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(|| Error::not_found("No active school year"))
    }

    /// Replace every field of a school year.
    pub async fn update(&self, id: SchoolYearId, draft: SchoolYearDraft) -> Result<SchoolYear, Error> {
        draft.validate()?;
        let year = self
            .repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)?;
        info!(school_year_id = %year.id, active = year.is_active, "school year updated");
        Ok(year)
    }

    /// Delete a school year without classes.
    pub async fn delete(&self, id: SchoolYearId) -> Result<(), Error> {
        if !self
            .repo
            .delete(id)
            .await
            .map_err(map_repository_error(ENTITY))?
        {
            return Err(not_found());
        }
        info!(school_year_id = %id, "school year deleted");
        Ok(())
    }
}
