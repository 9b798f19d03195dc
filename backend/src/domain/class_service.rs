//! Use cases for classes.

use std::sync::Arc;

use tracing::info;

use super::ports::{ClassRepository, SchoolYearRepository};
use super::repository_errors::map_repository_error;
use super::{Class, ClassDraft, ClassId, Error, SchoolYearId, Validate};

const ENTITY: &str = "Class";

fn not_found() -> Error {
    Error::not_found("Class not found")
}

/// Class CRUD with explicit school year checks.
#[derive(Clone)]
pub struct ClassService {
    classes: Arc<dyn ClassRepository>,
    school_years: Arc<dyn SchoolYearRepository>,
}

impl ClassService {
    /// Create a service over the given repositories.
    pub fn new(
        classes: Arc<dyn ClassRepository>,
        school_years: Arc<dyn SchoolYearRepository>,
    ) -> Self {
        Self {
            classes,
            school_years,
        }
    }

    async fn check_parent(&self, draft: &ClassDraft) -> Result<(), Error> {
        let parent = self
            .school_years
            .find(draft.school_year_id)
            .await
            .map_err(map_repository_error(ENTITY))?;
        match parent {
            Some(_) => Ok(()),
            None => Err(Error::unknown_reference(
                "school_year_id",
                "school year",
                draft.school_year_id.get(),
            )),
        }
    }

    /// Validate and store a new class.
    pub async fn create(&self, draft: ClassDraft) -> Result<Class, Error> {
        draft.validate()?;
        self.check_parent(&draft).await?;
        let class = self
            .classes
            .create(&draft)
            .await
            .map_err(map_repository_error(ENTITY))?;
        info!(class_id = %class.id, school_year_id = %class.school_year_id, "class created");
        Ok(class)
    }

    /// Classes, optionally of one school year.
    pub async fn list(&self, school_year_id: Option<SchoolYearId>) -> Result<Vec<Class>, Error> {
        self.classes
            .list(school_year_id)
            .await
            .map_err(map_repository_error(ENTITY))
    }

    /// One class.
    pub async fn get(&self, id: ClassId) -> Result<Class, Error> {
        self.classes
            .find(id)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)
    }

    /// Replace every field of a class.
    pub async fn update(&self, id: ClassId, draft: ClassDraft) -> Result<Class, Error> {
        draft.validate()?;
        self.get(id).await?;
        self.check_parent(&draft).await?;
        let class = self
            .classes
            .update(id, &draft)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)?;
        info!(class_id = %class.id, "class updated");
        Ok(class)
    }

    /// Delete a class without pupils.
    pub async fn delete(&self, id: ClassId) -> Result<(), Error> {
        if !self
            .classes
            .delete(id)
            .await
            .map_err(map_repository_error(ENTITY))?
        {
            return Err(not_found());
        }
        info!(class_id = %id, "class deleted");
        Ok(())
    }
}
