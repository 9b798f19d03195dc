//! Use cases for pupils.

use std::sync::Arc;

use tracing::info;

use super::ports::{ClassRepository, PupilRepository};
use super::repository_errors::map_repository_error;
use super::{ClassId, Error, Pupil, PupilDraft, PupilId, Validate};

const ENTITY: &str = "Pupil";

fn not_found() -> Error {
    Error::not_found("Pupil not found")
}

/// Pupil CRUD with explicit class checks.
#[derive(Clone)]
pub struct PupilService {
    pupils: Arc<dyn PupilRepository>,
    classes: Arc<dyn ClassRepository>,
}

impl PupilService {
    /// Create a service over the given repositories.
    pub fn new(pupils: Arc<dyn PupilRepository>, classes: Arc<dyn ClassRepository>) -> Self {
        Self { pupils, classes }
    }

    async fn check_parent(&self, draft: &PupilDraft) -> Result<(), Error> {
        let parent = self
            .classes
            .find(draft.class_id)
            .await
            .map_err(map_repository_error(ENTITY))?;
        if parent.is_none() {
            return Err(Error::unknown_reference(
                "class_id",
                "class",
                draft.class_id.get(),
            ));
        }
        Ok(())
    }

    /// Validate and store a new pupil.
    pub async fn create(&self, draft: PupilDraft) -> Result<Pupil, Error> {
        draft.validate()?;
        self.check_parent(&draft).await?;
        let pupil = self
            .pupils
            .create(&draft)
            .await
            .map_err(map_repository_error(ENTITY))?;
        info!(pupil_id = %pupil.id, class_id = %pupil.class_id, "pupil created");
        Ok(pupil)
    }

    /// Pupils, optionally of one class.
    pub async fn list(&self, class_id: Option<ClassId>) -> Result<Vec<Pupil>, Error> {
        self.pupils
            .list(class_id)
            .await
            .map_err(map_repository_error(ENTITY))
    }

    /// One pupil.
    pub async fn get(&self, id: PupilId) -> Result<Pupil, Error> {
        self.pupils
            .find(id)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)
    }

    /// Replace every field of a pupil.
    pub async fn update(&self, id: PupilId, draft: PupilDraft) -> Result<Pupil, Error> {
        draft.validate()?;
        self.get(id).await?;
        self.check_parent(&draft).await?;
        let pupil = self
            .pupils
            .update(id, &draft)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)?;
        info!(pupil_id = %pupil.id, "pupil updated");
        Ok(pupil)
    }

    /// Delete a pupil without entries.
    pub async fn delete(&self, id: PupilId) -> Result<(), Error> {
        if !self
            .pupils
            .delete(id)
            .await
            .map_err(map_repository_error(ENTITY))?
        {
            return Err(not_found());
        }
        info!(pupil_id = %id, "pupil deleted");
        Ok(())
    }
}
