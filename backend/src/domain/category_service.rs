//! Use cases for categories, including startup seeding.

use std::sync::Arc;

use tracing::info;

use super::ports::CategoryRepository;
use super::repository_errors::map_repository_error;
use super::{Category, CategoryDraft, CategoryId, Error, Validate};

const ENTITY: &str = "Category";

fn not_found() -> Error {
    Error::not_found("Category not found")
}

/// Category CRUD that protects predefined rows.
#[derive(Clone)]
pub struct CategoryService {
    repo: Arc<dyn CategoryRepository>,
}

impl CategoryService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn CategoryRepository>) -> Self {
        Self { repo }
    }

    /// Insert the predefined set unless any predefined category exists.
    ///
    /// Returns the number of categories created. The check is deliberately
    /// coarse: a partially deleted set is not topped up.
    pub async fn seed_predefined(&self) -> Result<usize, Error> {
        let existing = self
            .repo
            .count_predefined()
            .await
            .map_err(map_repository_error(ENTITY))?;
        if existing > 0 {
            return Ok(0);
        }
        let mut created = 0;
        for draft in CategoryDraft::predefined() {
            self.repo
                .create(&draft)
                .await
                .map_err(map_repository_error(ENTITY))?;
            created += 1;
        }
        info!(created, "predefined categories seeded");
        Ok(created)
    }

    /// Validate and store a new category.
    pub async fn create(&self, draft: CategoryDraft) -> Result<Category, Error> {
        draft.validate()?;
        let category = self
            .repo
            .create(&draft)
            .await
            .map_err(map_repository_error(ENTITY))?;
        info!(category_id = %category.id, predefined = category.is_predefined, "category created");
        Ok(category)
    }

    /// Categories, optionally only predefined ones.
    pub async fn list(&self, predefined_only: bool) -> Result<Vec<Category>, Error> {
        self.repo
            .list(predefined_only)
            .await
            .map_err(map_repository_error(ENTITY))
    }

    /// One category.
    pub async fn get(&self, id: CategoryId) -> Result<Category, Error> {
        self.repo
            .find(id)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)
    }

    /// Replace both labels; the stored predefined flag is kept.
    pub async fn update(&self, id: CategoryId, draft: CategoryDraft) -> Result<Category, Error> {
        draft.validate()?;
        let current = self.get(id).await?;
        let draft = CategoryDraft {
            is_predefined: current.is_predefined,
            ..draft
        };
        let category = self
            .repo
            .update(id, &draft)
            .await
            .map_err(map_repository_error(ENTITY))?
            .ok_or_else(not_found)?;
        info!(category_id = %category.id, "category updated");
        Ok(category)
    }

    /// Delete a custom category without entries.
    pub async fn delete(&self, id: CategoryId) -> Result<(), Error> {
        let current = self.get(id).await?;
        if current.is_predefined {
            return Err(Error::forbidden("Cannot delete predefined category"));
        }
        if !self
            .repo
            .delete(id)
            .await
            .map_err(map_repository_error(ENTITY))?
        {
            return Err(not_found());
        }
        info!(category_id = %id, "category deleted");
        Ok(())
    }
}
