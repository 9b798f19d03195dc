//! PostgreSQL-backed pupil repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{PupilRepository, RepositoryError};
use crate::domain::{ClassId, Pupil, PupilDraft, PupilId};

use super::error_mapping::{map_delete_error, map_diesel_error, map_pool_error};
use super::models::{PupilRow, PupilValues};
use super::pool::DbPool;
use super::schema::pupils;

/// Diesel implementation of [`PupilRepository`].
#[derive(Clone)]
pub struct DieselPupilRepository {
    pool: DbPool,
}

impl DieselPupilRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PupilRepository for DieselPupilRepository {
    async fn create(&self, draft: &PupilDraft) -> Result<Pupil, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(pupils::table)
            .values(PupilValues::from(draft))
            .returning(PupilRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list(&self, class_id: Option<ClassId>) -> Result<Vec<Pupil>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = pupils::table
            .order(pupils::id.asc())
            .select(PupilRow::as_select())
            .into_boxed();
        if let Some(id) = class_id {
            query = query.filter(pupils::class_id.eq(id.get()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: PupilId) -> Result<Option<Pupil>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = pupils::table
            .find(id.get())
            .select(PupilRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: PupilId,
        draft: &PupilDraft,
    ) -> Result<Option<Pupil>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(pupils::table.find(id.get()))
            .set(PupilValues::from(draft))
            .returning(PupilRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: PupilId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(pupils::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
