//! PostgreSQL-backed class repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{ClassRepository, RepositoryError};
use crate::domain::{Class, ClassDraft, ClassId, SchoolYearId};

use super::error_mapping::{map_delete_error, map_diesel_error, map_pool_error};
use super::models::{ClassRow, ClassValues};
use super::pool::DbPool;
use super::schema::classes;

/// Diesel implementation of [`ClassRepository`].
#[derive(Clone)]
pub struct DieselClassRepository {
    pool: DbPool,
}

impl DieselClassRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClassRepository for DieselClassRepository {
    async fn create(&self, draft: &ClassDraft) -> Result<Class, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(classes::table)
            .values(ClassValues::from(draft))
            .returning(ClassRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list(
        &self,
        school_year_id: Option<SchoolYearId>,
    ) -> Result<Vec<Class>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = classes::table
            .order(classes::id.asc())
            .select(ClassRow::as_select())
            .into_boxed();
        if let Some(id) = school_year_id {
            query = query.filter(classes::school_year_id.eq(id.get()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: ClassId) -> Result<Option<Class>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = classes::table
            .find(id.get())
            .select(ClassRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: ClassId,
        draft: &ClassDraft,
    ) -> Result<Option<Class>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(classes::table.find(id.get()))
            .set(ClassValues::from(draft))
            .returning(ClassRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: ClassId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(classes::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
