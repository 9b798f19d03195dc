//! PostgreSQL-backed entry repository.

use async_trait::async_trait;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{EntryRepository, RepositoryError};
use crate::domain::{Entry, EntryDraft, EntryFilter, EntryId, PupilId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{EntryRow, EntryValues};
use super::pool::DbPool;
use super::schema::entries;

/// Diesel implementation of [`EntryRepository`].
#[derive(Clone)]
pub struct DieselEntryRepository {
    pool: DbPool,
}

impl DieselEntryRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EntryRepository for DieselEntryRepository {
    async fn create(&self, draft: &EntryDraft) -> Result<Entry, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::insert_into(entries::table)
            .values(EntryValues::from(draft))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list(&self, filter: EntryFilter) -> Result<Vec<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let mut query = entries::table
            .order(entries::id.asc())
            .select(EntryRow::as_select())
            .into_boxed();
        if let Some(id) = filter.pupil_id {
            query = query.filter(entries::pupil_id.eq(id.get()));
        }
        if let Some(id) = filter.category_id {
            query = query.filter(entries::category_id.eq(id.get()));
        }
        let rows = query.load(&mut conn).await.map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn list_for_pupil_between(
        &self,
        pupil_id: PupilId,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = entries::table
            .filter(entries::pupil_id.eq(pupil_id.get()))
            .filter(entries::date.between(start, end))
            .order(entries::id.asc())
            .select(EntryRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: EntryId) -> Result<Option<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = entries::table
            .find(id.get())
            .select(EntryRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: EntryId,
        draft: &EntryDraft,
    ) -> Result<Option<Entry>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = diesel::update(entries::table.find(id.get()))
            .set(EntryValues::from(draft))
            .returning(EntryRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: EntryId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(entries::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(deleted > 0)
    }
}
