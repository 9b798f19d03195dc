//! PostgreSQL-backed school year repository.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};

use crate::domain::ports::{RepositoryError, SchoolYearRepository};
use crate::domain::{SchoolYear, SchoolYearDraft, SchoolYearId};

use super::error_mapping::{map_delete_error, map_diesel_error, map_pool_error};
use super::models::{SchoolYearRow, SchoolYearValues};
use super::pool::DbPool;
use super::schema::school_years;

/// Diesel implementation of [`SchoolYearRepository`].
#[derive(Clone)]
pub struct DieselSchoolYearRepository {
    pool: DbPool,
}

impl DieselSchoolYearRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Clear `is_active` on every row except `keep`.
pub(super) async fn clear_active(
    conn: &mut AsyncPgConnection,
    keep: Option<i32>,
) -> QueryResult<usize> {
    let target = school_years::table.filter(school_years::is_active.eq(true));
    match keep {
        Some(id) => {
            diesel::update(target.filter(school_years::id.ne(id)))
                .set(school_years::is_active.eq(false))
                .execute(conn)
                .await
        }
        None => {
            diesel::update(target)
                .set(school_years::is_active.eq(false))
                .execute(conn)
                .await
        }
    }
}

/// Insert a school year, keeping the single-active rule.
pub(super) async fn insert_school_year(
    conn: &mut AsyncPgConnection,
    draft: &SchoolYearDraft,
) -> QueryResult<SchoolYearRow> {
    if draft.is_active {
        clear_active(conn, None).await?;
    }
    diesel::insert_into(school_years::table)
        .values(SchoolYearValues::from(draft))
        .returning(SchoolYearRow::as_returning())
        .get_result(conn)
        .await
}

#[async_trait]
impl SchoolYearRepository for DieselSchoolYearRepository {
    async fn create(&self, draft: &SchoolYearDraft) -> Result<SchoolYear, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| async move { insert_school_year(conn, draft).await }.scope_boxed())
            .await
            .map_err(map_diesel_error)?;
        Ok(row.into())
    }

    async fn list(&self) -> Result<Vec<SchoolYear>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let rows = school_years::table
            .order(school_years::id.asc())
            .select(SchoolYearRow::as_select())
            .load(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find(&self, id: SchoolYearId) -> Result<Option<SchoolYear>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = school_years::table
            .find(id.get())
            .select(SchoolYearRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn find_active(&self) -> Result<Option<SchoolYear>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = school_years::table
            .filter(school_years::is_active.eq(true))
            .select(SchoolYearRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn update(
        &self,
        id: SchoolYearId,
        draft: &SchoolYearDraft,
    ) -> Result<Option<SchoolYear>, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let row = conn
            .transaction(|conn| {
                async move {
                    if draft.is_active {
                        clear_active(conn, Some(id.get())).await?;
                    }
                    diesel::update(school_years::table.find(id.get()))
                        .set(SchoolYearValues::from(draft))
                        .returning(SchoolYearRow::as_returning())
                        .get_result(conn)
                        .await
                        .optional()
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)?;
        Ok(row.map(Into::into))
    }

    async fn delete(&self, id: SchoolYearId) -> Result<bool, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        let deleted = diesel::delete(school_years::table.find(id.get()))
            .execute(&mut conn)
            .await
            .map_err(map_delete_error)?;
        Ok(deleted > 0)
    }
}
