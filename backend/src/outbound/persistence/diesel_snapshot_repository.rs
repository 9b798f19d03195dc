//! Whole-store export and transactional import for PostgreSQL.

use async_trait::async_trait;
use diesel::dsl::exists;
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, AsyncPgConnection, RunQueryDsl};
use tracing::debug;

use crate::domain::ports::{ImportSink, Reference, RepositoryError, SnapshotRepository};
use crate::domain::{
    CategoryDraft, CategoryId, ClassDraft, ClassId, EntryDraft, EntryId, ImportError,
    ImportSummary, PupilDraft, PupilId, SchoolYearDraft, SchoolYearId, Snapshot, reconcile,
};

use super::diesel_school_year_repository::insert_school_year;
use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{
    CategoryRow, CategoryValues, ClassRow, ClassValues, EntryRow, EntryValues, PupilRow,
    PupilValues, SchoolYearRow,
};
use super::pool::DbPool;
use super::schema::{categories, classes, entries, pupils, school_years};

/// Diesel implementation of [`SnapshotRepository`].
#[derive(Clone)]
pub struct DieselSnapshotRepository {
    pool: DbPool,
}

impl DieselSnapshotRepository {
    /// Create a repository over `pool`.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Import sink bound to one open transaction.
struct TransactionSink<'a> {
    conn: &'a mut AsyncPgConnection,
}

#[async_trait]
impl ImportSink for TransactionSink<'_> {
    async fn insert_school_year(
        &mut self,
        draft: &SchoolYearDraft,
    ) -> Result<SchoolYearId, RepositoryError> {
        let row = insert_school_year(&mut *self.conn, draft)
            .await
            .map_err(map_diesel_error)?;
        Ok(SchoolYearId::new(row.id))
    }

    async fn insert_class(&mut self, draft: &ClassDraft) -> Result<ClassId, RepositoryError> {
        let row = diesel::insert_into(classes::table)
            .values(ClassValues::from(draft))
            .returning(ClassRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(ClassId::new(row.id))
    }

    async fn insert_pupil(&mut self, draft: &PupilDraft) -> Result<PupilId, RepositoryError> {
        let row = diesel::insert_into(pupils::table)
            .values(PupilValues::from(draft))
            .returning(PupilRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(PupilId::new(row.id))
    }

    async fn insert_category(
        &mut self,
        draft: &CategoryDraft,
    ) -> Result<CategoryId, RepositoryError> {
        let row = diesel::insert_into(categories::table)
            .values(CategoryValues::from(draft))
            .returning(CategoryRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(CategoryId::new(row.id))
    }

    async fn insert_entry(&mut self, draft: &EntryDraft) -> Result<EntryId, RepositoryError> {
        let row = diesel::insert_into(entries::table)
            .values(EntryValues::from(draft))
            .returning(EntryRow::as_returning())
            .get_result(&mut *self.conn)
            .await
            .map_err(map_diesel_error)?;
        Ok(EntryId::new(row.id))
    }

    async fn find_predefined_category(
        &mut self,
        name_de: &str,
        name_en: &str,
    ) -> Result<Option<CategoryId>, RepositoryError> {
        let id = categories::table
            .filter(categories::is_predefined.eq(true))
            .filter(categories::name_de.eq(name_de))
            .filter(categories::name_en.eq(name_en))
            .order(categories::id.asc())
            .select(categories::id)
            .first::<i32>(&mut *self.conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;
        Ok(id.map(CategoryId::new))
    }

    async fn contains(&mut self, reference: Reference) -> Result<bool, RepositoryError> {
        let query = match reference {
            Reference::SchoolYear(id) => {
                diesel::select(exists(school_years::table.find(id.get())))
                    .get_result::<bool>(&mut *self.conn)
                    .await
            }
            Reference::Class(id) => {
                diesel::select(exists(classes::table.find(id.get())))
                    .get_result::<bool>(&mut *self.conn)
                    .await
            }
            Reference::Pupil(id) => {
                diesel::select(exists(pupils::table.find(id.get())))
                    .get_result::<bool>(&mut *self.conn)
                    .await
            }
            Reference::Category(id) => {
                diesel::select(exists(categories::table.find(id.get())))
                    .get_result::<bool>(&mut *self.conn)
                    .await
            }
        };
        query.map_err(map_diesel_error)
    }
}

#[async_trait]
impl SnapshotRepository for DieselSnapshotRepository {
    async fn load_snapshot(&self) -> Result<Snapshot, RepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run(|conn| {
                async move {
                    let years = school_years::table
                        .order(school_years::id.asc())
                        .select(SchoolYearRow::as_select())
                        .load(conn)
                        .await?;
                    let class_rows = classes::table
                        .order(classes::id.asc())
                        .select(ClassRow::as_select())
                        .load(conn)
                        .await?;
                    let pupil_rows = pupils::table
                        .order(pupils::id.asc())
                        .select(PupilRow::as_select())
                        .load(conn)
                        .await?;
                    let category_rows = categories::table
                        .order(categories::id.asc())
                        .select(CategoryRow::as_select())
                        .load(conn)
                        .await?;
                    let entry_rows = entries::table
                        .order(entries::id.asc())
                        .select(EntryRow::as_select())
                        .load(conn)
                        .await?;
                    Ok::<_, diesel::result::Error>(Snapshot::from_rows(
                        years.into_iter().map(Into::into).collect(),
                        class_rows.into_iter().map(Into::into).collect(),
                        pupil_rows.into_iter().map(Into::into).collect(),
                        category_rows.into_iter().map(Into::into).collect(),
                        entry_rows.into_iter().map(Into::into).collect(),
                    ))
                }
                .scope_boxed()
            })
            .await
            .map_err(map_diesel_error)
    }

    async fn import_snapshot(&self, snapshot: &Snapshot) -> Result<ImportSummary, ImportError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|error| ImportError::Repository(map_pool_error(error)))?;
        let summary = conn
            .transaction(|conn| {
                async move {
                    let mut sink = TransactionSink { conn };
                    reconcile(snapshot, &mut sink).await
                }
                .scope_boxed()
            })
            .await?;
        debug!(?summary, "snapshot import committed");
        Ok(summary)
    }
}
