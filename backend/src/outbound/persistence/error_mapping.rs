//! Diesel and pool failures mapped onto [`RepositoryError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ImportError;
use crate::domain::ports::RepositoryError;

use super::pool::PoolError;

/// Pool failures mean the store is unreachable.
pub(super) fn map_pool_error(error: PoolError) -> RepositoryError {
    RepositoryError::connection(error.into_message())
}

/// Column named by a foreign key constraint from the migrations.
fn constraint_column(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("classes_school_year_id_fkey") => "school_year_id",
        Some("pupils_class_id_fkey") => "class_id",
        Some("entries_pupil_id_fkey") => "pupil_id",
        Some("entries_category_id_fkey") => "category_id",
        _ => "reference",
    }
}

/// Child table guarded by a foreign key constraint.
fn constraint_table(constraint: Option<&str>) -> &'static str {
    match constraint {
        Some("classes_school_year_id_fkey") => "classes",
        Some("pupils_class_id_fkey") => "pupils",
        Some("entries_pupil_id_fkey" | "entries_category_id_fkey") => "entries",
        _ => "other rows",
    }
}

fn log(error: &DieselError) {
    match error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }
}

/// Map a failure of a read or of an insert/update.
///
/// A foreign key violation here means the written row points at a missing
/// parent.
pub(super) fn map_diesel_error(error: DieselError) -> RepositoryError {
    log(&error);
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            RepositoryError::missing_reference(constraint_column(info.constraint_name()))
        }
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, info) => {
            RepositoryError::connection(info.message().to_owned())
        }
        DieselError::DatabaseError(_, info) => RepositoryError::query(info.message().to_owned()),
        other => RepositoryError::query(other.to_string()),
    }
}

/// Map a failure of a delete.
///
/// A foreign key violation here means child rows still reference the row.
pub(super) fn map_delete_error(error: DieselError) -> RepositoryError {
    match error {
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, info) => {
            debug!(message = info.message(), "delete blocked by foreign key");
            RepositoryError::still_referenced(constraint_table(info.constraint_name()))
        }
        other => map_diesel_error(other),
    }
}

impl From<DieselError> for RepositoryError {
    fn from(error: DieselError) -> Self {
        map_diesel_error(error)
    }
}

impl From<DieselError> for ImportError {
    fn from(error: DieselError) -> Self {
        Self::Repository(map_diesel_error(error))
    }
}
