//! Translation of store failures into domain errors.

use super::ports::RepositoryError;
use super::{Error, FieldViolation};

/// Map a [`RepositoryError`] raised while handling `entity` rows.
///
/// `entity` is the capitalised human name used in conflict messages,
/// e.g. `School year`.
pub(crate) fn map_repository_error(entity: &'static str) -> impl Fn(RepositoryError) -> Error {
    move |error| match error {
        RepositoryError::Connection { message } => {
            Error::service_unavailable(format!("store unavailable: {message}"))
        }
        RepositoryError::Query { message } => Error::internal(format!("store error: {message}")),
        RepositoryError::MissingReference { relation } => {
            Error::validation(vec![FieldViolation::new(
                relation,
                "unknown_reference",
                "referenced row does not exist",
            )])
        }
        RepositoryError::StillReferenced { relation } => {
            Error::conflict(format!("{entity} is still referenced by {relation}"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    #[case(RepositoryError::connection("refused"), ErrorCode::ServiceUnavailable)]
    #[case(RepositoryError::query("syntax"), ErrorCode::InternalError)]
    #[case(RepositoryError::missing_reference("class_id"), ErrorCode::InvalidRequest)]
    #[case(RepositoryError::still_referenced("pupils"), ErrorCode::Conflict)]
    fn codes_follow_failure_kind(#[case] error: RepositoryError, #[case] expected: ErrorCode) {
        assert_eq!(map_repository_error("Class")(error).code(), expected);
    }

    #[rstest]
    fn conflict_names_entity_and_relation() {
        let error = map_repository_error("Class")(RepositoryError::still_referenced("pupils"));
        assert_eq!(error.message(), "Class is still referenced by pupils");
    }
}
