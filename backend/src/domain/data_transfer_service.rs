//! Export and import use cases.

use std::sync::Arc;

use tracing::{info, warn};

use super::ports::SnapshotRepository;
use super::repository_errors::map_repository_error;
use super::{EntryRow, Error, ImportError, ImportSummary, Snapshot, Validate};

/// Whole-store export and transactional import.
#[derive(Clone)]
pub struct DataTransferService {
    repo: Arc<dyn SnapshotRepository>,
}

impl DataTransferService {
    /// Create a service over the given repository.
    pub fn new(repo: Arc<dyn SnapshotRepository>) -> Self {
        Self { repo }
    }

    /// Every row of every table.
    pub async fn export(&self) -> Result<Snapshot, Error> {
        self.repo
            .load_snapshot()
            .await
            .map_err(map_repository_error("Snapshot"))
    }

    /// Entry rows for the CSV export.
    pub async fn export_entry_rows(&self) -> Result<Vec<EntryRow>, Error> {
        Ok(self.export().await?.entry_rows())
    }

    /// Validate `snapshot` fully, then write it in one transaction.
    pub async fn import(&self, snapshot: Snapshot) -> Result<ImportSummary, Error> {
        snapshot.validate()?;
        match self.repo.import_snapshot(&snapshot).await {
            Ok(summary) => {
                info!(
                    school_years = summary.school_years,
                    classes = summary.classes,
                    pupils = summary.pupils,
                    categories = summary.categories,
                    entries = summary.entries,
                    "snapshot imported"
                );
                Ok(summary)
            }
            Err(error) => {
                warn!(%error, "snapshot import rolled back");
                Err(match error {
                    ImportError::UnknownReference { field, entity, id } => {
                        Error::unknown_reference(field, entity, id)
                    }
                    ImportError::Repository(error) => map_repository_error("Snapshot")(error),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockSnapshotRepository, RepositoryError};
    use rstest::rstest;

    fn service(repo: MockSnapshotRepository) -> DataTransferService {
        DataTransferService::new(Arc::new(repo))
    }

    #[rstest]
    #[tokio::test]
    async fn invalid_snapshots_never_reach_the_store() {
        let mut repo = MockSnapshotRepository::new();
        repo.expect_import_snapshot().never();
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"pupils": [{"first_name": "", "last_name": "B", "class_id": 1}]}"#,
        )
        .expect("snapshot parses");

        let error = service(repo)
            .import(snapshot)
            .await
            .expect_err("blank name rejected");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let fields = &error.details().expect("details")["fields"];
        assert_eq!(fields[0]["field"], "pupils[0].first_name");
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_references_become_validation_errors() {
        let mut repo = MockSnapshotRepository::new();
        repo.expect_import_snapshot().times(1).returning(|_| {
            Err(ImportError::UnknownReference {
                field: "entries[3].pupil_id".into(),
                entity: "pupil",
                id: 12,
            })
        });

        let error = service(repo)
            .import(Snapshot::default())
            .await
            .expect_err("rolled back");

        assert_eq!(error.code(), ErrorCode::InvalidRequest);
        let field = &error.details().expect("details")["fields"][0];
        assert_eq!(field["field"], "entries[3].pupil_id");
        assert_eq!(field["code"], "unknown_reference");
    }

    #[rstest]
    #[tokio::test]
    async fn store_outage_is_service_unavailable() {
        let mut repo = MockSnapshotRepository::new();
        repo.expect_load_snapshot()
            .times(1)
            .returning(|| Err(RepositoryError::connection("timed out")));

        let error = service(repo).export().await.expect_err("store down");

        assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
    }
}
