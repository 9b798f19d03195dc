//! Driven ports of the hexagon.
//!
//! Adapters in `outbound` implement these traits; domain services only ever
//! see the traits and the typed errors they return.

mod macros;
pub(crate) use macros::define_port_error;

mod category_repository;
mod class_repository;
mod entry_repository;
mod pupil_repository;
mod report_renderer;
mod repository_error;
mod school_year_repository;
mod snapshot_repository;

#[cfg(test)]
pub use category_repository::MockCategoryRepository;
pub use category_repository::CategoryRepository;
#[cfg(test)]
pub use class_repository::MockClassRepository;
pub use class_repository::ClassRepository;
#[cfg(test)]
pub use entry_repository::MockEntryRepository;
pub use entry_repository::EntryRepository;
#[cfg(test)]
pub use pupil_repository::MockPupilRepository;
pub use pupil_repository::PupilRepository;
#[cfg(test)]
pub use report_renderer::MockReportRenderer;
pub use report_renderer::{RenderError, ReportRenderer};
pub use repository_error::RepositoryError;
#[cfg(test)]
pub use school_year_repository::MockSchoolYearRepository;
pub use school_year_repository::SchoolYearRepository;
#[cfg(test)]
pub use snapshot_repository::{MockImportSink, MockSnapshotRepository};
pub use snapshot_repository::{ImportSink, Reference, SnapshotRepository};
