//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Repository implementations translate between Diesel rows and domain
//! entities and contain no business rules. Rows (`models.rs`) and table
//! definitions (`schema.rs`) stay private to this module. Connections come
//! from a `bb8` pool driven by `diesel-async`, and every database failure is
//! mapped onto [`RepositoryError`](crate::domain::ports::RepositoryError).
//!
//! # Example
//!
//! ```ignore
//! use pupil_tracker::outbound::persistence::{DbPool, DieselPupilRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/tracker")).await?;
//! let pupils = DieselPupilRepository::new(pool);
//! ```

mod diesel_category_repository;
mod diesel_class_repository;
mod diesel_entry_repository;
mod diesel_pupil_repository;
mod diesel_school_year_repository;
mod diesel_snapshot_repository;
mod error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_category_repository::DieselCategoryRepository;
pub use diesel_class_repository::DieselClassRepository;
pub use diesel_entry_repository::DieselEntryRepository;
pub use diesel_pupil_repository::DieselPupilRepository;
pub use diesel_school_year_repository::DieselSchoolYearRepository;
pub use diesel_snapshot_repository::DieselSnapshotRepository;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
