//! Domain entities, services and ports.
//!
//! Everything here is transport and storage agnostic. Inbound adapters call
//! the services; outbound adapters implement the traits in [`ports`].

pub mod ports;

mod category;
mod category_service;
mod class;
mod class_service;
mod data_transfer;
mod data_transfer_service;
mod entry;
mod entry_service;
mod error;
mod ids;
mod pupil;
mod pupil_service;
mod reconcile;
mod report;
mod repository_errors;
mod school_year;
mod school_year_service;
mod trace_id;
mod validation;

pub use self::category::{CATEGORY_NAME_MAX, Category, CategoryDraft, PREDEFINED_CATEGORIES};
pub use self::category_service::CategoryService;
pub use self::class::{CLASS_NAME_MAX, Class, ClassDraft};
pub use self::class_service::ClassService;
pub use self::data_transfer::{
    CSV_HEADER, CategoryRecord, ClassRecord, EntryRecord, EntryRow, ImportError, ImportSummary,
    MISSING_LINK, PupilRecord, SchoolYearRecord, Snapshot, write_csv,
};
pub use self::data_transfer_service::DataTransferService;
pub use self::entry::{Entry, EntryDraft, EntryFilter, GRADE_MAX, SUBJECT_MAX};
pub use self::entry_service::EntryService;
pub use self::error::{EnvelopeError, Error, ErrorCode, TRACE_ID_HEADER};
pub use self::ids::{CategoryId, ClassId, EntryId, PupilId, SchoolYearId};
pub use self::pupil::{PUPIL_NAME_MAX, Pupil, PupilDraft};
pub use self::pupil_service::PupilService;
pub use self::reconcile::{IdMap, reconcile};
pub use self::report::{CategoryGroups, DateWindow, Report, ReportEntry, ReportService};
pub use self::school_year::{SCHOOL_YEAR_NAME_MAX, SchoolYear, SchoolYearDraft};
pub use self::school_year_service::SchoolYearService;
pub use self::trace_id::TraceId;
pub use self::validation::{FieldViolation, Validate, Violations};
