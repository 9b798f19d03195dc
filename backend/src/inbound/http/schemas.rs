//! OpenAPI schema definitions for domain types.
//!
//! Domain types stay framework agnostic and do not derive `ToSchema`. The
//! wrappers here mirror their shape and register under the domain type's
//! path through `#[schema(as = ...)]`.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed, fails validation, or references missing rows.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The action is never permitted on the resource.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with stored rows.
    #[schema(rename = "conflict")]
    Conflict,
    /// The store is unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "not_found")]
    code: ErrorCodeSchema,
    /// Human-readable message.
    #[schema(example = "Pupil not found")]
    message: String,
    /// Correlation identifier for the request.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary details, e.g. `{"fields": [...]}` for validation errors.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::SchoolYear`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SchoolYear)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SchoolYearSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "2024/2025")]
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: bool,
}

/// OpenAPI schema for [`crate::domain::Class`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Class)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ClassSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "1A")]
    name: String,
    school_year_id: i32,
}

/// OpenAPI schema for [`crate::domain::Pupil`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Pupil)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PupilSchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Max")]
    first_name: String,
    #[schema(example = "Mustermann")]
    last_name: String,
    class_id: i32,
}

/// OpenAPI schema for [`crate::domain::Category`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Category)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CategorySchema {
    #[schema(example = 1)]
    id: i32,
    #[schema(example = "Arbeitsverhalten")]
    name_de: String,
    #[schema(example = "Work Behavior")]
    name_en: String,
    is_predefined: bool,
}

/// OpenAPI schema for [`crate::domain::Entry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Entry)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct EntrySchema {
    #[schema(example = 1)]
    id: i32,
    pupil_id: i32,
    category_id: i32,
    date: NaiveDate,
    #[schema(example = "Worked independently on the reading task")]
    text: String,
    #[schema(example = "A")]
    grade: Option<String>,
    #[schema(example = "Math")]
    subject: Option<String>,
}

/// OpenAPI schema for [`crate::domain::ReportEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ReportEntry)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ReportEntrySchema {
    date: NaiveDate,
    text: String,
    grade: Option<String>,
    subject: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Report`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Report)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ReportSchema {
    pupil_id: i32,
    #[schema(example = "Max Mustermann")]
    pupil_name: String,
    #[schema(example = "1A")]
    class_name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    /// Entries keyed by English category label, in first-seen order.
    entries_by_category: BTreeMap<String, Vec<ReportEntrySchema>>,
}

/// OpenAPI schema for [`crate::domain::SchoolYearRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::SchoolYearRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SchoolYearRecordSchema {
    id: Option<i32>,
    name: String,
    start_date: NaiveDate,
    end_date: NaiveDate,
    is_active: Option<bool>,
}

/// OpenAPI schema for [`crate::domain::ClassRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ClassRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ClassRecordSchema {
    id: Option<i32>,
    name: String,
    school_year_id: i32,
}

/// OpenAPI schema for [`crate::domain::PupilRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::PupilRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct PupilRecordSchema {
    id: Option<i32>,
    first_name: String,
    last_name: String,
    class_id: i32,
}

/// OpenAPI schema for [`crate::domain::CategoryRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::CategoryRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct CategoryRecordSchema {
    id: Option<i32>,
    name_de: String,
    name_en: String,
    is_predefined: Option<bool>,
}

/// OpenAPI schema for [`crate::domain::EntryRecord`].
#[derive(ToSchema)]
#[schema(as = crate::domain::EntryRecord)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct EntryRecordSchema {
    id: Option<i32>,
    pupil_id: i32,
    category_id: i32,
    date: NaiveDate,
    text: String,
    grade: Option<String>,
    subject: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Snapshot`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Snapshot)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct SnapshotSchema {
    school_years: Vec<SchoolYearRecordSchema>,
    classes: Vec<ClassRecordSchema>,
    pupils: Vec<PupilRecordSchema>,
    categories: Vec<CategoryRecordSchema>,
    entries: Vec<EntryRecordSchema>,
}

/// OpenAPI schema for [`crate::domain::ImportSummary`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ImportSummary)]
#[expect(dead_code, reason = "Used only for OpenAPI schema generation via utoipa")]
pub struct ImportSummarySchema {
    school_years: usize,
    classes: usize,
    pupils: usize,
    categories: usize,
    entries: usize,
}
