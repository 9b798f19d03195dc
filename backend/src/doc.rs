//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every handler under `inbound::http` together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep the
//! domain types free of utoipa derives. The document is served by Swagger UI
//! in debug builds and printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::categories::CategoryRequest;
use crate::inbound::http::classes::ClassRequest;
use crate::inbound::http::entries::EntryRequest;
use crate::inbound::http::health::ServiceInfo;
use crate::inbound::http::pupils::PupilRequest;
use crate::inbound::http::schemas::{
    CategoryRecordSchema, CategorySchema, ClassRecordSchema, ClassSchema, EntryRecordSchema,
    EntrySchema, ErrorCodeSchema, ErrorSchema, ImportSummarySchema, PupilRecordSchema,
    PupilSchema, ReportEntrySchema, ReportSchema, SchoolYearRecordSchema, SchoolYearSchema,
    SnapshotSchema,
};
use crate::inbound::http::school_years::SchoolYearRequest;
use crate::inbound::http::transfer::ImportResponse;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pupil tracker API",
        description = "Record keeping for school years, classes, pupils and their development notes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::root,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::school_years::create_school_year,
        crate::inbound::http::school_years::list_school_years,
        crate::inbound::http::school_years::get_active_school_year,
        crate::inbound::http::school_years::get_school_year,
        crate::inbound::http::school_years::update_school_year,
        crate::inbound::http::school_years::delete_school_year,
        crate::inbound::http::classes::create_class,
        crate::inbound::http::classes::list_classes,
        crate::inbound::http::classes::get_class,
        crate::inbound::http::classes::update_class,
        crate::inbound::http::classes::delete_class,
        crate::inbound::http::pupils::create_pupil,
        crate::inbound::http::pupils::list_pupils,
        crate::inbound::http::pupils::get_pupil,
        crate::inbound::http::pupils::update_pupil,
        crate::inbound::http::pupils::delete_pupil,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::entries::create_entry,
        crate::inbound::http::entries::list_entries,
        crate::inbound::http::entries::get_entry,
        crate::inbound::http::entries::update_entry,
        crate::inbound::http::entries::delete_entry,
        crate::inbound::http::reports::get_report,
        crate::inbound::http::reports::download_pdf,
        crate::inbound::http::reports::download_docx,
        crate::inbound::http::transfer::export_json,
        crate::inbound::http::transfer::export_csv,
        crate::inbound::http::transfer::import_json,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        ServiceInfo,
        SchoolYearSchema,
        SchoolYearRequest,
        ClassSchema,
        ClassRequest,
        PupilSchema,
        PupilRequest,
        CategorySchema,
        CategoryRequest,
        EntrySchema,
        EntryRequest,
        ReportSchema,
        ReportEntrySchema,
        SnapshotSchema,
        SchoolYearRecordSchema,
        ClassRecordSchema,
        PupilRecordSchema,
        CategoryRecordSchema,
        EntryRecordSchema,
        ImportSummarySchema,
        ImportResponse,
    )),
    tags(
        (name = "health", description = "Service banner and probes"),
        (name = "school_years", description = "School years and the active year"),
        (name = "classes", description = "Classes within a school year"),
        (name = "pupils", description = "Pupils within a class"),
        (name = "categories", description = "Bilingual observation categories"),
        (name = "entries", description = "Dated development notes"),
        (name = "reports", description = "Per-pupil reports as JSON, PDF or DOCX"),
        (name = "transfer", description = "Full export and import")
    )
)]
pub struct ApiDoc;
