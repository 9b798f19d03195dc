//! Report HTTP handlers.
//!
//! ```text
//! GET /reports/pupil/{id}?start_date=&end_date=
//! GET /reports/pupil/{id}/pdf
//! GET /reports/pupil/{id}/docx
//! ```

use actix_web::http::header::{CONTENT_DISPOSITION, Charset, ExtendedValue};
use actix_web::{HttpResponse, get, web};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::ports::ReportRenderer;
use crate::domain::{DateWindow, Error, PupilId, Report};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ReportSchema};
use crate::inbound::http::state::HttpState;

/// Optional reporting window.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ReportQuery {
    /// First day included; defaults to 2000-01-01.
    pub start_date: Option<NaiveDate>,
    /// Last day included; defaults to 2100-12-31.
    pub end_date: Option<NaiveDate>,
}

async fn build_report(state: &HttpState, pupil_id: i32, query: ReportQuery) -> ApiResult<Report> {
    let window = DateWindow::new(query.start_date, query.end_date)?;
    state.reports.build(PupilId::new(pupil_id), window).await
}

/// Replace characters that cannot appear in an unquoted header parameter.
fn header_safe(name: &str) -> String {
    name.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.') {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

/// `attachment` disposition with an ASCII `filename`, plus an RFC 5987
/// `filename*` carrying the UTF-8 name whenever the two differ.
fn attachment(filename: &str) -> String {
    let ascii = header_safe(filename);
    if ascii == filename {
        return format!("attachment; filename={ascii}");
    }
    let utf8 = ExtendedValue {
        charset: Charset::Ext("UTF-8".to_owned()),
        language_tag: None,
        value: filename.as_bytes().to_vec(),
    };
    format!("attachment; filename={ascii}; filename*={utf8}")
}

fn download(report: &Report, renderer: &dyn ReportRenderer) -> ApiResult<HttpResponse> {
    let bytes = renderer
        .render(report)
        .map_err(|err| Error::internal(err.to_string()))?;
    let filename = format!("{}.{}", report.file_stem(), renderer.extension());
    Ok(HttpResponse::Ok()
        .content_type(renderer.media_type())
        .insert_header((CONTENT_DISPOSITION, attachment(&filename)))
        .body(bytes))
}

/// Entries of one pupil grouped by category.
#[utoipa::path(
    get,
    path = "/reports/pupil/{id}",
    params(("id" = i32, Path, description = "Pupil identifier"), ReportQuery),
    responses(
        (status = 200, description = "Report", body = ReportSchema),
        (status = 400, description = "Start date after end date", body = ErrorSchema),
        (status = 404, description = "Pupil not found", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "getPupilReport"
)]
#[get("/reports/pupil/{id}")]
pub async fn get_report(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let report = build_report(&state, path.into_inner(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(report))
}

/// The report as a PDF download.
#[utoipa::path(
    get,
    path = "/reports/pupil/{id}/pdf",
    params(("id" = i32, Path, description = "Pupil identifier"), ReportQuery),
    responses(
        (status = 200, description = "PDF document", content_type = "application/pdf", body = Vec<u8>),
        (status = 404, description = "Pupil not found", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "downloadPupilReportPdf"
)]
#[get("/reports/pupil/{id}/pdf")]
pub async fn download_pdf(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let report = build_report(&state, path.into_inner(), query.into_inner()).await?;
    download(&report, state.pdf.as_ref())
}

/// The report as a word-processor download.
#[utoipa::path(
    get,
    path = "/reports/pupil/{id}/docx",
    params(("id" = i32, Path, description = "Pupil identifier"), ReportQuery),
    responses(
        (
            status = 200,
            description = "DOCX document",
            content_type = "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            body = Vec<u8>
        ),
        (status = 404, description = "Pupil not found", body = ErrorSchema)
    ),
    tags = ["reports"],
    operation_id = "downloadPupilReportDocx"
)]
#[get("/reports/pupil/{id}/docx")]
pub async fn download_docx(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    query: web::Query<ReportQuery>,
) -> ApiResult<HttpResponse> {
    let report = build_report(&state, path.into_inner(), query.into_inner()).await?;
    download(&report, state.docx.as_ref())
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(get_report)
        .service(download_pdf)
        .service(download_docx);
}
