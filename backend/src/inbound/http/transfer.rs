//! Export and import HTTP handlers.
//!
//! ```text
//! GET  /export/json
//! GET  /export/csv
//! POST /import/json
//! ```

use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{HttpResponse, get, post, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::{ImportSummary, Snapshot, write_csv};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ImportSummarySchema, SnapshotSchema};
use crate::inbound::http::state::HttpState;

/// Result of a successful import.
#[derive(Debug, Serialize, ToSchema)]
pub struct ImportResponse {
    #[schema(example = "Import successful")]
    pub message: String,
    /// Rows created per entity kind.
    #[schema(value_type = ImportSummarySchema)]
    pub imported: ImportSummary,
}

/// Every row of every table.
#[utoipa::path(
    get,
    path = "/export/json",
    responses(
        (status = 200, description = "Full snapshot", body = SnapshotSchema),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["transfer"],
    operation_id = "exportJson"
)]
#[get("/export/json")]
pub async fn export_json(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.transfer.export().await?))
}

/// Entries flattened to CSV with resolved pupil and category names.
#[utoipa::path(
    get,
    path = "/export/csv",
    responses(
        (status = 200, description = "CSV export", content_type = "text/csv", body = String),
        (status = 503, description = "Store unavailable", body = ErrorSchema)
    ),
    tags = ["transfer"],
    operation_id = "exportCsv"
)]
#[get("/export/csv")]
pub async fn export_csv(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    let rows = state.transfer.export_entry_rows().await?;
    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((CONTENT_DISPOSITION, "attachment; filename=export.csv"))
        .body(write_csv(&rows)))
}

/// Recreate a snapshot in one transaction with fresh identifiers.
#[utoipa::path(
    post,
    path = "/import/json",
    request_body = SnapshotSchema,
    responses(
        (status = 200, description = "Snapshot imported", body = ImportResponse),
        (status = 400, description = "Invalid snapshot or unknown reference", body = ErrorSchema)
    ),
    tags = ["transfer"],
    operation_id = "importJson"
)]
#[post("/import/json")]
pub async fn import_json(
    state: web::Data<HttpState>,
    payload: web::Json<Snapshot>,
) -> ApiResult<HttpResponse> {
    let imported = state.transfer.import(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(ImportResponse {
        message: "Import successful".to_owned(),
        imported,
    }))
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(export_json)
        .service(export_csv)
        .service(import_json);
}
