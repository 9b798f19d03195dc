//! Entry HTTP handlers.
//!
//! ```text
//! POST   /entries
//! GET    /entries?pupil_id=&category_id=
//! GET    /entries/{id}
//! PUT    /entries/{id}
//! DELETE /entries/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CategoryId, EntryDraft, EntryFilter, EntryId, Error, PupilId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{EntrySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_fields;

/// Request payload for creating or replacing an entry.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct EntryRequest {
    pub pupil_id: Option<i32>,
    pub category_id: Option<i32>,
    pub date: Option<NaiveDate>,
    #[schema(example = "Worked independently on the reading task")]
    pub text: Option<String>,
    #[schema(example = "A")]
    pub grade: Option<String>,
    #[schema(example = "Math")]
    pub subject: Option<String>,
}

impl TryFrom<EntryRequest> for EntryDraft {
    type Error = Error;

    fn try_from(request: EntryRequest) -> Result<Self, Self::Error> {
        match (
            request.pupil_id,
            request.category_id,
            request.date,
            request.text,
        ) {
            (Some(pupil_id), Some(category_id), Some(date), Some(text)) => Ok(Self {
                pupil_id: PupilId::new(pupil_id),
                category_id: CategoryId::new(category_id),
                date,
                text,
                grade: request.grade,
                subject: request.subject,
            }),
            (pupil_id, category_id, date, text) => Err(missing_fields(&[
                ("pupil_id", pupil_id.is_none()),
                ("category_id", category_id.is_none()),
                ("date", date.is_none()),
                ("text", text.is_none()),
            ])),
        }
    }
}

/// Optional list filters; both apply when given.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct EntryQuery {
    /// Only entries about this pupil.
    pub pupil_id: Option<i32>,
    /// Only entries in this category.
    pub category_id: Option<i32>,
}

impl From<EntryQuery> for EntryFilter {
    fn from(query: EntryQuery) -> Self {
        Self {
            pupil_id: query.pupil_id.map(PupilId::new),
            category_id: query.category_id.map(CategoryId::new),
        }
    }
}

/// Create an entry.
#[utoipa::path(
    post,
    path = "/entries",
    request_body = EntryRequest,
    responses(
        (status = 201, description = "Entry created", body = EntrySchema),
        (status = 400, description = "Invalid request or unknown pupil/category", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "createEntry"
)]
#[post("/entries")]
pub async fn create_entry(
    state: web::Data<HttpState>,
    payload: web::Json<EntryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = EntryDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Created().json(state.entries.create(draft).await?))
}

/// List entries.
#[utoipa::path(
    get,
    path = "/entries",
    params(EntryQuery),
    responses((status = 200, description = "Entries", body = [EntrySchema])),
    tags = ["entries"],
    operation_id = "listEntries"
)]
#[get("/entries")]
pub async fn list_entries(
    state: web::Data<HttpState>,
    query: web::Query<EntryQuery>,
) -> ApiResult<HttpResponse> {
    let filter = EntryFilter::from(query.into_inner());
    Ok(HttpResponse::Ok().json(state.entries.list(filter).await?))
}

/// Fetch one entry.
#[utoipa::path(
    get,
    path = "/entries/{id}",
    params(("id" = i32, Path, description = "Entry identifier")),
    responses(
        (status = 200, description = "Entry", body = EntrySchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "getEntry"
)]
#[get("/entries/{id}")]
pub async fn get_entry(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = EntryId::new(path.into_inner());
    Ok(HttpResponse::Ok().json(state.entries.get(id).await?))
}

/// Replace an entry.
#[utoipa::path(
    put,
    path = "/entries/{id}",
    params(("id" = i32, Path, description = "Entry identifier")),
    request_body = EntryRequest,
    responses(
        (status = 200, description = "Entry updated", body = EntrySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "updateEntry"
)]
#[put("/entries/{id}")]
pub async fn update_entry(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<EntryRequest>,
) -> ApiResult<HttpResponse> {
    let id = EntryId::new(path.into_inner());
    let draft = EntryDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(state.entries.update(id, draft).await?))
}

/// Delete an entry.
#[utoipa::path(
    delete,
    path = "/entries/{id}",
    params(("id" = i32, Path, description = "Entry identifier")),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["entries"],
    operation_id = "deleteEntry"
)]
#[delete("/entries/{id}")]
pub async fn delete_entry(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.entries.delete(EntryId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_entry)
        .service(list_entries)
        .service(get_entry)
        .service(update_entry)
        .service(delete_entry);
}
