//! Pupil HTTP handlers.
//!
//! ```text
//! POST   /pupils
//! GET    /pupils?class_id=
//! GET    /pupils/{id}
//! PUT    /pupils/{id}
//! DELETE /pupils/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ClassId, Error, PupilDraft, PupilId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PupilSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_fields;

/// Request payload for creating or replacing a pupil.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct PupilRequest {
    #[schema(example = "Max")]
    pub first_name: Option<String>,
    #[schema(example = "Mustermann")]
    pub last_name: Option<String>,
    pub class_id: Option<i32>,
}

impl TryFrom<PupilRequest> for PupilDraft {
    type Error = Error;

    fn try_from(request: PupilRequest) -> Result<Self, Self::Error> {
        match (request.first_name, request.last_name, request.class_id) {
            (Some(first_name), Some(last_name), Some(class_id)) => Ok(Self {
                first_name,
                last_name,
                class_id: ClassId::new(class_id),
            }),
            (first_name, last_name, class_id) => Err(missing_fields(&[
                ("first_name", first_name.is_none()),
                ("last_name", last_name.is_none()),
                ("class_id", class_id.is_none()),
            ])),
        }
    }
}

/// Optional list filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct PupilQuery {
    /// Only pupils of this class.
    pub class_id: Option<i32>,
}

/// Create a pupil.
#[utoipa::path(
    post,
    path = "/pupils",
    request_body = PupilRequest,
    responses(
        (status = 201, description = "Pupil created", body = PupilSchema),
        (status = 400, description = "Invalid request or unknown class", body = ErrorSchema)
    ),
    tags = ["pupils"],
    operation_id = "createPupil"
)]
#[post("/pupils")]
pub async fn create_pupil(
    state: web::Data<HttpState>,
    payload: web::Json<PupilRequest>,
) -> ApiResult<HttpResponse> {
    let draft = PupilDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Created().json(state.pupils.create(draft).await?))
}

/// List pupils.
#[utoipa::path(
    get,
    path = "/pupils",
    params(PupilQuery),
    responses((status = 200, description = "Pupils", body = [PupilSchema])),
    tags = ["pupils"],
    operation_id = "listPupils"
)]
#[get("/pupils")]
pub async fn list_pupils(
    state: web::Data<HttpState>,
    query: web::Query<PupilQuery>,
) -> ApiResult<HttpResponse> {
    let filter = query.into_inner().class_id.map(ClassId::new);
    Ok(HttpResponse::Ok().json(state.pupils.list(filter).await?))
}

/// Fetch one pupil.
#[utoipa::path(
    get,
    path = "/pupils/{id}",
    params(("id" = i32, Path, description = "Pupil identifier")),
    responses(
        (status = 200, description = "Pupil", body = PupilSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["pupils"],
    operation_id = "getPupil"
)]
#[get("/pupils/{id}")]
pub async fn get_pupil(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = PupilId::new(path.into_inner());
    Ok(HttpResponse::Ok().json(state.pupils.get(id).await?))
}

/// Replace a pupil.
#[utoipa::path(
    put,
    path = "/pupils/{id}",
    params(("id" = i32, Path, description = "Pupil identifier")),
    request_body = PupilRequest,
    responses(
        (status = 200, description = "Pupil updated", body = PupilSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["pupils"],
    operation_id = "updatePupil"
)]
#[put("/pupils/{id}")]
pub async fn update_pupil(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<PupilRequest>,
) -> ApiResult<HttpResponse> {
    let id = PupilId::new(path.into_inner());
    let draft = PupilDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(state.pupils.update(id, draft).await?))
}

/// Delete a pupil without entries.
#[utoipa::path(
    delete,
    path = "/pupils/{id}",
    params(("id" = i32, Path, description = "Pupil identifier")),
    responses(
        (status = 204, description = "Pupil deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Entries still reference the pupil", body = ErrorSchema)
    ),
    tags = ["pupils"],
    operation_id = "deletePupil"
)]
#[delete("/pupils/{id}")]
pub async fn delete_pupil(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.pupils.delete(PupilId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_pupil)
        .service(list_pupils)
        .service(get_pupil)
        .service(update_pupil)
        .service(delete_pupil);
}
