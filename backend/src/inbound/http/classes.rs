//! Class HTTP handlers.
//!
//! ```text
//! POST   /classes
//! GET    /classes?school_year_id=
//! GET    /classes/{id}
//! PUT    /classes/{id}
//! DELETE /classes/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{ClassDraft, ClassId, Error, SchoolYearId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ClassSchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_fields;

/// Request payload for creating or replacing a class.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct ClassRequest {
    #[schema(example = "1A")]
    pub name: Option<String>,
    pub school_year_id: Option<i32>,
}

impl TryFrom<ClassRequest> for ClassDraft {
    type Error = Error;

    fn try_from(request: ClassRequest) -> Result<Self, Self::Error> {
        match (request.name, request.school_year_id) {
            (Some(name), Some(school_year_id)) => Ok(Self {
                name,
                school_year_id: SchoolYearId::new(school_year_id),
            }),
            (name, school_year_id) => Err(missing_fields(&[
                ("name", name.is_none()),
                ("school_year_id", school_year_id.is_none()),
            ])),
        }
    }
}

/// Optional list filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ClassQuery {
    /// Only classes of this school year.
    pub school_year_id: Option<i32>,
}

/// Create a class.
#[utoipa::path(
    post,
    path = "/classes",
    request_body = ClassRequest,
    responses(
        (status = 201, description = "Class created", body = ClassSchema),
        (status = 400, description = "Invalid request or unknown school year", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "createClass"
)]
#[post("/classes")]
pub async fn create_class(
    state: web::Data<HttpState>,
    payload: web::Json<ClassRequest>,
) -> ApiResult<HttpResponse> {
    let draft = ClassDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Created().json(state.classes.create(draft).await?))
}

/// List classes.
#[utoipa::path(
    get,
    path = "/classes",
    params(ClassQuery),
    responses((status = 200, description = "Classes", body = [ClassSchema])),
    tags = ["classes"],
    operation_id = "listClasses"
)]
#[get("/classes")]
pub async fn list_classes(
    state: web::Data<HttpState>,
    query: web::Query<ClassQuery>,
) -> ApiResult<HttpResponse> {
    let filter = query.into_inner().school_year_id.map(SchoolYearId::new);
    Ok(HttpResponse::Ok().json(state.classes.list(filter).await?))
}

/// Fetch one class.
#[utoipa::path(
    get,
    path = "/classes/{id}",
    params(("id" = i32, Path, description = "Class identifier")),
    responses(
        (status = 200, description = "Class", body = ClassSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "getClass"
)]
#[get("/classes/{id}")]
pub async fn get_class(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = ClassId::new(path.into_inner());
    Ok(HttpResponse::Ok().json(state.classes.get(id).await?))
}

/// Replace a class.
#[utoipa::path(
    put,
    path = "/classes/{id}",
    params(("id" = i32, Path, description = "Class identifier")),
    request_body = ClassRequest,
    responses(
        (status = 200, description = "Class updated", body = ClassSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "updateClass"
)]
#[put("/classes/{id}")]
pub async fn update_class(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<ClassRequest>,
) -> ApiResult<HttpResponse> {
    let id = ClassId::new(path.into_inner());
    let draft = ClassDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(state.classes.update(id, draft).await?))
}

/// Delete a class without pupils.
#[utoipa::path(
    delete,
    path = "/classes/{id}",
    params(("id" = i32, Path, description = "Class identifier")),
    responses(
        (status = 204, description = "Class deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Pupils still reference the class", body = ErrorSchema)
    ),
    tags = ["classes"],
    operation_id = "deleteClass"
)]
#[delete("/classes/{id}")]
pub async fn delete_class(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state.classes.delete(ClassId::new(path.into_inner())).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_class)
        .service(list_classes)
        .service(get_class)
        .service(update_class)
        .service(delete_class);
}
