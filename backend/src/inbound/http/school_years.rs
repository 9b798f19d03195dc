//! School year HTTP handlers.
//!
//! ```text
//! POST   /school_years
//! GET    /school_years
//! GET    /school_years/active
//! GET    /school_years/{id}
//! PUT    /school_years/{id}
//! DELETE /school_years/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, SchoolYearDraft, SchoolYearId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, SchoolYearSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_fields;

/// Request payload for creating or replacing a school year.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct SchoolYearRequest {
    #[schema(example = "2024/2025")]
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    /// Defaults to `false`.
    pub is_active: Option<bool>,
}

impl TryFrom<SchoolYearRequest> for SchoolYearDraft {
    type Error = Error;

    fn try_from(request: SchoolYearRequest) -> Result<Self, Self::Error> {
        match (request.name, request.start_date, request.end_date) {
            (Some(name), Some(start_date), Some(end_date)) => Ok(Self {
                name,
                start_date,
                end_date,
                is_active: request.is_active.unwrap_or(false),
            }),
            (name, start_date, end_date) => Err(missing_fields(&[
                ("name", name.is_none()),
                ("start_date", start_date.is_none()),
                ("end_date", end_date.is_none()),
            ])),
        }
    }
}

/// Create a school year.
#[utoipa::path(
    post,
    path = "/school_years",
    request_body = SchoolYearRequest,
    responses(
        (status = 201, description = "School year created", body = SchoolYearSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["school_years"],
    operation_id = "createSchoolYear"
)]
#[post("/school_years")]
pub async fn create_school_year(
    state: web::Data<HttpState>,
    payload: web::Json<SchoolYearRequest>,
) -> ApiResult<HttpResponse> {
    let draft = SchoolYearDraft::try_from(payload.into_inner())?;
    let year = state.school_years.create(draft).await?;
    Ok(HttpResponse::Created().json(year))
}

/// List every school year.
#[utoipa::path(
    get,
    path = "/school_years",
    responses((status = 200, description = "School years", body = [SchoolYearSchema])),
    tags = ["school_years"],
    operation_id = "listSchoolYears"
)]
#[get("/school_years")]
pub async fn list_school_years(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.school_years.list().await?))
}

/// Fetch the active school year.
#[utoipa::path(
    get,
    path = "/school_years/active",
    responses(
        (status = 200, description = "Active school year", body = SchoolYearSchema),
        (status = 404, description = "No active school year", body = ErrorSchema)
    ),
    tags = ["school_years"],
    operation_id = "getActiveSchoolYear"
)]
#[get("/school_years/active")]
pub async fn get_active_school_year(state: web::Data<HttpState>) -> ApiResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(state.school_years.get_active().await?))
}

/// Fetch one school year.
#[utoipa::path(
    get,
    path = "/school_years/{id}",
    params(("id" = i32, Path, description = "School year identifier")),
    responses(
        (status = 200, description = "School year", body = SchoolYearSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["school_years"],
    operation_id = "getSchoolYear"
)]
#[get("/school_years/{id}")]
pub async fn get_school_year(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = SchoolYearId::new(path.into_inner());
    Ok(HttpResponse::Ok().json(state.school_years.get(id).await?))
}

/// Replace a school year.
#[utoipa::path(
    put,
    path = "/school_years/{id}",
    params(("id" = i32, Path, description = "School year identifier")),
    request_body = SchoolYearRequest,
    responses(
        (status = 200, description = "School year updated", body = SchoolYearSchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["school_years"],
    operation_id = "updateSchoolYear"
)]
#[put("/school_years/{id}")]
pub async fn update_school_year(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<SchoolYearRequest>,
) -> ApiResult<HttpResponse> {
    let id = SchoolYearId::new(path.into_inner());
    let draft = SchoolYearDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(state.school_years.update(id, draft).await?))
}

/// Delete a school year without classes.
#[utoipa::path(
    delete,
    path = "/school_years/{id}",
    params(("id" = i32, Path, description = "School year identifier")),
    responses(
        (status = 204, description = "School year deleted"),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Classes still reference the year", body = ErrorSchema)
    ),
    tags = ["school_years"],
    operation_id = "deleteSchoolYear"
)]
#[delete("/school_years/{id}")]
pub async fn delete_school_year(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .school_years
        .delete(SchoolYearId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the handlers; `/active` precedes `/{id}`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_school_year)
        .service(list_school_years)
        .service(get_active_school_year)
        .service(get_school_year)
        .service(update_school_year)
        .service(delete_school_year);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> SchoolYearRequest {
        SchoolYearRequest {
            name: Some("2024/2025".into()),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 7, 31),
            is_active: None,
        }
    }

    #[test]
    fn active_defaults_to_false() {
        let draft = SchoolYearDraft::try_from(request()).expect("complete request");
        assert!(!draft.is_active);
    }

    #[test]
    fn every_missing_field_is_reported() {
        let error = SchoolYearDraft::try_from(SchoolYearRequest {
            name: None,
            end_date: None,
            ..request()
        })
        .expect_err("fields missing");
        let details = error.details().expect("details");

        assert_eq!(details["fields"][0]["field"], "name");
        assert_eq!(details["fields"][1]["field"], "end_date");
    }
}
