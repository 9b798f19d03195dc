//! Category HTTP handlers.
//!
//! ```text
//! POST   /categories
//! GET    /categories?predefined_only=
//! GET    /categories/{id}
//! PUT    /categories/{id}
//! DELETE /categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::{CategoryDraft, CategoryId, Error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{CategorySchema, ErrorSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::missing_fields;

/// Request payload for creating or replacing a category.
#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CategoryRequest {
    #[schema(example = "Arbeitsverhalten")]
    pub name_de: Option<String>,
    #[schema(example = "Work Behavior")]
    pub name_en: Option<String>,
    /// Honoured on create only; defaults to `false`.
    pub is_predefined: Option<bool>,
}

impl TryFrom<CategoryRequest> for CategoryDraft {
    type Error = Error;

    fn try_from(request: CategoryRequest) -> Result<Self, Self::Error> {
        match (request.name_de, request.name_en) {
            (Some(name_de), Some(name_en)) => Ok(Self {
                name_de,
                name_en,
                is_predefined: request.is_predefined.unwrap_or(false),
            }),
            (name_de, name_en) => Err(missing_fields(&[
                ("name_de", name_de.is_none()),
                ("name_en", name_en.is_none()),
            ])),
        }
    }
}

/// Optional list filter.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct CategoryQuery {
    /// Only predefined categories when `true`.
    pub predefined_only: Option<bool>,
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/categories",
    request_body = CategoryRequest,
    responses(
        (status = 201, description = "Category created", body = CategorySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let draft = CategoryDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Created().json(state.categories.create(draft).await?))
}

/// List categories.
#[utoipa::path(
    get,
    path = "/categories",
    params(CategoryQuery),
    responses((status = 200, description = "Categories", body = [CategorySchema])),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(
    state: web::Data<HttpState>,
    query: web::Query<CategoryQuery>,
) -> ApiResult<HttpResponse> {
    let predefined_only = query.into_inner().predefined_only.unwrap_or(false);
    Ok(HttpResponse::Ok().json(state.categories.list(predefined_only).await?))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "Category", body = CategorySchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let id = CategoryId::new(path.into_inner());
    Ok(HttpResponse::Ok().json(state.categories.get(id).await?))
}

/// Replace a category's labels; the predefined flag is kept.
#[utoipa::path(
    put,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Category updated", body = CategorySchema),
        (status = 400, description = "Invalid request", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
    payload: web::Json<CategoryRequest>,
) -> ApiResult<HttpResponse> {
    let id = CategoryId::new(path.into_inner());
    let draft = CategoryDraft::try_from(payload.into_inner())?;
    Ok(HttpResponse::Ok().json(state.categories.update(id, draft).await?))
}

/// Delete a custom category.
#[utoipa::path(
    delete,
    path = "/categories/{id}",
    params(("id" = i32, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "Predefined categories cannot be deleted", body = ErrorSchema),
        (status = 404, description = "Not found", body = ErrorSchema),
        (status = 409, description = "Entries still reference the category", body = ErrorSchema)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    state
        .categories
        .delete(CategoryId::new(path.into_inner()))
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Register the handlers.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_category)
        .service(list_categories)
        .service(get_category)
        .service(update_category)
        .service(delete_category);
}
