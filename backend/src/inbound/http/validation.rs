//! Request validation shared by the HTTP handlers.
//!
//! Extractor failures are rewritten into the domain error envelope so clients
//! always receive `{"code": "invalid_request", ...}` for malformed input.
//! Request bodies deserialise into option-typed DTOs so every absent required
//! field can be reported at once.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;
use tracing::debug;

use crate::domain::{Error, FieldViolation};

/// Largest accepted JSON body; sized for whole-store imports.
pub const JSON_BODY_LIMIT: usize = 16 * 1024 * 1024;

fn malformed(part: &'static str, reason: String) -> actix_web::Error {
    debug!(part, %reason, "rejecting malformed request");
    Error::invalid_request(format!("malformed {part}"))
        .with_details(json!({ "reason": reason }))
        .into()
}

/// JSON body extractor configuration.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_BODY_LIMIT)
        .error_handler(|err: JsonPayloadError, _req: &HttpRequest| {
            malformed("request body", err.to_string())
        })
}

/// Query string extractor configuration.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err: QueryPayloadError, _req: &HttpRequest| {
        malformed("query string", err.to_string())
    })
}

/// Path segment extractor configuration.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err: PathError, _req: &HttpRequest| {
        malformed("path", err.to_string())
    })
}

/// Validation error naming every absent required field.
///
/// `fields` pairs each field name with whether it is missing.
pub(crate) fn missing_fields(fields: &[(&'static str, bool)]) -> Error {
    Error::validation(
        fields
            .iter()
            .filter(|(_, missing)| *missing)
            .map(|(field, _)| FieldViolation::missing(*field))
            .collect(),
    )
}
