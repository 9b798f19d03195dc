//! Shared helpers for the HTTP integration suites.
//!
//! Integration tests compile as separate crates, so the in-memory wiring and
//! the request helpers live here instead of being repeated per file.

use std::sync::Arc;

use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::StatusCode;
use actix_web::{test, web};
use serde_json::Value;

use pupil_tracker::inbound::http::configure_api;
use pupil_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use pupil_tracker::inbound::http::validation::{json_config, path_config, query_config};
use pupil_tracker::outbound::documents::{DocxRenderer, PdfRenderer};
use pupil_tracker::outbound::memory::InMemoryStore;

/// Services over a fresh in-memory store.
pub fn memory_state() -> HttpState {
    let store = Arc::new(InMemoryStore::new());
    HttpState::new(HttpStatePorts {
        school_years: store.clone(),
        classes: store.clone(),
        pupils: store.clone(),
        categories: store.clone(),
        entries: store.clone(),
        snapshots: store,
        pdf: Arc::new(PdfRenderer),
        docx: Arc::new(DocxRenderer),
    })
}

/// Mount the full API over `state` the way the server does.
pub fn api(state: HttpState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config())
            .configure(configure_api);
    }
}

/// Send `req` and decode the body as JSON; empty bodies decode to `null`.
pub async fn send<S, R, B>(app: &S, req: R) -> (StatusCode, Value)
where
    S: Service<R, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(app, req).await;
    let status = res.status();
    let body = test::read_body(res).await;
    if body.is_empty() {
        return (status, Value::Null);
    }
    let json = serde_json::from_slice(&body).expect("JSON response body");
    (status, json)
}

/// The `id` field of a created row.
pub fn id_of(body: &Value) -> i64 {
    body["id"].as_i64().expect("row id")
}
