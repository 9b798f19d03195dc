//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::web;

use super::state::{HttpState, HttpStatePorts};
use super::validation::{json_config, path_config, query_config};
use crate::outbound::documents::{DocxRenderer, PdfRenderer};
use crate::outbound::memory::InMemoryStore;

/// Handler state over a fresh in-memory store with the real renderers.
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

/// Register `state`, the extractor configs and the given handlers.
pub fn with_state(
    state: HttpState,
    handlers: impl FnOnce(&mut web::ServiceConfig) + 'static,
) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg| {
        cfg.app_data(web::Data::new(state))
            .app_data(json_config())
            .app_data(query_config())
            .app_data(path_config());
        handlers(cfg);
    }
}
