//! Server construction and dependency wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;

use std::sync::Arc;

pub use config::ServerConfig;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use pupil_tracker::Trace;
#[cfg(debug_assertions)]
use pupil_tracker::doc::ApiDoc;
use pupil_tracker::inbound::http::configure_api;
use pupil_tracker::inbound::http::health::{HealthState, live, ready, root};
use pupil_tracker::inbound::http::state::{HttpState, HttpStatePorts};
use pupil_tracker::inbound::http::validation::{json_config, path_config, query_config};
use pupil_tracker::outbound::documents::{DocxRenderer, PdfRenderer};
use pupil_tracker::outbound::memory::InMemoryStore;
use pupil_tracker::outbound::persistence::{
    DbPool, DieselCategoryRepository, DieselClassRepository, DieselEntryRepository,
    DieselPupilRepository, DieselSchoolYearRepository, DieselSnapshotRepository,
};

/// Wire the services over PostgreSQL when a pool is configured, otherwise
/// over a fresh in-memory store.
pub fn build_http_state(db_pool: Option<&DbPool>) -> HttpState {
    let pdf = Arc::new(PdfRenderer);
    let docx = Arc::new(DocxRenderer);
    let ports = match db_pool {
        Some(pool) => HttpStatePorts {
            school_years: Arc::new(DieselSchoolYearRepository::new(pool.clone())),
            classes: Arc::new(DieselClassRepository::new(pool.clone())),
            pupils: Arc::new(DieselPupilRepository::new(pool.clone())),
            categories: Arc::new(DieselCategoryRepository::new(pool.clone())),
            entries: Arc::new(DieselEntryRepository::new(pool.clone())),
            snapshots: Arc::new(DieselSnapshotRepository::new(pool.clone())),
            pdf,
            docx,
        },
        None => {
            let store = Arc::new(InMemoryStore::new());
            HttpStatePorts {
                school_years: store.clone(),
                classes: store.clone(),
                pupils: store.clone(),
                categories: store.clone(),
                entries: store.clone(),
                snapshots: store,
                pdf,
                docx,
            }
        }
    };
    HttpState::new(ports)
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .app_data(query_config())
        .app_data(path_config())
        .wrap(Trace)
        .service(root)
        .service(ready)
        .service(live)
        .configure(configure_api);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct the Actix HTTP server over an already wired `http_state`.
///
/// With the `metrics` feature every app is wrapped in the Prometheus
/// middleware, which also serves the scrape endpoint.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket or registering the
/// metrics fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    #[cfg(feature = "metrics")]
    let request_metrics = metrics::request_metrics()?;

    let server = HttpServer::new(move || {
        let app = build_app(server_health_state.clone(), http_state.clone());

        #[cfg(feature = "metrics")]
        let app = app.wrap(request_metrics.clone());

        app
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
