//! Pupil development tracker.
//!
//! Records school years, classes, pupils, bilingual observation categories
//! and dated notes; renders per-pupil reports as JSON, PDF or DOCX; exports
//! and re-imports the whole store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
