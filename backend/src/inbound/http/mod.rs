//! HTTP inbound adapter exposing the REST endpoints.

pub mod categories;
pub mod classes;
pub mod entries;
pub mod error;
pub mod health;
pub mod pupils;
pub mod reports;
pub mod schemas;
pub mod school_years;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod transfer;
pub mod validation;

use actix_web::web;

pub use error::ApiResult;

/// Register every record, report and transfer handler.
///
/// Health probes are mounted separately so they can sit outside the API
/// scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.configure(school_years::configure)
        .configure(classes::configure)
        .configure(pupils::configure)
        .configure(categories::configure)
        .configure(entries::configure)
        .configure(reports::configure)
        .configure(transfer::configure);
}
