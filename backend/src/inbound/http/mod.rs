//! HTTP inbound adapter exposing REST endpoints and pages.

pub mod admin;
pub mod auth;
pub mod complaints;
pub mod error;
pub mod health;
pub mod notifications;
pub mod pages;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod validation;
pub mod violations;

pub use error::ApiResult;

use actix_web::web;

use crate::inbound::http::error::json_error_handler;

/// JSON extractor config mapping malformed bodies to `invalid_request`.
#[must_use]
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Register every `/api/v1` handler on `cfg`.
///
/// Mount inside `web::scope("/api/v1")`; public and admin handlers share
/// paths, and admin handlers are wrapped in
/// [`RequireAdmin`](admin::RequireAdmin).
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.service(auth::login)
        .service(auth::logout)
        .service(complaints::complaint_stats)
        .service(complaints::submit_complaint)
        .service(complaints::list_complaints)
        .service(complaints::update_complaint_status)
        .service(complaints::delete_complaint)
        .service(violations::list_violations)
        .service(violations::record_violation)
        .service(violations::replace_violation)
        .service(violations::delete_violation)
        .service(notifications::get_subscription)
        .service(notifications::subscribe);
}
