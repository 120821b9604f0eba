//! OpenAPI documentation.
//!
//! [`ApiDoc`] aggregates every annotated handler and DTO. Swagger UI serves
//! it at `/docs` in debug builds. Page routes are HTML and stay out of the
//! document.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{
    Complaint, ComplaintStats, DailyCount, EmailAddress, Error, ErrorCode, StatusCount, Violation,
};
use crate::inbound::http::auth::{LoginRequest, LoginResponse};
use crate::inbound::http::complaints::{ComplaintRequest, StatusUpdateRequest};
use crate::inbound::http::health::ProbeStatus;
use crate::inbound::http::notifications::{SubscribeRequest, SubscriptionResponse};
use crate::inbound::http::violations::ViolationRequest;

/// Registers the admin session cookie as the default security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionCookie",
            SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                "session",
                "Encrypted admin session cookie issued by POST /api/v1/auth/login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Conduct desk API",
        description = "School violation records, student complaints and admin notifications."
    ),
    servers((url = "/", description = "Relative to the deployment base URL")),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::auth::login,
        crate::inbound::http::auth::logout,
        crate::inbound::http::complaints::submit_complaint,
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::complaint_stats,
        crate::inbound::http::complaints::update_complaint_status,
        crate::inbound::http::complaints::delete_complaint,
        crate::inbound::http::violations::list_violations,
        crate::inbound::http::violations::record_violation,
        crate::inbound::http::violations::replace_violation,
        crate::inbound::http::violations::delete_violation,
        crate::inbound::http::notifications::get_subscription,
        crate::inbound::http::notifications::subscribe,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        EmailAddress,
        Complaint,
        ComplaintStats,
        StatusCount,
        DailyCount,
        Violation,
        ComplaintRequest,
        StatusUpdateRequest,
        ViolationRequest,
        SubscribeRequest,
        SubscriptionResponse,
        LoginRequest,
        LoginResponse,
        ProbeStatus,
    )),
    tags(
        (name = "auth", description = "Admin login and logout"),
        (name = "complaints", description = "Student complaints"),
        (name = "violations", description = "Conduct violations"),
        (name = "notifications", description = "Admin notification subscription"),
        (name = "health", description = "Probes")
    )
)]
pub struct ApiDoc;
