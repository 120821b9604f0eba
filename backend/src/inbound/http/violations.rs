//! Violation handlers.
//!
//! ```text
//! GET    /api/v1/violations        (public)
//! POST   /api/v1/violations        (admin)
//! PUT    /api/v1/violations/{id}   (admin)
//! DELETE /api/v1/violations/{id}   (admin)
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, Violation, ViolationDraft, ViolationId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::{AdminPrincipal, RequireAdmin};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{missing_field_error, parse_uuid};

/// Violation body for inserts and full replacements.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViolationRequest {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub note: String,
}

impl TryFrom<&ViolationRequest> for ViolationDraft {
    type Error = Error;

    fn try_from(value: &ViolationRequest) -> Result<Self, Self::Error> {
        ViolationDraft::try_new(
            &value.student_name,
            &value.class_name,
            &value.category,
            &value.note,
        )
        .map_err(missing_field_error)
    }
}

fn violation_id(raw: &str) -> Result<ViolationId, Error> {
    parse_uuid(raw, "id").map(ViolationId::from_uuid)
}

/// List violations, newest first. Public.
#[utoipa::path(
    get,
    path = "/api/v1/violations",
    responses((status = 200, description = "Violations", body = [Violation])),
    tags = ["violations"],
    operation_id = "listViolations",
    security([])
)]
#[get("/violations")]
pub async fn list_violations(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Violation>>> {
    state.violations_query.list().await.map(web::Json)
}

/// Record a violation. Admin only.
#[utoipa::path(
    post,
    path = "/api/v1/violations",
    request_body = ViolationRequest,
    responses(
        (status = 201, description = "Violation stored", body = Violation),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Admin session required", body = Error)
    ),
    tags = ["violations"],
    operation_id = "recordViolation"
)]
#[post("/violations", wrap = "RequireAdmin")]
pub async fn record_violation(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
    payload: web::Json<ViolationRequest>,
) -> ApiResult<HttpResponse> {
    let draft = ViolationDraft::try_from(&payload.into_inner())?;
    let violation = state.violations.record(draft).await?;
    Ok(HttpResponse::Created().json(violation))
}

/// Replace a violation's fields. Admin only.
#[utoipa::path(
    put,
    path = "/api/v1/violations/{id}",
    params(("id" = String, Path, description = "Violation id")),
    request_body = ViolationRequest,
    responses(
        (status = 200, description = "Updated violation", body = Violation),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Admin session required", body = Error),
        (status = 404, description = "Unknown violation", body = Error)
    ),
    tags = ["violations"],
    operation_id = "replaceViolation"
)]
#[put("/violations/{id}", wrap = "RequireAdmin")]
pub async fn replace_violation(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ViolationRequest>,
) -> ApiResult<web::Json<Violation>> {
    let id = violation_id(&path)?;
    let draft = ViolationDraft::try_from(&payload.into_inner())?;
    state.violations.replace(id, draft).await.map(web::Json)
}

/// Delete a violation. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/violations/{id}",
    params(("id" = String, Path, description = "Violation id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Admin session required", body = Error),
        (status = 404, description = "Unknown violation", body = Error)
    ),
    tags = ["violations"],
    operation_id = "deleteViolation"
)]
#[delete("/violations/{id}", wrap = "RequireAdmin")]
pub async fn delete_violation(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = violation_id(&path)?;
    state.violations.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
