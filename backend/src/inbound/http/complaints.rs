//! Complaint handlers.
//!
//! ```text
//! POST   /api/v1/complaints                 (public)
//! GET    /api/v1/complaints                 (admin)
//! GET    /api/v1/complaints/stats           (public)
//! PATCH  /api/v1/complaints/{id}/status     (admin)
//! DELETE /api/v1/complaints/{id}            (admin)
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintStats, ComplaintStatus, Error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::{AdminPrincipal, RequireAdmin};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{complaint_validation_error, parse_uuid};

/// Complaint submission body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRequest {
    #[serde(default)]
    pub reporter_name: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub detail: String,
    /// Optional address for the confirmation and status updates.
    #[serde(default)]
    pub reporter_email: Option<String>,
}

impl TryFrom<&ComplaintRequest> for ComplaintDraft {
    type Error = Error;

    fn try_from(value: &ComplaintRequest) -> Result<Self, Self::Error> {
        ComplaintDraft::try_new(
            &value.reporter_name,
            &value.class_name,
            &value.category,
            &value.detail,
            value.reporter_email.as_deref(),
        )
        .map_err(complaint_validation_error)
    }
}

/// Status update body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct StatusUpdateRequest {
    #[serde(default)]
    #[schema(example = "Diproses")]
    pub status: String,
}

fn complaint_id(raw: &str) -> Result<ComplaintId, Error> {
    parse_uuid(raw, "id").map(ComplaintId::from_uuid)
}

/// Submit a complaint. Public.
#[utoipa::path(
    post,
    path = "/api/v1/complaints",
    request_body = ComplaintRequest,
    responses(
        (status = 201, description = "Complaint stored", body = Complaint),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Store unavailable", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "submitComplaint",
    security([])
)]
#[post("/complaints")]
pub async fn submit_complaint(
    state: web::Data<HttpState>,
    payload: web::Json<ComplaintRequest>,
) -> ApiResult<HttpResponse> {
    let draft = ComplaintDraft::try_from(&payload.into_inner())?;
    let complaint = state.complaints.submit(draft).await?;
    Ok(HttpResponse::Created().json(complaint))
}

/// List complaints, newest first. Admin only.
#[utoipa::path(
    get,
    path = "/api/v1/complaints",
    responses(
        (status = 200, description = "Complaints", body = [Complaint]),
        (status = 401, description = "Admin session required", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints"
)]
#[get("/complaints", wrap = "RequireAdmin")]
pub async fn list_complaints(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<Complaint>>> {
    state.complaints_query.list().await.map(web::Json)
}

/// Status counts and the 30-day submission trend. Public.
#[utoipa::path(
    get,
    path = "/api/v1/complaints/stats",
    responses((status = 200, description = "Complaint statistics", body = ComplaintStats)),
    tags = ["complaints"],
    operation_id = "complaintStats",
    security([])
)]
#[get("/complaints/stats")]
pub async fn complaint_stats(state: web::Data<HttpState>) -> ApiResult<web::Json<ComplaintStats>> {
    state.complaints_query.stats().await.map(web::Json)
}

/// Change a complaint's status. Admin only.
#[utoipa::path(
    patch,
    path = "/api/v1/complaints/{id}/status",
    params(("id" = String, Path, description = "Complaint id")),
    request_body = StatusUpdateRequest,
    responses(
        (status = 200, description = "Updated complaint", body = Complaint),
        (status = 400, description = "Missing status or malformed id", body = Error),
        (status = 401, description = "Admin session required", body = Error),
        (status = 404, description = "Unknown complaint", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaintStatus"
)]
#[patch("/complaints/{id}/status", wrap = "RequireAdmin")]
pub async fn update_complaint_status(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<StatusUpdateRequest>,
) -> ApiResult<web::Json<Complaint>> {
    let id = complaint_id(&path)?;
    let status = ComplaintStatus::parse(&payload.status).map_err(complaint_validation_error)?;
    state
        .complaints
        .update_status(id, status)
        .await
        .map(web::Json)
}

/// Delete a complaint. Admin only.
#[utoipa::path(
    delete,
    path = "/api/v1/complaints/{id}",
    params(("id" = String, Path, description = "Complaint id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 401, description = "Admin session required", body = Error),
        (status = 404, description = "Unknown complaint", body = Error)
    ),
    tags = ["complaints"],
    operation_id = "deleteComplaint"
)]
#[delete("/complaints/{id}", wrap = "RequireAdmin")]
pub async fn delete_complaint(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = complaint_id(&path)?;
    state.complaints.delete(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
