//! Notification subscription handlers. Admin only.
//!
//! ```text
//! GET /api/v1/notifications/subscription
//! PUT /api/v1/notifications/subscription
//!     {"recipients":["a@school.id"],"notifyOnComplaint":true,"notifyOnViolation":false}
//! ```
//!
//! `PUT` replaces the whole configuration; the previous recipient list is
//! discarded.

use actix_web::{get, put, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::ToSchema;

use crate::domain::{EmailAddress, Error, NotificationConfig};
use crate::inbound::http::ApiResult;
use crate::inbound::http::admin::{AdminPrincipal, RequireAdmin};
use crate::inbound::http::state::HttpState;

/// Subscription body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscribeRequest {
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Defaults to `true`.
    #[serde(default)]
    pub notify_on_complaint: Option<bool>,
    /// Defaults to `false`.
    #[serde(default)]
    pub notify_on_violation: Option<bool>,
}

impl TryFrom<SubscribeRequest> for NotificationConfig {
    type Error = Error;

    fn try_from(value: SubscribeRequest) -> Result<Self, Self::Error> {
        let recipients = value
            .recipients
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                EmailAddress::parse(raw).map_err(|err| {
                    Error::invalid_request(format!("recipients[{index}] is invalid: {err}"))
                        .with_details(json!({
                            "field": "recipients",
                            "index": index,
                            "value": raw,
                            "code": "invalid_email",
                        }))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(NotificationConfig::new(
            recipients,
            value.notify_on_complaint.unwrap_or(true),
            value.notify_on_violation.unwrap_or(false),
        ))
    }
}

/// Current subscription. Unconfigured systems report empty defaults.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub configured: bool,
    pub recipients: Vec<EmailAddress>,
    pub notify_on_complaint: bool,
    pub notify_on_violation: bool,
}

impl SubscriptionResponse {
    fn from_config(config: Option<NotificationConfig>) -> Self {
        match config {
            Some(config) => Self {
                configured: true,
                recipients: config.recipients().to_vec(),
                notify_on_complaint: config.notify_on_complaint(),
                notify_on_violation: config.notify_on_violation(),
            },
            None => Self {
                configured: false,
                recipients: Vec::new(),
                notify_on_complaint: false,
                notify_on_violation: false,
            },
        }
    }
}

/// Read the notification subscription.
#[utoipa::path(
    get,
    path = "/api/v1/notifications/subscription",
    responses(
        (status = 200, description = "Current subscription", body = SubscriptionResponse),
        (status = 401, description = "Admin session required", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "getSubscription"
)]
#[get("/notifications/subscription", wrap = "RequireAdmin")]
pub async fn get_subscription(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let config = state.notification_settings.current().await?;
    Ok(web::Json(SubscriptionResponse::from_config(config)))
}

/// Replace the notification subscription.
#[utoipa::path(
    put,
    path = "/api/v1/notifications/subscription",
    request_body = SubscribeRequest,
    responses(
        (status = 200, description = "Stored subscription", body = SubscriptionResponse),
        (status = 400, description = "Invalid recipient", body = Error),
        (status = 401, description = "Admin session required", body = Error)
    ),
    tags = ["notifications"],
    operation_id = "subscribe"
)]
#[put("/notifications/subscription", wrap = "RequireAdmin")]
pub async fn subscribe(
    _admin: AdminPrincipal,
    state: web::Data<HttpState>,
    payload: web::Json<SubscribeRequest>,
) -> ApiResult<web::Json<SubscriptionResponse>> {
    let config = NotificationConfig::try_from(payload.into_inner())?;
    let stored = state.notification_settings.subscribe(config).await?;
    Ok(web::Json(SubscriptionResponse::from_config(Some(stored))))
}
