//! Login and logout handlers.
//!
//! ```text
//! POST /api/v1/auth/login {"idToken":"<provider ID token>"}
//! GET  /api/v1/auth/logout
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{Error, IdToken, LOGIN_PATH};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::id_token_error;

/// Login request body for `POST /api/v1/auth/login`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// ID token obtained by the browser from the identity provider.
    #[serde(default)]
    pub id_token: String,
}

/// Successful login payload.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub uid: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Exchange an ID token for an admin session.
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Missing ID token", body = Error),
        (status = 401, description = "Invalid token or unverified email", body = Error),
        (status = 403, description = "Account lacks admin access", body = Error),
        (status = 503, description = "Identity provider unavailable", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let token = IdToken::new(&payload.id_token).map_err(id_token_error)?;
    let grant = state.login.login(token).await?;
    session.persist_credential(&grant.credential)?;
    Ok(web::Json(LoginResponse {
        uid: grant.principal.uid().to_owned(),
        email: grant.principal.email().map(str::to_owned),
    }))
}

/// Clear the session and send the browser to the login page.
#[utoipa::path(
    get,
    path = "/api/v1/auth/logout",
    responses((status = 302, description = "Session cleared; redirect to /login")),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[get("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Found()
        .insert_header((header::LOCATION, LOGIN_PATH))
        .finish()
}
