//! Admin gate for protected routes.
//!
//! Protected routes are wrapped in [`RequireAdmin`], which reads the session
//! credential, asks the configured [`AdminAuthorizer`] for a decision and, on
//! deny, short-circuits before any handler argument (request body included)
//! is extracted. The denial is shaped for the request surface:
//!
//! - `/api/...` requests get `401` with the JSON error body and no redirect.
//! - Every other path gets `302 Found` to `/login` with an empty body.
//!
//! Handlers take [`AdminPrincipal`] to read the verified caller. The extractor
//! reuses the principal stored by the middleware and runs the gate itself
//! only when the route is not wrapped.
//!
//! [`AdminAuthorizer`]: crate::domain::ports::AdminAuthorizer

use std::fmt;
use std::rc::Rc;
use std::task::{Context, Poll};

use actix_web::body::EitherBody;
use actix_web::dev::{Payload, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::{StatusCode, header};
use actix_web::{FromRequest, HttpMessage, HttpRequest, HttpResponse, ResponseError, web};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use tracing::debug;

use crate::domain::{
    AuthDecision, DenialOutcome, Error, LOGIN_PATH, Principal, RequestSurface, SessionCredential,
};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Authenticated admin for the current request.
#[derive(Debug, Clone)]
pub struct AdminPrincipal(Principal);

impl AdminPrincipal {
    /// The verified principal.
    #[must_use]
    pub fn principal(&self) -> &Principal {
        &self.0
    }
}

/// Rejection produced when the gate denies a request.
#[derive(Debug)]
pub struct AccessDenied {
    outcome: DenialOutcome,
    error: Error,
}

impl AccessDenied {
    fn for_path(path: &str) -> Self {
        Self {
            outcome: RequestSurface::from_path(path).denial_outcome(),
            error: Error::unauthorized("admin session required"),
        }
    }
}

impl fmt::Display for AccessDenied {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "access denied: {}", self.error)
    }
}

impl ResponseError for AccessDenied {
    fn status_code(&self) -> StatusCode {
        match self.outcome {
            DenialOutcome::Unauthorized => StatusCode::UNAUTHORIZED,
            DenialOutcome::RedirectToLogin => StatusCode::FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self.outcome {
            DenialOutcome::Unauthorized => self.error.error_response(),
            DenialOutcome::RedirectToLogin => HttpResponse::Found()
                .insert_header((header::LOCATION, LOGIN_PATH))
                .insert_header((header::CACHE_CONTROL, "no-store"))
                .finish(),
        }
    }
}

async fn authorize(
    state: Option<web::Data<HttpState>>,
    session: Result<SessionContext, actix_web::Error>,
    path: &str,
) -> Result<AdminPrincipal, actix_web::Error> {
    let state = state.ok_or_else(|| Error::internal("HTTP state is not configured"))?;
    let credential = match session {
        Ok(session) => session.credential(),
        Err(_) => SessionCredential::empty(),
    };

    match state.authorizer.authorize(&credential, path).await {
        AuthDecision::Allow(principal) => Ok(AdminPrincipal(principal)),
        AuthDecision::Deny(reason) => {
            debug!(%reason, path, "admin gate denied request");
            Err(AccessDenied::for_path(path).into())
        }
    }
}

impl FromRequest for AdminPrincipal {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        if let Some(admin) = req.extensions().get::<Self>().cloned() {
            return Box::pin(ready(Ok(admin)));
        }
        let session = SessionContext::from_request(req, payload);
        let state = req.app_data::<web::Data<HttpState>>().cloned();
        let path = req.path().to_owned();

        Box::pin(async move { authorize(state, session.await, &path).await })
    }
}

/// Middleware running the admin gate before the wrapped route.
///
/// # Examples
/// ```
/// use actix_web::{HttpResponse, web};
/// use conduct_desk::inbound::http::admin::RequireAdmin;
///
/// let route = web::resource("/dashboard")
///     .wrap(RequireAdmin)
///     .route(web::get().to(HttpResponse::Ok));
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct RequireAdmin;

impl<S, B> Transform<S, ServiceRequest> for RequireAdmin
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type InitError = ();
    type Transform = RequireAdminMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequireAdminMiddleware {
            service: Rc::new(service),
        }))
    }
}

/// Service wrapper produced by [`RequireAdmin`].
pub struct RequireAdminMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for RequireAdminMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = actix_web::Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, mut req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        Box::pin(async move {
            let session = req.extract::<SessionContext>().await;
            let state = req.app_data::<web::Data<HttpState>>().cloned();
            let path = req.path().to_owned();

            match authorize(state, session, &path).await {
                Ok(admin) => {
                    req.extensions_mut().insert(admin);
                    let res = service.call(req).await?;
                    Ok(res.map_into_left_body())
                }
                Err(error) => Ok(req.error_response(error).map_into_right_body()),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DenyReason;
    use crate::inbound::http::test_utils::{MockPorts, admin_principal, test_session_middleware};
    use actix_web::{App, test};

    async fn protected(admin: AdminPrincipal) -> HttpResponse {
        HttpResponse::Ok().body(admin.principal().uid().to_owned())
    }

    async fn call(ports: MockPorts, path: &str) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .wrap(test_session_middleware())
                .route("/api/v1/protected", web::get().to(protected))
                .route("/dashboard", web::get().to(protected)),
        )
        .await;
        test::call_service(&app, test::TestRequest::get().uri(path).to_request()).await
    }

    #[actix_web::test]
    async fn admin_reaches_handler() {
        let res = call(MockPorts::allowing_admin(), "/dashboard").await;
        assert_eq!(res.status(), StatusCode::OK);
        assert_eq!(test::read_body(res).await, "admin-uid");
    }

    #[actix_web::test]
    async fn api_denial_is_json_401_without_location() {
        let res = call(MockPorts::denying(), "/api/v1/protected").await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        assert!(res.headers().get(header::LOCATION).is_none());
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }

    #[actix_web::test]
    async fn page_denial_redirects_to_login_without_body() {
        let res = call(MockPorts::denying(), "/dashboard").await;

        assert_eq!(res.status(), StatusCode::FOUND);
        assert_eq!(
            res.headers()
                .get(header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/login")
        );
        assert!(test::read_body(res).await.is_empty());
    }

    #[actix_web::test]
    async fn missing_cookie_sends_empty_credential() {
        let mut ports = MockPorts::default();
        ports
            .authorizer
            .expect_authorize()
            .withf(|credential, path| credential.is_empty() && path == "/dashboard")
            .times(1)
            .returning(|_, _| {
                AuthDecision::Deny(DenyReason::VerificationFailed {
                    message: "empty".to_owned(),
                })
            });

        let res = call(ports, "/dashboard").await;
        assert_eq!(res.status(), StatusCode::FOUND);
    }

    async fn echo(admin: AdminPrincipal, body: web::Json<serde_json::Value>) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({
            "uid": admin.principal().uid(),
            "body": body.into_inner(),
        }))
    }

    async fn call_wrapped(
        ports: MockPorts,
        req: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(ports.into_state()))
                .wrap(test_session_middleware())
                .service(
                    web::resource("/api/v1/echo")
                        .wrap(RequireAdmin)
                        .route(web::post().to(echo)),
                ),
        )
        .await;
        test::call_service(&app, req.to_request()).await
    }

    #[actix_web::test]
    async fn wrapped_route_authorizes_once_and_shares_the_principal() {
        let mut ports = MockPorts::default();
        ports
            .authorizer
            .expect_authorize()
            .times(1)
            .returning(|_, _| AuthDecision::Allow(admin_principal()));

        let res = call_wrapped(
            ports,
            test::TestRequest::post()
                .uri("/api/v1/echo")
                .set_json(serde_json::json!({"n": 1})),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["uid"], "admin-uid");
        assert_eq!(body["body"]["n"], 1);
    }

    #[actix_web::test]
    async fn wrapped_route_denies_before_reading_the_body() {
        let res = call_wrapped(
            MockPorts::denying(),
            test::TestRequest::post()
                .uri("/api/v1/echo")
                .insert_header((header::CONTENT_TYPE, "text/plain"))
                .set_payload("{"),
        )
        .await;

        assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
        let body: serde_json::Value = test::read_body_json(res).await;
        assert_eq!(body["code"], "unauthorized");
    }
}
