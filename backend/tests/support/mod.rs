//! Shared harness for HTTP integration tests.
//!
//! Builds the application the way the server does, over in-memory adapters,
//! so tests observe the real routing, session cookie and admin gate.

use std::sync::Arc;
use std::time::Duration;

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::cookie::{Cookie, Key, SameSite};
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test, web};
use conduct_desk::Trace;
use conduct_desk::domain::{EmailAddress, NotificationConfig};
use conduct_desk::inbound::http::pages::{self, PageDirectory};
use conduct_desk::inbound::http::session::{SESSION_COOKIE_NAME, session_middleware};
use conduct_desk::inbound::http::session_config::SessionSettings;
use conduct_desk::inbound::http::state::{DrivenAdapters, HttpState};
use conduct_desk::inbound::http::{configure_api, json_config};
use conduct_desk::test_support::{
    InMemoryComplaintRepository, InMemoryNotificationConfigRepository,
    InMemoryViolationRepository, RecordingMailTransport, StubIdentityOracle, admin_claims,
    staff_claims,
};
use serde_json::json;
use tempfile::TempDir;

pub const ADMIN_TOKEN: &str = "admin-id-token";
pub const STAFF_TOKEN: &str = "staff-id-token";

const PAGES: [&str; 7] = [
    "index.html",
    "login.html",
    "form-aduan.html",
    "dashboard.html",
    "detail-siswa.html",
    "statistik.html",
    "aduan-siswa.html",
];

/// In-memory adapters plus the page directory they are served with.
pub struct World {
    pub identity: Arc<StubIdentityOracle>,
    pub complaints: Arc<InMemoryComplaintRepository>,
    pub violations: Arc<InMemoryViolationRepository>,
    pub notification_config: Arc<InMemoryNotificationConfigRepository>,
    pub mail: Arc<RecordingMailTransport>,
    pages: TempDir,
}

impl World {
    pub fn new() -> Self {
        Self::with_mail(
            InMemoryNotificationConfigRepository::default(),
            RecordingMailTransport::default(),
        )
    }

    pub fn with_mail(
        notification_config: InMemoryNotificationConfigRepository,
        mail: RecordingMailTransport,
    ) -> Self {
        let pages = tempfile::tempdir().expect("page dir");
        for name in PAGES {
            std::fs::write(pages.path().join(name), format!("<main>{name}</main>"))
                .expect("write page");
        }
        std::fs::write(pages.path().join("app.js"), "console.log('ready');").expect("write asset");
        let identity = StubIdentityOracle::default()
            .with_claims(ADMIN_TOKEN, admin_claims("admin-1"))
            .with_claims(STAFF_TOKEN, staff_claims("staff-1"));
        Self {
            identity: Arc::new(identity),
            complaints: Arc::new(InMemoryComplaintRepository::default()),
            violations: Arc::new(InMemoryViolationRepository::default()),
            notification_config: Arc::new(notification_config),
            mail: Arc::new(mail),
            pages,
        }
    }

    fn state(&self) -> HttpState {
        HttpState::from_adapters(DrivenAdapters {
            identity: self.identity.clone(),
            complaints: self.complaints.clone(),
            violations: self.violations.clone(),
            notification_config: self.notification_config.clone(),
            mail: self.mail.clone(),
            send_timeout: Duration::from_millis(200),
        })
    }

    pub async fn app(
        &self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = actix_web::Error>
    {
        let directory = PageDirectory::new(self.pages.path());
        let session = SessionSettings {
            key: Key::generate(),
            cookie_secure: false,
            same_site: SameSite::Lax,
        };
        test::init_service(
            App::new()
                .app_data(web::Data::new(self.state()))
                .app_data(web::Data::new(directory.clone()))
                .app_data(json_config())
                .wrap(session_middleware(&session))
                .wrap(Trace)
                .service(web::scope("/api/v1").configure(configure_api))
                .configure(pages::configure)
                .service(directory.assets()),
        )
        .await
    }
}

/// Admin recipients subscribed to both event kinds.
pub fn admin_config(recipients: &[&str]) -> NotificationConfig {
    NotificationConfig::new(
        recipients
            .iter()
            .map(|raw| EmailAddress::parse(raw).expect("valid email")),
        true,
        true,
    )
}

/// Session cookie set by a response, if any.
pub fn session_cookie<B>(res: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    res.response()
        .cookies()
        .find(|cookie| cookie.name() == SESSION_COOKIE_NAME)
        .map(Cookie::into_owned)
}

/// Log in with `token` and return the session cookie.
pub async fn login<S, B>(app: &S, token: &str) -> Cookie<'static>
where
    S: Service<Request, Response = ServiceResponse<B>, Error = actix_web::Error>,
    B: MessageBody,
{
    let res = test::call_service(
        app,
        test::TestRequest::post()
            .uri("/api/v1/auth/login")
            .set_json(json!({ "idToken": token }))
            .to_request(),
    )
    .await;
    assert!(res.status().is_success(), "login failed: {}", res.status());
    session_cookie(&res).expect("session cookie")
}
