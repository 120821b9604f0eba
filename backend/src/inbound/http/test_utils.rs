//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_session::{SessionMiddleware, config::CookieContentSecurity, storage::CookieSessionStore};
use actix_web::cookie::Key;

use crate::domain::ports::{
    MockAdminAuthorizer, MockComplaintCommand, MockComplaintQuery, MockLoginService,
    MockNotificationSettings, MockViolationCommand, MockViolationQuery,
};
use crate::domain::{AuthDecision, DenyReason, IdentityClaims, Principal};
use crate::inbound::http::state::HttpState;

/// Build a session middleware configured for tests.
///
/// - Generates a fresh key per invocation.
/// - Uses private (encrypted) cookies named `session` without the `Secure`
///   flag so plain HTTP test requests carry them.
pub fn test_session_middleware() -> SessionMiddleware<CookieSessionStore> {
    SessionMiddleware::builder(CookieSessionStore::default(), Key::generate())
        .cookie_name("session".to_owned())
        .cookie_secure(false)
        .cookie_content_security(CookieContentSecurity::Private)
        .build()
}

/// Mocks for every port in [`HttpState`]. Tests set expectations on the ones
/// they exercise and convert the rest untouched.
#[derive(Default)]
pub struct MockPorts {
    pub authorizer: MockAdminAuthorizer,
    pub login: MockLoginService,
    pub complaints: MockComplaintCommand,
    pub complaints_query: MockComplaintQuery,
    pub violations: MockViolationCommand,
    pub violations_query: MockViolationQuery,
    pub notification_settings: MockNotificationSettings,
}

impl MockPorts {
    /// Authorizer that admits every request as an admin.
    pub fn allowing_admin() -> Self {
        let mut ports = Self::default();
        ports
            .authorizer
            .expect_authorize()
            .returning(|_, _| AuthDecision::Allow(admin_principal()));
        ports
    }

    /// Authorizer that denies every request.
    pub fn denying() -> Self {
        let mut ports = Self::default();
        ports
            .authorizer
            .expect_authorize()
            .returning(|_, _| AuthDecision::Deny(DenyReason::NotAdmin));
        ports
    }

    /// Freeze the mocks into handler state.
    pub fn into_state(self) -> HttpState {
        HttpState {
            authorizer: Arc::new(self.authorizer),
            login: Arc::new(self.login),
            complaints: Arc::new(self.complaints),
            complaints_query: Arc::new(self.complaints_query),
            violations: Arc::new(self.violations),
            violations_query: Arc::new(self.violations_query),
            notification_settings: Arc::new(self.notification_settings),
        }
    }
}

/// Principal carrying the admin claim.
pub fn admin_principal() -> Principal {
    Principal::from_admin_claims(IdentityClaims {
        uid: "admin-uid".to_owned(),
        email: Some("admin@school.id".to_owned()),
        email_verified: true,
        admin: true,
    })
}
