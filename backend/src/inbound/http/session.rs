//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! The private session cookie carries the identity provider's session
//! credential. Handlers only persist, read or clear it through
//! [`SessionContext`].

use actix_session::config::{CookieContentSecurity, PersistentSession};
use actix_session::storage::CookieSessionStore;
use actix_session::{Session, SessionMiddleware};
use actix_web::cookie::time::Duration as CookieDuration;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;
use tracing::warn;

use crate::domain::{Error, SESSION_TTL, SessionCredential};
use crate::inbound::http::session_config::SessionSettings;

pub(crate) const CREDENTIAL_KEY: &str = "credential";

/// Name of the session cookie.
pub const SESSION_COOKIE_NAME: &str = "session";

/// Session middleware for the private, HttpOnly `session` cookie.
///
/// The cookie lives as long as the credential it carries.
#[must_use]
pub fn session_middleware(settings: &SessionSettings) -> SessionMiddleware<CookieSessionStore> {
    let ttl = CookieDuration::seconds(i64::try_from(SESSION_TTL.as_secs()).unwrap_or(i64::MAX));
    SessionMiddleware::builder(CookieSessionStore::default(), settings.key.clone())
        .cookie_name(SESSION_COOKIE_NAME.to_owned())
        .cookie_path("/".to_owned())
        .cookie_secure(settings.cookie_secure)
        .cookie_http_only(true)
        .cookie_content_security(CookieContentSecurity::Private)
        .cookie_same_site(settings.same_site)
        .session_lifecycle(PersistentSession::default().session_ttl(ttl))
        .build()
}

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Store the credential minted at login, rotating the session.
    pub fn persist_credential(&self, credential: &SessionCredential) -> Result<(), Error> {
        self.0.renew();
        self.0
            .insert(CREDENTIAL_KEY, credential.expose())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Credential stored in the session, or [`SessionCredential::empty`] when
    /// there is none or it cannot be read.
    pub fn credential(&self) -> SessionCredential {
        match self.0.get::<String>(CREDENTIAL_KEY) {
            Ok(Some(raw)) => SessionCredential::new(raw),
            Ok(None) => SessionCredential::empty(),
            Err(error) => {
                warn!(%error, "unreadable session credential; purging session");
                self.0.purge();
                SessionCredential::empty()
            }
        }
    }

    /// Drop every session value and expire the cookie.
    pub fn clear(&self) {
        self.0.purge();
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
