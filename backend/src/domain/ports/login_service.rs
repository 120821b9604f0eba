//! Driving port for the admin login exchange.
//!
//! The browser signs in with the identity provider and posts the resulting ID
//! token. The service checks it and, for verified admins, mints a long-lived
//! session credential for the session cookie.

use async_trait::async_trait;

use crate::domain::{Error, IdToken, Principal, SessionCredential};

/// Outcome of a successful login.
#[derive(Debug, Clone)]
pub struct SessionGrant {
    /// Credential to store in the session cookie.
    pub credential: SessionCredential,
    /// The admin who signed in.
    pub principal: Principal,
}

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Exchange an ID token for a session credential.
    ///
    /// # Errors
    ///
    /// - `unauthorized` when the token is invalid, revoked or its email is
    ///   unverified.
    /// - `forbidden` when the account lacks the admin claim.
    /// - `service_unavailable` when the identity provider cannot be reached.
    async fn login(&self, token: IdToken) -> Result<SessionGrant, Error>;
}
