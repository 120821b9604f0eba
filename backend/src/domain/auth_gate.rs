//! Admin authorization gate for protected routes.
//!
//! The gate verifies the session credential with the identity provider
//! (revocation checking always on), then requires the admin claim. Both checks
//! must pass. Every failure is a terminal deny; nothing is retried within the
//! request.
//!
//! How a deny is presented depends on the request surface: API callers get a
//! structured `unauthorized` error while browser navigations are sent to the
//! login page. [`RequestSurface`] captures that split.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::ports::{AdminAuthorizer, IdentityOracle, IdentityOracleError};
use crate::domain::{Principal, SessionCredential};

/// Path prefix served as JSON API rather than browser pages.
pub const API_PATH_PREFIX: &str = "/api/";

/// Login entry point used for page-route denials.
pub const LOGIN_PATH: &str = "/login";

/// Why a request was denied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    /// The identity provider rejected the credential or could not be asked.
    VerificationFailed { message: String },
    /// The credential is authentic but lacks the admin claim.
    NotAdmin,
}

impl fmt::Display for DenyReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::VerificationFailed { message } => {
                write!(f, "credential verification failed: {message}")
            }
            Self::NotAdmin => f.write_str("admin claim missing"),
        }
    }
}

/// Terminal result of one authorization attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    /// The caller is an authenticated admin.
    Allow(Principal),
    /// The caller may not proceed.
    Deny(DenyReason),
}

/// Surface a request path belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestSurface {
    /// JSON endpoints under [`API_PATH_PREFIX`].
    Api,
    /// Everything else: HTML pages and browser navigations.
    Page,
}

/// How a denial must be presented to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DenialOutcome {
    /// Structured `unauthorized` error, no redirect.
    Unauthorized,
    /// Redirect to [`LOGIN_PATH`], no error body.
    RedirectToLogin,
}

impl RequestSurface {
    /// Classify a request path.
    ///
    /// # Examples
    /// ```
    /// use conduct_desk::domain::RequestSurface;
    ///
    /// assert_eq!(RequestSurface::from_path("/api/v1/complaints"), RequestSurface::Api);
    /// assert_eq!(RequestSurface::from_path("/dashboard"), RequestSurface::Page);
    /// assert_eq!(RequestSurface::from_path("/api"), RequestSurface::Page);
    /// ```
    #[must_use]
    pub fn from_path(path: &str) -> Self {
        if path.starts_with(API_PATH_PREFIX) {
            Self::Api
        } else {
            Self::Page
        }
    }

    /// Presentation of a denial on this surface.
    #[must_use]
    pub fn denial_outcome(self) -> DenialOutcome {
        match self {
            Self::Api => DenialOutcome::Unauthorized,
            Self::Page => DenialOutcome::RedirectToLogin,
        }
    }
}

/// Admin gate backed by an identity oracle.
pub struct AuthGate<O: ?Sized> {
    oracle: Arc<O>,
}

impl<O: ?Sized> Clone for AuthGate<O> {
    fn clone(&self) -> Self {
        Self {
            oracle: Arc::clone(&self.oracle),
        }
    }
}

impl<O: ?Sized> AuthGate<O> {
    /// Create a gate that verifies credentials with `oracle`.
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }
}

impl<O> AuthGate<O>
where
    O: IdentityOracle + ?Sized,
{
    /// Verify `credential` and require the admin claim.
    ///
    /// An empty credential is still sent to the oracle, which rejects it like
    /// any other invalid credential.
    pub async fn authorize(&self, credential: &SessionCredential, path: &str) -> AuthDecision {
        let decision = match self.oracle.verify_session_credential(credential, true).await {
            Ok(claims) if claims.admin => AuthDecision::Allow(Principal::from_admin_claims(claims)),
            Ok(_) => AuthDecision::Deny(DenyReason::NotAdmin),
            Err(err) => AuthDecision::Deny(DenyReason::VerificationFailed {
                message: describe_oracle_error(&err),
            }),
        };

        if let AuthDecision::Deny(reason) = &decision {
            warn!(%path, %reason, "admin authorization denied");
        }
        decision
    }
}

fn describe_oracle_error(err: &IdentityOracleError) -> String {
    match err {
        IdentityOracleError::Invalid { message } => format!("invalid credential: {message}"),
        IdentityOracleError::Revoked => "credential revoked".to_owned(),
        IdentityOracleError::Transport { message } => format!("provider unavailable: {message}"),
    }
}

#[async_trait]
impl<O> AdminAuthorizer for AuthGate<O>
where
    O: IdentityOracle + ?Sized,
{
    async fn authorize(&self, credential: &SessionCredential, path: &str) -> AuthDecision {
        AuthGate::authorize(self, credential, path).await
    }
}
