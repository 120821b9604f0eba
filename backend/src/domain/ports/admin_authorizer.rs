//! Driving port for per-request admin authorization.

use async_trait::async_trait;

use crate::domain::{AuthDecision, SessionCredential};

/// Decide whether a request may reach a protected route.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminAuthorizer: Send + Sync {
    /// Verify `credential` for a request to `path`.
    ///
    /// Never fails: every problem becomes a deny decision.
    async fn authorize(&self, credential: &SessionCredential, path: &str) -> AuthDecision;
}
