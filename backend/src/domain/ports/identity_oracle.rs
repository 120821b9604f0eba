//! Driven port for the external identity provider.
//!
//! The provider owns credential cryptography and revocation state. The domain
//! only asks it to verify credentials and to mint session credentials from
//! freshly obtained ID tokens.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{IdToken, IdentityClaims, SessionCredential};

use super::define_port_error;

define_port_error! {
    /// Errors raised by identity provider adapters.
    pub enum IdentityOracleError {
        /// The credential is malformed, expired, or has a bad signature.
        Invalid { message: String } => "credential rejected: {message}",
        /// The credential was explicitly revoked after issuance.
        Revoked => "credential revoked",
        /// The provider could not be reached or answered unexpectedly.
        Transport { message: String } => "identity provider unavailable: {message}",
    }
}

/// Port for verifying and minting identity-provider credentials.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityOracle: Send + Sync {
    /// Verify a session credential. With `check_revoked` the provider also
    /// rejects credentials invalidated since issuance.
    async fn verify_session_credential(
        &self,
        credential: &SessionCredential,
        check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityOracleError>;

    /// Verify a short-lived ID token obtained by the browser.
    async fn verify_id_token(
        &self,
        token: &IdToken,
        check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityOracleError>;

    /// Exchange a verified ID token for a session credential valid for `ttl`.
    async fn create_session_credential(
        &self,
        token: &IdToken,
        ttl: Duration,
    ) -> Result<SessionCredential, IdentityOracleError>;
}
