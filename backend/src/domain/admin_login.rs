//! Admin login exchange.
//!
//! Checks run in a fixed order: token authenticity (with revocation checking),
//! then email verification, then the admin claim. Only then is a session
//! credential minted.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ports::{IdentityOracle, IdentityOracleError, LoginService, SessionGrant};
use crate::domain::{Error, IdToken, Principal};

/// Lifetime of a minted session credential.
pub const SESSION_TTL: Duration = Duration::from_secs(60 * 60 * 24 * 5);

/// [`LoginService`] backed by the identity provider.
pub struct AdminLoginService<O: ?Sized> {
    oracle: Arc<O>,
}

impl<O: ?Sized> AdminLoginService<O> {
    /// Create a login service using `oracle`.
    pub fn new(oracle: Arc<O>) -> Self {
        Self { oracle }
    }
}

fn map_oracle_error(error: IdentityOracleError) -> Error {
    match error {
        IdentityOracleError::Invalid { .. } | IdentityOracleError::Revoked => {
            Error::unauthorized("login failed: token is invalid")
        }
        IdentityOracleError::Transport { message } => {
            Error::service_unavailable(format!("identity provider unavailable: {message}"))
        }
    }
}

#[async_trait]
impl<O> LoginService for AdminLoginService<O>
where
    O: IdentityOracle + ?Sized,
{
    async fn login(&self, token: IdToken) -> Result<SessionGrant, Error> {
        let claims = self
            .oracle
            .verify_id_token(&token, true)
            .await
            .inspect_err(|err| warn!(error = %err, "id token rejected"))
            .map_err(map_oracle_error)?;

        if !claims.email_verified {
            warn!(uid = %claims.uid, "login refused: email not verified");
            return Err(Error::unauthorized("email address is not verified"));
        }
        if !claims.admin {
            warn!(uid = %claims.uid, "login refused: admin claim missing");
            return Err(Error::forbidden("account does not have admin access"));
        }

        let credential = self
            .oracle
            .create_session_credential(&token, SESSION_TTL)
            .await
            .map_err(map_oracle_error)?;
        let principal = Principal::from_admin_claims(claims);
        info!(uid = %principal.uid(), "admin signed in");

        Ok(SessionGrant {
            credential,
            principal,
        })
    }
}
