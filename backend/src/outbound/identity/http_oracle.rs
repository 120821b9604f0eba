//! Reqwest-backed identity provider adapter.
//!
//! This adapter owns transport details only: request serialisation, the
//! bearer API key, timeouts, and mapping HTTP failures onto
//! [`IdentityOracleError`] variants. Credentials never appear in errors or
//! logs.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use zeroize::Zeroizing;

use super::dto::{
    ClaimsDto, CreateSessionRequest, CreateSessionResponse, ErrorEnvelopeDto, REVOKED_CODE,
    VerifyIdTokenRequest, VerifySessionRequest,
};
use crate::domain::ports::{IdentityOracle, IdentityOracleError};
use crate::domain::{IdToken, IdentityClaims, SessionCredential};

const VERIFY_SESSION_PATH: &str = "v1/sessions:verify";
const VERIFY_ID_TOKEN_PATH: &str = "v1/idTokens:verify";
const CREATE_SESSION_PATH: &str = "v1/sessions:create";

/// Identity oracle talking to the provider's admin REST API.
pub struct HttpIdentityOracle {
    client: Client,
    base_url: Url,
    api_key: Zeroizing<String>,
}

impl HttpIdentityOracle {
    /// Build an adapter with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: Zeroizing::new(api_key.into()),
        })
    }

    async fn call<B, T>(&self, path: &str, body: &B) -> Result<T, IdentityOracleError>
    where
        B: Serialize + Sync,
        T: DeserializeOwned,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|error| IdentityOracleError::transport(format!("bad endpoint: {error}")))?;
        let response = self
            .client
            .post(url)
            .bearer_auth(self.api_key.as_str())
            .json(body)
            .send()
            .await
            .map_err(|error| IdentityOracleError::transport(error.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|error| IdentityOracleError::transport(error.to_string()))?;
        if !status.is_success() {
            return Err(map_status_error(status, bytes.as_ref()));
        }
        serde_json::from_slice(bytes.as_ref()).map_err(|error| {
            IdentityOracleError::transport(format!("invalid identity provider payload: {error}"))
        })
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> IdentityOracleError {
    let envelope = serde_json::from_slice::<ErrorEnvelopeDto>(body).ok();
    if envelope
        .as_ref()
        .is_some_and(|envelope| envelope.error.code == REVOKED_CODE)
    {
        return IdentityOracleError::Revoked;
    }

    let detail = envelope
        .map(|envelope| envelope.error.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| format!("status {}", status.as_u16()));
    match status {
        StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            IdentityOracleError::invalid(detail)
        }
        _ => IdentityOracleError::transport(format!("status {}: {detail}", status.as_u16())),
    }
}

#[async_trait]
impl IdentityOracle for HttpIdentityOracle {
    async fn verify_session_credential(
        &self,
        credential: &SessionCredential,
        check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityOracleError> {
        if credential.is_empty() {
            return Err(IdentityOracleError::invalid("empty session credential"));
        }
        let claims: ClaimsDto = self
            .call(
                VERIFY_SESSION_PATH,
                &VerifySessionRequest {
                    session_credential: credential.expose(),
                    check_revoked,
                },
            )
            .await?;
        Ok(claims.into())
    }

    async fn verify_id_token(
        &self,
        token: &IdToken,
        check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityOracleError> {
        let claims: ClaimsDto = self
            .call(
                VERIFY_ID_TOKEN_PATH,
                &VerifyIdTokenRequest {
                    id_token: token.expose(),
                    check_revoked,
                },
            )
            .await?;
        Ok(claims.into())
    }

    async fn create_session_credential(
        &self,
        token: &IdToken,
        ttl: Duration,
    ) -> Result<SessionCredential, IdentityOracleError> {
        let response: CreateSessionResponse = self
            .call(
                CREATE_SESSION_PATH,
                &CreateSessionRequest {
                    id_token: token.expose(),
                    valid_duration_secs: ttl.as_secs(),
                },
            )
            .await?;
        Ok(SessionCredential::new(response.session_credential))
    }
}
