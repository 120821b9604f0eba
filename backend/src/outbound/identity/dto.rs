//! Wire shapes for the identity provider's admin API.

use serde::{Deserialize, Serialize};

use crate::domain::IdentityClaims;

/// Error code the provider uses for credentials revoked after issuance.
pub(super) const REVOKED_CODE: &str = "CREDENTIAL_REVOKED";

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VerifySessionRequest<'a> {
    pub(super) session_credential: &'a str,
    pub(super) check_revoked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct VerifyIdTokenRequest<'a> {
    pub(super) id_token: &'a str,
    pub(super) check_revoked: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSessionRequest<'a> {
    pub(super) id_token: &'a str,
    pub(super) valid_duration_secs: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateSessionResponse {
    pub(super) session_credential: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ClaimsDto {
    pub(super) uid: String,
    #[serde(default)]
    pub(super) email: Option<String>,
    #[serde(default)]
    pub(super) email_verified: bool,
    /// Custom claims; only `admin` is read.
    #[serde(default)]
    pub(super) claims: CustomClaimsDto,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct CustomClaimsDto {
    #[serde(default)]
    pub(super) admin: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    pub(super) error: ErrorDto,
}

#[derive(Debug, Deserialize)]
pub(super) struct ErrorDto {
    #[serde(default)]
    pub(super) code: String,
    #[serde(default)]
    pub(super) message: String,
}

impl From<ClaimsDto> for IdentityClaims {
    fn from(value: ClaimsDto) -> Self {
        Self {
            uid: value.uid,
            email: value.email,
            email_verified: value.email_verified,
            admin: value.claims.admin.unwrap_or(false),
        }
    }
}
