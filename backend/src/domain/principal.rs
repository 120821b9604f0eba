//! Authenticated identities and the opaque credentials that prove them.
//!
//! Credentials are minted and verified by the external identity provider; this
//! crate only carries them around. Their contents are zeroised on drop and
//! redacted from `Debug` output so they never reach logs.

use std::fmt;

use zeroize::Zeroizing;

/// Opaque session credential issued by the identity provider.
///
/// An absent credential is represented by [`SessionCredential::empty`], which
/// always fails verification instead of short-circuiting the oracle call.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionCredential(Zeroizing<String>);

impl SessionCredential {
    /// Wrap a raw credential string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(Zeroizing::new(raw.into()))
    }

    /// Credential used when the request carries none.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(String::new())
    }

    /// Whether the credential is blank.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Raw credential value for adapters that forward it to the provider.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for SessionCredential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionCredential(<redacted>)")
    }
}

/// Short-lived ID token obtained by the browser from the identity provider.
#[derive(Clone, PartialEq, Eq)]
pub struct IdToken(Zeroizing<String>);

/// Validation failure for [`IdToken`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdTokenValidationError {
    /// The token was blank once trimmed.
    #[error("idToken must not be empty")]
    Empty,
}

impl IdToken {
    /// Validate and wrap a raw ID token.
    pub fn new(raw: &str) -> Result<Self, IdTokenValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(IdTokenValidationError::Empty);
        }
        Ok(Self(Zeroizing::new(trimmed.to_owned())))
    }

    /// Raw token value for adapters.
    #[must_use]
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for IdToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("IdToken(<redacted>)")
    }
}

/// Claims decoded by the identity provider from a verified credential.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct IdentityClaims {
    /// Provider-assigned subject identifier.
    pub uid: String,
    /// Email address bound to the account, if any.
    pub email: Option<String>,
    /// Whether the provider has verified the email address.
    pub email_verified: bool,
    /// Custom admin privilege claim. Absent claims decode to `false`.
    pub admin: bool,
}

/// Authenticated admin identity for the duration of one request.
///
/// Only [`crate::domain::AuthGate`] produces principals, and only for claims
/// that carry the admin privilege.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    uid: String,
    email: Option<String>,
    is_admin: bool,
}

impl Principal {
    pub(crate) fn from_admin_claims(claims: IdentityClaims) -> Self {
        Self {
            uid: claims.uid,
            email: claims.email,
            is_admin: claims.admin,
        }
    }

    /// Provider subject identifier.
    #[must_use]
    pub fn uid(&self) -> &str {
        self.uid.as_str()
    }

    /// Email address from the claims, if present.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Admin privilege flag.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}
