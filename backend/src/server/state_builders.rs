//! Builders for the driven adapters behind the HTTP state.

use std::sync::Arc;

use conduct_desk::domain::{EmailAddress, EmailValidationError};
use conduct_desk::domain::ports::{IdentityOracle, MailTransport};
use conduct_desk::inbound::http::state::{DrivenAdapters, HttpState};
use conduct_desk::outbound::identity::HttpIdentityOracle;
use conduct_desk::outbound::mail::HttpMailTransport;
use conduct_desk::outbound::persistence::{
    DbPool, DieselComplaintRepository, DieselNotificationConfigRepository,
    DieselViolationRepository,
};
use conduct_desk::settings::{AppSettings, SettingsError};
use reqwest::Url;

/// Errors raised while assembling outbound adapters.
#[derive(Debug, thiserror::Error)]
pub enum AdapterBuildError {
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("invalid URL for {name}: {message}")]
    InvalidUrl { name: &'static str, message: String },
    #[error("invalid mail sender address: {0}")]
    InvalidSender(#[from] EmailValidationError),
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

fn parse_url(raw: &str, name: &'static str) -> Result<Url, AdapterBuildError> {
    Url::parse(raw).map_err(|err| AdapterBuildError::InvalidUrl {
        name,
        message: err.to_string(),
    })
}

/// Parse a base URL that endpoint paths are joined onto.
///
/// A missing trailing `/` is appended so `Url::join` keeps the last segment.
fn parse_base_url(raw: &str, name: &'static str) -> Result<Url, AdapterBuildError> {
    let mut url = parse_url(raw, name)?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// HTTP clients for the identity provider and the mail API.
pub(super) fn build_http_adapters(
    settings: &AppSettings,
) -> Result<(Arc<dyn IdentityOracle>, Arc<dyn MailTransport>), AdapterBuildError> {
    let timeout = settings.outbound_timeout();

    let (identity_url, identity_key) = settings.identity()?;
    let oracle = HttpIdentityOracle::new(
        parse_base_url(identity_url, "identity_base_url")?,
        identity_key,
        timeout,
    )?;

    let (mail_url, mail_key, sender) = settings.mail()?;
    let transport = HttpMailTransport::new(
        parse_url(mail_url, "mail_api_url")?,
        mail_key,
        EmailAddress::parse(sender)?,
        timeout,
    )?;

    Ok((Arc::new(oracle), Arc::new(transport)))
}

/// Build the shared HTTP state over Diesel repositories and HTTP clients.
pub fn build_http_state(
    settings: &AppSettings,
    pool: &DbPool,
) -> Result<HttpState, AdapterBuildError> {
    let (identity, mail) = build_http_adapters(settings)?;
    Ok(HttpState::from_adapters(DrivenAdapters {
        identity,
        complaints: Arc::new(DieselComplaintRepository::new(pool.clone())),
        violations: Arc::new(DieselViolationRepository::new(pool.clone())),
        notification_config: Arc::new(DieselNotificationConfigRepository::new(pool.clone())),
        mail,
        send_timeout: settings.notify_timeout(),
    }))
}
