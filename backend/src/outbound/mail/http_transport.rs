//! Reqwest-backed mail API adapter.
//!
//! Posts one JSON message per recipient to a transactional mail endpoint
//! authenticated with a bearer API key. Non-success statuses become
//! [`MailTransportError::Rejected`] with a short body preview.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use zeroize::Zeroizing;

use crate::domain::ports::{MailTransport, MailTransportError};
use crate::domain::{EmailAddress, OutboundEmail};

const PREVIEW_CHAR_LIMIT: usize = 160;

#[derive(Debug, Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: [&'a str; 1],
    subject: &'a str,
    text: &'a str,
}

/// Mail transport posting to an HTTP mail API.
pub struct HttpMailTransport {
    client: Client,
    endpoint: Url,
    api_key: Zeroizing<String>,
    sender: EmailAddress,
}

impl HttpMailTransport {
    /// Build a transport with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        api_key: impl Into<String>,
        sender: EmailAddress,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            api_key: Zeroizing::new(api_key.into()),
            sender,
        })
    }
}

fn map_transport_error(error: &reqwest::Error) -> MailTransportError {
    if error.is_timeout() {
        MailTransportError::timeout(error.to_string())
    } else {
        MailTransportError::transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> MailTransportError {
    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let mut preview: String = compact.chars().take(PREVIEW_CHAR_LIMIT).collect();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        preview.push_str("...");
    }
    MailTransportError::rejected(status.as_u16(), preview)
}

#[async_trait]
impl MailTransport for HttpMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
        let request = SendRequest {
            from: self.sender.as_str(),
            to: [email.to.as_str()],
            subject: &email.subject,
            text: &email.body,
        };
        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(self.api_key.as_str())
            .json(&request)
            .send()
            .await
            .map_err(|error| map_transport_error(&error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(&error))?;
        Err(map_status_error(status, body.as_ref()))
    }
}
