//! Driven port for the outbound mail API.

use async_trait::async_trait;

use crate::domain::OutboundEmail;

use super::define_port_error;

define_port_error! {
    /// Errors raised by mail transport adapters.
    pub enum MailTransportError {
        /// The request never produced a response.
        Transport { message: String } => "mail transport failed: {message}",
        /// The mail API rejected the message.
        Rejected { status: u16, message: String } => "mail API rejected message ({status}): {message}",
        /// The send did not settle within the configured budget.
        Timeout { message: String } => "mail send timed out: {message}",
    }
}

/// Port for delivering one email to one recipient.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Submit `email` for delivery.
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError>;
}
