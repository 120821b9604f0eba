//! Best-effort notification fan-out.
//!
//! The dispatcher renders one message per audience and sends it to every
//! recipient concurrently. Each send is independent: a failure or timeout is
//! logged with the recipient and counted, never retried, and never stops its
//! siblings. Dispatch itself cannot fail.
//!
//! Admin recipients come from the [`NotificationConfig`] singleton, re-read on
//! every dispatch. A missing configuration, a store error or a disabled flag
//! turns the admin fan-out into a logged no-op.
//!
//! [`NotificationConfig`]: crate::domain::NotificationConfig

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::future::{join, join_all};
use tracing::{debug, info, warn};

use crate::domain::notification::{Audience, render};
use crate::domain::ports::{
    EventNotifier, MailTransport, MailTransportError, NotificationConfigRepository,
};
use crate::domain::{DomainEvent, EmailAddress, EventKind, NotificationMessage, OutboundEmail};

/// Default upper bound for a single send.
pub const DEFAULT_SEND_TIMEOUT: Duration = Duration::from_secs(10);

/// Tally of one dispatch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchReport {
    /// Sends started.
    pub attempted: usize,
    /// Sends the transport accepted.
    pub delivered: usize,
    /// Sends that failed or timed out.
    pub failed: usize,
}

impl DispatchReport {
    fn merge(self, other: Self) -> Self {
        Self {
            attempted: self.attempted + other.attempted,
            delivered: self.delivered + other.delivered,
            failed: self.failed + other.failed,
        }
    }
}

/// Sends notifications for domain events.
pub struct NotificationDispatcher<C: ?Sized, M: ?Sized> {
    config: Arc<C>,
    transport: Arc<M>,
    send_timeout: Duration,
}

impl<C: ?Sized, M: ?Sized> Clone for NotificationDispatcher<C, M> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            transport: Arc::clone(&self.transport),
            send_timeout: self.send_timeout,
        }
    }
}

impl<C: ?Sized, M: ?Sized> NotificationDispatcher<C, M> {
    /// Create a dispatcher with the default per-send timeout.
    pub fn new(config: Arc<C>, transport: Arc<M>) -> Self {
        Self {
            config,
            transport,
            send_timeout: DEFAULT_SEND_TIMEOUT,
        }
    }

    /// Override the per-send timeout.
    #[must_use]
    pub fn with_send_timeout(mut self, send_timeout: Duration) -> Self {
        self.send_timeout = send_timeout;
        self
    }
}

impl<C, M> NotificationDispatcher<C, M>
where
    C: NotificationConfigRepository + ?Sized,
    M: MailTransport + ?Sized,
{
    /// Deliver the notifications `kind` calls for.
    ///
    /// - `NewComplaint`: admin fan-out and submitter confirmation, concurrently.
    /// - `StatusChanged`: submitter only, and only for `Diproses`/`Selesai`.
    /// - `ViolationRecorded`: admin fan-out only.
    pub async fn dispatch(&self, kind: EventKind, event: &DomainEvent) -> DispatchReport {
        let report = match kind {
            EventKind::NewComplaint => {
                let (admins, submitter) = join(
                    self.admin_fan_out(kind, event),
                    self.submitter_send(kind, event),
                )
                .await;
                admins.merge(submitter)
            }
            EventKind::StatusChanged => self.submitter_send(kind, event).await,
            EventKind::ViolationRecorded => self.admin_fan_out(kind, event).await,
        };

        debug!(
            kind = kind.as_str(),
            record_id = %event.record_id,
            attempted = report.attempted,
            delivered = report.delivered,
            failed = report.failed,
            "notification dispatch finished"
        );
        report
    }

    async fn admin_fan_out(&self, kind: EventKind, event: &DomainEvent) -> DispatchReport {
        let config = match self.config.load().await {
            Ok(Some(config)) => config,
            Ok(None) => {
                warn!(kind = kind.as_str(), "no notification config; skipping admin notification");
                return DispatchReport::default();
            }
            Err(err) => {
                warn!(
                    kind = kind.as_str(),
                    error = %err,
                    "notification config unavailable; skipping admin notification"
                );
                return DispatchReport::default();
            }
        };

        if !config.is_enabled_for(kind) {
            warn!(kind = kind.as_str(), "admin notification disabled");
            return DispatchReport::default();
        }
        if config.recipients().is_empty() {
            warn!(kind = kind.as_str(), "notification config has no recipients");
            return DispatchReport::default();
        }
        let Some(message) = render(kind, Audience::Admins, event) else {
            return DispatchReport::default();
        };

        self.send_all(&message, config.recipients()).await
    }

    async fn submitter_send(&self, kind: EventKind, event: &DomainEvent) -> DispatchReport {
        let Some(recipient) = event.recipient_email.as_ref() else {
            debug!(kind = kind.as_str(), "no submitter email; skipping");
            return DispatchReport::default();
        };
        let Some(message) = render(kind, Audience::Submitter, event) else {
            debug!(
                kind = kind.as_str(),
                status = event.status.as_ref().map(|s| s.as_str()),
                "no submitter message for event"
            );
            return DispatchReport::default();
        };

        self.send_all(&message, std::slice::from_ref(recipient)).await
    }

    async fn send_all(
        &self,
        message: &NotificationMessage,
        recipients: &[EmailAddress],
    ) -> DispatchReport {
        let sends = recipients
            .iter()
            .map(|recipient| self.send_one(message.addressed_to(recipient.clone())));
        let outcomes = join_all(sends).await;

        let delivered = outcomes.iter().filter(|delivered| **delivered).count();
        DispatchReport {
            attempted: outcomes.len(),
            delivered,
            failed: outcomes.len() - delivered,
        }
    }

    async fn send_one(&self, email: OutboundEmail) -> bool {
        let result = match tokio::time::timeout(self.send_timeout, self.transport.send(&email)).await
        {
            Ok(result) => result,
            Err(_) => Err(MailTransportError::timeout(format!(
                "no response within {}ms",
                self.send_timeout.as_millis()
            ))),
        };

        match result {
            Ok(()) => {
                info!(recipient = %email.to, subject = %email.subject, "notification sent");
                true
            }
            Err(err) => {
                warn!(recipient = %email.to, error = %err, "notification send failed");
                false
            }
        }
    }
}

#[async_trait]
impl<C, M> EventNotifier for NotificationDispatcher<C, M>
where
    C: NotificationConfigRepository + ?Sized,
    M: MailTransport + ?Sized,
{
    async fn notify(&self, kind: EventKind, event: &DomainEvent) -> DispatchReport {
        self.dispatch(kind, event).await
    }
}

#[cfg(test)]
#[path = "notification_dispatcher_tests.rs"]
mod tests;
