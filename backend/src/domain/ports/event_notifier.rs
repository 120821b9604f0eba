//! Port through which services hand persisted events to notification
//! delivery.

use async_trait::async_trait;

use crate::domain::{DispatchReport, DomainEvent, EventKind};

/// Best-effort notification sink.
///
/// Implementations never fail: delivery problems are logged and summarised
/// in the returned report, which callers are free to ignore.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventNotifier: Send + Sync {
    /// Deliver whatever notifications `kind` calls for.
    async fn notify(&self, kind: EventKind, event: &DomainEvent) -> DispatchReport;
}

/// Notifier that sends nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoOpEventNotifier;

#[async_trait]
impl EventNotifier for NoOpEventNotifier {
    async fn notify(&self, _kind: EventKind, _event: &DomainEvent) -> DispatchReport {
        DispatchReport::default()
    }
}
