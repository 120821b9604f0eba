//! Complaint domain service.
//!
//! Implements the complaint driving ports. Writes always complete before any
//! notification starts, and the notification event is built from the row the
//! store returned so it carries the generated id and timestamp.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::info;

use crate::domain::ports::{
    ComplaintCommand, ComplaintQuery, ComplaintRepository, ComplaintRepositoryError,
    EventNotifier,
};
use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintStats, ComplaintStatus, DomainEvent, Error,
    EventKind,
};

/// Complaint service implementing [`ComplaintCommand`] and [`ComplaintQuery`].
pub struct ComplaintService<R: ?Sized, N: ?Sized> {
    repo: Arc<R>,
    notifier: Arc<N>,
}

impl<R: ?Sized, N: ?Sized> ComplaintService<R, N> {
    /// Create a service over a repository and a notifier.
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }
}

pub(crate) fn map_complaint_repository_error(error: ComplaintRepositoryError) -> Error {
    match error {
        ComplaintRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("complaint repository unavailable: {message}"))
        }
        ComplaintRepositoryError::Query { message } => {
            Error::internal(format!("complaint repository error: {message}"))
        }
    }
}

fn complaint_not_found(id: &ComplaintId) -> Error {
    Error::not_found(format!("complaint {id} not found"))
}

#[async_trait]
impl<R, N> ComplaintCommand for ComplaintService<R, N>
where
    R: ComplaintRepository + ?Sized,
    N: EventNotifier + ?Sized,
{
    async fn submit(&self, draft: ComplaintDraft) -> Result<Complaint, Error> {
        let complaint = self
            .repo
            .insert(&draft)
            .await
            .map_err(map_complaint_repository_error)?;
        info!(complaint_id = %complaint.id, "complaint submitted");

        self.notifier
            .notify(EventKind::NewComplaint, &DomainEvent::from_complaint(&complaint))
            .await;
        Ok(complaint)
    }

    async fn update_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, Error> {
        let complaint = self
            .repo
            .update_status(&id, &status)
            .await
            .map_err(map_complaint_repository_error)?
            .ok_or_else(|| complaint_not_found(&id))?;
        info!(complaint_id = %id, status = %complaint.status, "complaint status updated");

        self.notifier
            .notify(EventKind::StatusChanged, &DomainEvent::from_complaint(&complaint))
            .await;
        Ok(complaint)
    }

    async fn delete(&self, id: ComplaintId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(&id)
            .await
            .map_err(map_complaint_repository_error)?;
        if removed {
            info!(complaint_id = %id, "complaint deleted");
            Ok(())
        } else {
            Err(complaint_not_found(&id))
        }
    }
}

#[async_trait]
impl<R, N> ComplaintQuery for ComplaintService<R, N>
where
    R: ComplaintRepository + ?Sized,
    N: EventNotifier + ?Sized,
{
    async fn list(&self) -> Result<Vec<Complaint>, Error> {
        self.repo
            .list_newest_first()
            .await
            .map_err(map_complaint_repository_error)
    }

    async fn stats(&self) -> Result<ComplaintStats, Error> {
        let status_counts = self
            .repo
            .status_counts()
            .await
            .map_err(map_complaint_repository_error)?;
        let since = ComplaintStats::trend_window_start(Utc::now());
        let timestamps = self
            .repo
            .created_since(since)
            .await
            .map_err(map_complaint_repository_error)?;

        Ok(ComplaintStats {
            status_counts,
            daily_trend: ComplaintStats::bucket_by_day(&timestamps),
        })
    }
}
