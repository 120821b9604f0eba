//! Violation domain service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    EventNotifier, ViolationCommand, ViolationQuery, ViolationRepository,
    ViolationRepositoryError,
};
use crate::domain::{DomainEvent, Error, EventKind, Violation, ViolationDraft, ViolationId};

/// Violation service implementing [`ViolationCommand`] and [`ViolationQuery`].
pub struct ViolationService<R: ?Sized, N: ?Sized> {
    repo: Arc<R>,
    notifier: Arc<N>,
}

impl<R: ?Sized, N: ?Sized> ViolationService<R, N> {
    /// Create a service over a repository and a notifier.
    pub fn new(repo: Arc<R>, notifier: Arc<N>) -> Self {
        Self { repo, notifier }
    }
}

fn map_violation_repository_error(error: ViolationRepositoryError) -> Error {
    match error {
        ViolationRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("violation repository unavailable: {message}"))
        }
        ViolationRepositoryError::Query { message } => {
            Error::internal(format!("violation repository error: {message}"))
        }
    }
}

fn violation_not_found(id: &ViolationId) -> Error {
    Error::not_found(format!("violation {id} not found"))
}

#[async_trait]
impl<R, N> ViolationCommand for ViolationService<R, N>
where
    R: ViolationRepository + ?Sized,
    N: EventNotifier + ?Sized,
{
    async fn record(&self, draft: ViolationDraft) -> Result<Violation, Error> {
        let violation = self
            .repo
            .insert(&draft)
            .await
            .map_err(map_violation_repository_error)?;
        info!(violation_id = %violation.id, "violation recorded");

        self.notifier
            .notify(
                EventKind::ViolationRecorded,
                &DomainEvent::from_violation(&violation),
            )
            .await;
        Ok(violation)
    }

    async fn replace(&self, id: ViolationId, draft: ViolationDraft) -> Result<Violation, Error> {
        self.repo
            .replace(&id, &draft)
            .await
            .map_err(map_violation_repository_error)?
            .ok_or_else(|| violation_not_found(&id))
    }

    async fn delete(&self, id: ViolationId) -> Result<(), Error> {
        let removed = self
            .repo
            .delete(&id)
            .await
            .map_err(map_violation_repository_error)?;
        if !removed {
            return Err(violation_not_found(&id));
        }
        info!(violation_id = %id, "violation deleted");
        Ok(())
    }
}

#[async_trait]
impl<R, N> ViolationQuery for ViolationService<R, N>
where
    R: ViolationRepository + ?Sized,
    N: EventNotifier + ?Sized,
{
    async fn list(&self) -> Result<Vec<Violation>, Error> {
        self.repo
            .list_newest_first()
            .await
            .map_err(map_violation_repository_error)
    }
}
