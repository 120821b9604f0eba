//! Notification settings service.
//!
//! Subscribing replaces the singleton configuration. It never appends to the
//! previous recipient list.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::domain::ports::{
    NotificationConfigRepository, NotificationConfigRepositoryError, NotificationSettings,
};
use crate::domain::{Error, NotificationConfig};

/// Service implementing [`NotificationSettings`].
pub struct NotificationSettingsService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: ?Sized> NotificationSettingsService<R> {
    /// Create a service over the configuration repository.
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

fn map_config_error(error: NotificationConfigRepositoryError) -> Error {
    match error {
        NotificationConfigRepositoryError::Connection { message } => Error::service_unavailable(
            format!("notification config repository unavailable: {message}"),
        ),
        NotificationConfigRepositoryError::Query { message } => {
            Error::internal(format!("notification config repository error: {message}"))
        }
    }
}

#[async_trait]
impl<R> NotificationSettings for NotificationSettingsService<R>
where
    R: NotificationConfigRepository + ?Sized,
{
    async fn current(&self) -> Result<Option<NotificationConfig>, Error> {
        self.repo.load().await.map_err(map_config_error)
    }

    async fn subscribe(&self, config: NotificationConfig) -> Result<NotificationConfig, Error> {
        self.repo.upsert(&config).await.map_err(map_config_error)?;
        info!(
            recipients = config.recipients().len(),
            notify_on_complaint = config.notify_on_complaint(),
            notify_on_violation = config.notify_on_violation(),
            "notification subscription replaced"
        );
        Ok(config)
    }
}
