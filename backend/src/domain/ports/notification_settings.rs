//! Driving port for managing the notification configuration.

use async_trait::async_trait;

use crate::domain::{Error, NotificationConfig};

/// Read and replace the notification configuration singleton.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationSettings: Send + Sync {
    /// Current configuration, or `None` before anyone subscribed.
    async fn current(&self) -> Result<Option<NotificationConfig>, Error>;

    /// Replace the configuration. The previous recipient list is discarded,
    /// not merged.
    async fn subscribe(&self, config: NotificationConfig) -> Result<NotificationConfig, Error>;
}
