//! Driven port for the notification configuration singleton.
//!
//! Exactly one configuration may exist. Adapters store it under a fixed key
//! and `upsert` replaces it wholesale, so repeated subscribe calls never
//! accumulate rows.

use async_trait::async_trait;

use crate::domain::NotificationConfig;

use super::define_port_error;

define_port_error! {
    /// Errors raised by notification configuration adapters.
    pub enum NotificationConfigRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "notification config repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "notification config repository query failed: {message}",
    }
}

/// Port for loading and replacing the notification configuration.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NotificationConfigRepository: Send + Sync {
    /// Current configuration, or `None` before the first subscribe.
    async fn load(&self) -> Result<Option<NotificationConfig>, NotificationConfigRepositoryError>;

    /// Replace the configuration, creating it when absent.
    async fn upsert(
        &self,
        config: &NotificationConfig,
    ) -> Result<(), NotificationConfigRepositoryError>;
}
