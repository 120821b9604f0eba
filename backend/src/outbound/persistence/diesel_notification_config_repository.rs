//! PostgreSQL-backed `NotificationConfigRepository` using Diesel.
//!
//! The configuration lives in a single row keyed by
//! [`NOTIFICATION_SETTINGS_ID`]; `upsert` is `INSERT ... ON CONFLICT (id) DO
//! UPDATE`, so concurrent subscribes resolve to last-writer-wins without ever
//! creating a second row.

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;

use crate::domain::ports::{NotificationConfigRepository, NotificationConfigRepositoryError};
use crate::domain::{EmailAddress, NotificationConfig};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NOTIFICATION_SETTINGS_ID, NotificationSettingsRow, NotificationSettingsUpsert};
use super::pool::{DbPool, PoolError};
use super::schema::notification_settings;

/// Diesel-backed notification configuration singleton.
#[derive(Clone)]
pub struct DieselNotificationConfigRepository {
    pool: DbPool,
}

impl DieselNotificationConfigRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> NotificationConfigRepositoryError {
    map_pool_error(error, NotificationConfigRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> NotificationConfigRepositoryError {
    map_diesel_error(
        error,
        NotificationConfigRepositoryError::query,
        NotificationConfigRepositoryError::connection,
    )
}

fn row_to_config(row: NotificationSettingsRow) -> NotificationConfig {
    let recipients = row.recipients.iter().filter_map(|raw| {
        EmailAddress::parse(raw)
            .map_err(|error| warn!(%error, "skipping stored recipient that no longer parses"))
            .ok()
    });
    NotificationConfig::new(
        recipients,
        row.notify_on_complaint,
        row.notify_on_violation,
    )
}

fn config_to_upsert(config: &NotificationConfig) -> NotificationSettingsUpsert {
    NotificationSettingsUpsert {
        id: NOTIFICATION_SETTINGS_ID,
        recipients: config
            .recipients()
            .iter()
            .map(|email| email.as_str().to_owned())
            .collect(),
        notify_on_complaint: config.notify_on_complaint(),
        notify_on_violation: config.notify_on_violation(),
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl NotificationConfigRepository for DieselNotificationConfigRepository {
    async fn load(&self) -> Result<Option<NotificationConfig>, NotificationConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row: Option<NotificationSettingsRow> = notification_settings::table
            .find(NOTIFICATION_SETTINGS_ID)
            .select(NotificationSettingsRow::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(row_to_config))
    }

    async fn upsert(
        &self,
        config: &NotificationConfig,
    ) -> Result<(), NotificationConfigRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = config_to_upsert(config);
        diesel::insert_into(notification_settings::table)
            .values(&row)
            .on_conflict(notification_settings::id)
            .do_update()
            .set(&row)
            .execute(&mut conn)
            .await
            .map(|_| ())
            .map_err(diesel_error)
    }
}
