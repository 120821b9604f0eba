//! PostgreSQL-backed `ComplaintRepository` using Diesel.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::dsl::count;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use tracing::warn;
use uuid::Uuid;

use crate::domain::ports::{ComplaintRepository, ComplaintRepositoryError};
use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, EmailAddress, StatusCount,
};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{ComplaintRow, NewComplaintRow};
use super::pool::{DbPool, PoolError};
use super::schema::complaints;

/// Diesel-backed complaint storage.
#[derive(Clone)]
pub struct DieselComplaintRepository {
    pool: DbPool,
}

impl DieselComplaintRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ComplaintRepositoryError {
    map_pool_error(error, ComplaintRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ComplaintRepositoryError {
    map_diesel_error(
        error,
        ComplaintRepositoryError::query,
        ComplaintRepositoryError::connection,
    )
}

fn status_from_db(raw: &str, id: Uuid) -> ComplaintStatus {
    ComplaintStatus::parse(raw).unwrap_or_else(|_| {
        warn!(complaint_id = %id, "blank complaint status in database; treating as new");
        ComplaintStatus::default()
    })
}

fn row_to_complaint(row: ComplaintRow) -> Complaint {
    let reporter_email = row.reporter_email.as_deref().and_then(|raw| {
        EmailAddress::parse(raw)
            .map_err(|error| {
                warn!(complaint_id = %row.id, %error, "dropping unparseable reporter email");
            })
            .ok()
    });
    Complaint {
        id: ComplaintId::from_uuid(row.id),
        status: status_from_db(&row.status, row.id),
        reporter_name: row.reporter_name,
        class_name: row.class_name,
        category: row.category,
        detail: row.detail,
        reporter_email,
        created_at: row.created_at,
    }
}

#[async_trait]
impl ComplaintRepository for DieselComplaintRepository {
    async fn insert(&self, draft: &ComplaintDraft) -> Result<Complaint, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let status = ComplaintStatus::New;
        let row = NewComplaintRow {
            id: Uuid::new_v4(),
            reporter_name: draft.reporter_name(),
            class_name: draft.class_name(),
            category: draft.category(),
            detail: draft.detail(),
            reporter_email: draft.reporter_email().map(EmailAddress::as_str),
            status: status.as_str(),
        };

        let stored: ComplaintRow = diesel::insert_into(complaints::table)
            .values(&row)
            .returning(ComplaintRow::as_returning())
            .get_result(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(row_to_complaint(stored))
    }

    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ComplaintRow> = complaints::table
            .order((complaints::created_at.desc(), complaints::id.desc()))
            .select(ComplaintRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(row_to_complaint).collect())
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: &ComplaintStatus,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let updated: Option<ComplaintRow> =
            diesel::update(complaints::table.find(id.as_uuid()))
                .set(complaints::status.eq(status.as_str()))
                .returning(ComplaintRow::as_returning())
                .get_result(&mut conn)
                .await
                .optional()
                .map_err(diesel_error)?;
        Ok(updated.map(row_to_complaint))
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(complaints::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<(String, i64)> = complaints::table
            .group_by(complaints::status)
            .select((complaints::status, count(complaints::id)))
            .order(complaints::status.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;

        Ok(rows
            .into_iter()
            .map(|(status, total)| StatusCount {
                status: ComplaintStatus::parse(&status).unwrap_or_default(),
                count: u64::try_from(total).unwrap_or(0),
            })
            .collect())
    }

    async fn created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, ComplaintRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        complaints::table
            .filter(complaints::created_at.ge(since))
            .select(complaints::created_at)
            .order(complaints::created_at.asc())
            .load(&mut conn)
            .await
            .map_err(diesel_error)
    }
}
