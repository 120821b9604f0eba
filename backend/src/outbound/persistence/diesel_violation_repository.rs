//! PostgreSQL-backed `ViolationRepository` using Diesel.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::ports::{ViolationRepository, ViolationRepositoryError};
use crate::domain::{Violation, ViolationDraft, ViolationId};

use super::error_mapping::{map_diesel_error, map_pool_error};
use super::models::{NewViolationRow, ViolationRow, ViolationUpdate};
use super::pool::{DbPool, PoolError};
use super::schema::violations;

/// Diesel-backed violation storage.
#[derive(Clone)]
pub struct DieselViolationRepository {
    pool: DbPool,
}

impl DieselViolationRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn pool_error(error: PoolError) -> ViolationRepositoryError {
    map_pool_error(error, ViolationRepositoryError::connection)
}

fn diesel_error(error: diesel::result::Error) -> ViolationRepositoryError {
    map_diesel_error(
        error,
        ViolationRepositoryError::query,
        ViolationRepositoryError::connection,
    )
}

impl From<ViolationRow> for Violation {
    fn from(row: ViolationRow) -> Self {
        Self {
            id: ViolationId::from_uuid(row.id),
            student_name: row.student_name,
            class_name: row.class_name,
            category: row.category,
            note: row.note,
            created_at: row.created_at,
        }
    }
}

#[async_trait]
impl ViolationRepository for DieselViolationRepository {
    async fn insert(&self, draft: &ViolationDraft) -> Result<Violation, ViolationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let row = NewViolationRow {
            id: Uuid::new_v4(),
            student_name: draft.student_name(),
            class_name: draft.class_name(),
            category: draft.category(),
            note: draft.note(),
        };

        diesel::insert_into(violations::table)
            .values(&row)
            .returning(ViolationRow::as_returning())
            .get_result::<ViolationRow>(&mut conn)
            .await
            .map(Violation::from)
            .map_err(diesel_error)
    }

    async fn list_newest_first(&self) -> Result<Vec<Violation>, ViolationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let rows: Vec<ViolationRow> = violations::table
            .order((violations::created_at.desc(), violations::id.desc()))
            .select(ViolationRow::as_select())
            .load(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(rows.into_iter().map(Violation::from).collect())
    }

    async fn replace(
        &self,
        id: &ViolationId,
        draft: &ViolationDraft,
    ) -> Result<Option<Violation>, ViolationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let update = ViolationUpdate {
            student_name: draft.student_name(),
            class_name: draft.class_name(),
            category: draft.category(),
            note: draft.note(),
        };

        let row: Option<ViolationRow> = diesel::update(violations::table.find(id.as_uuid()))
            .set(&update)
            .returning(ViolationRow::as_returning())
            .get_result(&mut conn)
            .await
            .optional()
            .map_err(diesel_error)?;
        Ok(row.map(Violation::from))
    }

    async fn delete(&self, id: &ViolationId) -> Result<bool, ViolationRepositoryError> {
        let mut conn = self.pool.get().await.map_err(pool_error)?;
        let removed = diesel::delete(violations::table.find(id.as_uuid()))
            .execute(&mut conn)
            .await
            .map_err(diesel_error)?;
        Ok(removed > 0)
    }
}
