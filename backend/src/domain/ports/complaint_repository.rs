//! Driven port for complaint persistence.
//!
//! The store assigns identifiers and submission timestamps, so inserts return
//! the persisted row. Notifications are rendered from that row.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::{Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, StatusCount};

use super::define_port_error;

define_port_error! {
    /// Errors raised by complaint repository adapters.
    pub enum ComplaintRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "complaint repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "complaint repository query failed: {message}",
    }
}

/// Port for complaint storage and aggregation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintRepository: Send + Sync {
    /// Persist a new complaint with status `Baru`.
    async fn insert(&self, draft: &ComplaintDraft) -> Result<Complaint, ComplaintRepositoryError>;

    /// All complaints, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError>;

    /// Set the status of one complaint.
    ///
    /// Returns `None` when no complaint has that identifier.
    async fn update_status(
        &self,
        id: &ComplaintId,
        status: &ComplaintStatus,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError>;

    /// Delete one complaint. Returns whether a row was removed.
    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError>;

    /// Number of complaints per distinct status value.
    async fn status_counts(&self) -> Result<Vec<StatusCount>, ComplaintRepositoryError>;

    /// Submission timestamps at or after `since`.
    async fn created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, ComplaintRepositoryError>;
}
