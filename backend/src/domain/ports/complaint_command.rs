//! Driving port for complaint mutations.
//!
//! Inbound adapters validate raw input into domain values and call this port.
//! Implementations persist first and notify afterwards; notification problems
//! never surface as errors here.

use async_trait::async_trait;

use crate::domain::{Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, Error};

/// Use-cases that change complaints.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintCommand: Send + Sync {
    /// Persist a new complaint and notify admins and the submitter.
    async fn submit(&self, draft: ComplaintDraft) -> Result<Complaint, Error>;

    /// Change a complaint's status and notify the submitter when policy
    /// calls for it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn update_status(
        &self,
        id: ComplaintId,
        status: ComplaintStatus,
    ) -> Result<Complaint, Error>;

    /// Delete a complaint.
    ///
    /// # Errors
    ///
    /// Returns [`crate::domain::ErrorCode::NotFound`] for unknown ids.
    async fn delete(&self, id: ComplaintId) -> Result<(), Error>;
}
