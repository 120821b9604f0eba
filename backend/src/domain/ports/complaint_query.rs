//! Driving port for complaint reads.

use async_trait::async_trait;

use crate::domain::{Complaint, ComplaintStats, Error};

/// Read-side complaint use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ComplaintQuery: Send + Sync {
    /// Every complaint, newest first.
    async fn list(&self) -> Result<Vec<Complaint>, Error>;

    /// Status counts plus the trailing daily submission trend.
    async fn stats(&self) -> Result<ComplaintStats, Error>;
}
