//! Driven port for violation persistence.

use async_trait::async_trait;

use crate::domain::{Violation, ViolationDraft, ViolationId};

use super::define_port_error;

define_port_error! {
    /// Errors raised by violation repository adapters.
    pub enum ViolationRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } => "violation repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } => "violation repository query failed: {message}",
    }
}

/// Port for violation storage.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViolationRepository: Send + Sync {
    /// Persist a new violation.
    async fn insert(&self, draft: &ViolationDraft) -> Result<Violation, ViolationRepositoryError>;

    /// All violations, newest first.
    async fn list_newest_first(&self) -> Result<Vec<Violation>, ViolationRepositoryError>;

    /// Replace the editable fields of one violation, keeping its timestamp.
    ///
    /// Returns `None` when no violation has that identifier.
    async fn replace(
        &self,
        id: &ViolationId,
        draft: &ViolationDraft,
    ) -> Result<Option<Violation>, ViolationRepositoryError>;

    /// Delete one violation. Returns whether a row was removed.
    async fn delete(&self, id: &ViolationId) -> Result<bool, ViolationRepositoryError>;
}
