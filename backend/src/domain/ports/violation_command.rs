//! Driving port for violation mutations.

use async_trait::async_trait;

use crate::domain::{Error, Violation, ViolationDraft, ViolationId};

/// Use-cases that change violations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViolationCommand: Send + Sync {
    /// Persist a violation and notify admins when enabled.
    async fn record(&self, draft: ViolationDraft) -> Result<Violation, Error>;

    /// Replace a violation's fields. Unknown ids yield `not_found`.
    async fn replace(&self, id: ViolationId, draft: ViolationDraft) -> Result<Violation, Error>;

    /// Delete a violation. Unknown ids yield `not_found`.
    async fn delete(&self, id: ViolationId) -> Result<(), Error>;
}
