//! Driving port for violation reads.

use async_trait::async_trait;

use crate::domain::{Error, Violation};

/// Read-side violation use-cases.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ViolationQuery: Send + Sync {
    /// Every violation, newest first.
    async fn list(&self) -> Result<Vec<Violation>, Error>;
}
