//! Shared field validation for submitted records.

/// A required text field was missing or blank once trimmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{field} must not be empty")]
pub struct MissingFieldError {
    /// Wire name of the offending field.
    pub field: &'static str,
}

/// Trim `raw` and reject it when nothing remains.
pub(crate) fn required_text(field: &'static str, raw: &str) -> Result<String, MissingFieldError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        Err(MissingFieldError { field })
    } else {
        Ok(trimmed.to_owned())
    }
}
