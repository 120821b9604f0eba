//! Student complaints and their triage status.
//!
//! Complaints arrive through the public submission form, are persisted with a
//! store-assigned identifier and timestamp, and are then triaged by admins who
//! move them through [`ComplaintStatus`] values.

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::openapi::{RefOr, Schema};
use utoipa::{PartialSchema, ToSchema};
use uuid::Uuid;

use super::notification::{EmailAddress, EmailValidationError};
use super::validation::{MissingFieldError, required_text};

/// Number of trailing days covered by [`ComplaintStats::daily_trend`].
pub const TREND_WINDOW_DAYS: i64 = 30;

/// Store-assigned complaint identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, format = Uuid)]
pub struct ComplaintId(Uuid);

impl ComplaintId {
    /// Wrap a UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the inner UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Triage status of a complaint.
///
/// The three well-known values drive notification policy. Any other non-blank
/// value is accepted and stored verbatim, but never notifies the submitter.
///
/// # Examples
/// ```
/// use conduct_desk::domain::ComplaintStatus;
///
/// assert_eq!(ComplaintStatus::parse(" Diproses ").unwrap(), ComplaintStatus::InReview);
/// assert_eq!(ComplaintStatus::parse("Ditolak").unwrap().as_str(), "Ditolak");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ComplaintStatus {
    /// `Baru`: freshly submitted, untouched.
    #[default]
    New,
    /// `Diproses`: an admin is reviewing it.
    InReview,
    /// `Selesai`: handled and closed.
    Resolved,
    /// Any other admin-chosen label.
    Other(String),
}

impl ComplaintStatus {
    const NEW: &'static str = "Baru";
    const IN_REVIEW: &'static str = "Diproses";
    const RESOLVED: &'static str = "Selesai";

    /// Parse a submitted status, trimming surrounding whitespace.
    pub fn parse(raw: &str) -> Result<Self, ComplaintValidationError> {
        let value = required_text("status", raw)?;
        Ok(match value.as_str() {
            Self::NEW => Self::New,
            Self::IN_REVIEW => Self::InReview,
            Self::RESOLVED => Self::Resolved,
            _ => Self::Other(value),
        })
    }

    /// Wire representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::New => Self::NEW,
            Self::InReview => Self::IN_REVIEW,
            Self::Resolved => Self::RESOLVED,
            Self::Other(value) => value.as_str(),
        }
    }
}

// Documented as a plain string: the wire form is the label itself.
impl PartialSchema for ComplaintStatus {
    fn schema() -> RefOr<Schema> {
        <String as PartialSchema>::schema()
    }
}

impl ToSchema for ComplaintStatus {
    fn name() -> Cow<'static, str> {
        Cow::Borrowed("ComplaintStatus")
    }
}

impl fmt::Display for ComplaintStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ComplaintStatus> for String {
    fn from(value: ComplaintStatus) -> Self {
        match value {
            ComplaintStatus::Other(value) => value,
            known => known.as_str().to_owned(),
        }
    }
}

impl TryFrom<String> for ComplaintStatus {
    type Error = ComplaintValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

/// Validation failures for complaint submissions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ComplaintValidationError {
    /// A required field was blank.
    #[error(transparent)]
    MissingField(#[from] MissingFieldError),
    /// The optional submitter email was present but malformed.
    #[error("reporterEmail is invalid: {0}")]
    InvalidEmail(#[from] EmailValidationError),
}

impl ComplaintValidationError {
    /// Wire name of the offending field.
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField(missing) => missing.field,
            Self::InvalidEmail(_) => "reporterEmail",
        }
    }
}

/// Validated complaint awaiting persistence.
///
/// ## Invariants
/// - Text fields are trimmed and non-empty.
/// - A blank `reporter_email` is treated as absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintDraft {
    reporter_name: String,
    class_name: String,
    category: String,
    detail: String,
    reporter_email: Option<EmailAddress>,
}

impl ComplaintDraft {
    /// Validate raw submission fields.
    ///
    /// # Examples
    /// ```
    /// use conduct_desk::domain::ComplaintDraft;
    ///
    /// let draft = ComplaintDraft::try_new("Rina", "XI IPA 2", "Bullying", "Teased at lunch", Some(" "))
    ///     .unwrap();
    /// assert!(draft.reporter_email().is_none());
    /// ```
    pub fn try_new(
        reporter_name: &str,
        class_name: &str,
        category: &str,
        detail: &str,
        reporter_email: Option<&str>,
    ) -> Result<Self, ComplaintValidationError> {
        let reporter_email = match reporter_email.map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(EmailAddress::parse(raw)?),
            _ => None,
        };
        Ok(Self {
            reporter_name: required_text("reporterName", reporter_name)?,
            class_name: required_text("className", class_name)?,
            category: required_text("category", category)?,
            detail: required_text("detail", detail)?,
            reporter_email,
        })
    }

    /// Reporter's name.
    #[must_use]
    pub fn reporter_name(&self) -> &str {
        &self.reporter_name
    }

    /// Reporter's class.
    #[must_use]
    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    /// Violation category the complaint concerns.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Free-text description.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    /// Address for submitter confirmations and status updates.
    #[must_use]
    pub fn reporter_email(&self) -> Option<&EmailAddress> {
        self.reporter_email.as_ref()
    }
}

/// Persisted complaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Complaint {
    pub id: ComplaintId,
    pub reporter_name: String,
    pub class_name: String,
    pub category: String,
    pub detail: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reporter_email: Option<EmailAddress>,
    pub status: ComplaintStatus,
    pub created_at: DateTime<Utc>,
}

/// Number of complaints carrying one status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: ComplaintStatus,
    pub count: u64,
}

/// Number of complaints submitted on one calendar day (UTC).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyCount {
    #[schema(value_type = String, example = "2026-10-01")]
    pub date: NaiveDate,
    pub count: u64,
}

/// Dashboard statistics for complaints.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintStats {
    pub status_counts: Vec<StatusCount>,
    pub daily_trend: Vec<DailyCount>,
}

impl ComplaintStats {
    /// Start of the trend window relative to `now`.
    #[must_use]
    pub fn trend_window_start(now: DateTime<Utc>) -> DateTime<Utc> {
        now - Duration::days(TREND_WINDOW_DAYS)
    }

    /// Bucket submission timestamps into ascending per-day counts.
    ///
    /// Days without submissions are omitted.
    #[must_use]
    pub fn bucket_by_day(timestamps: &[DateTime<Utc>]) -> Vec<DailyCount> {
        let mut buckets: BTreeMap<NaiveDate, u64> = BTreeMap::new();
        for timestamp in timestamps {
            *buckets.entry(timestamp.date_naive()).or_default() += 1;
        }
        buckets
            .into_iter()
            .map(|(date, count)| DailyCount { date, count })
            .collect()
    }
}
