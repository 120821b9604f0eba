//! Notification recipients, events and message rendering.
//!
//! Rendering is pure: the message chosen for an event depends only on the
//! event kind, the audience and the event payload, never on the individual
//! recipient. The dispatcher decides who receives it.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::complaint::{Complaint, ComplaintStatus};
use super::violation::Violation;

/// Validation failures for [`EmailAddress`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// Nothing remained after trimming.
    #[error("email address must not be empty")]
    Empty,
    /// The value is not of the form `local@domain`.
    #[error("email address `{0}` is malformed")]
    Malformed(String),
}

/// Syntactically plausible email address.
///
/// Only the shape is checked: exactly one `@`, non-empty local and domain
/// parts and no embedded whitespace. Deliverability is the mail API's problem.
///
/// # Examples
/// ```
/// use conduct_desk::domain::EmailAddress;
///
/// assert_eq!(EmailAddress::parse(" a@x ").unwrap().as_str(), "a@x");
/// assert!(EmailAddress::parse("a@@x").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, format = "email", example = "wali.kelas@school.id")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Trim and validate a raw address.
    pub fn parse(raw: &str) -> Result<Self, EmailValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EmailValidationError::Empty);
        }
        let malformed = || EmailValidationError::Malformed(trimmed.to_owned());
        if trimmed.chars().any(char::is_whitespace) {
            return Err(malformed());
        }
        let (local, domain) = trimmed.split_once('@').ok_or_else(malformed)?;
        if local.is_empty() || domain.is_empty() || domain.contains('@') {
            return Err(malformed());
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the address.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Singleton notification configuration.
///
/// ## Invariants
/// - `recipients` holds no two addresses that differ only by ASCII case.
/// - Recipient order is first-seen order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NotificationConfig {
    recipients: Vec<EmailAddress>,
    notify_on_complaint: bool,
    notify_on_violation: bool,
}

impl NotificationConfig {
    /// Build a configuration, collapsing duplicate recipients.
    pub fn new(
        recipients: impl IntoIterator<Item = EmailAddress>,
        notify_on_complaint: bool,
        notify_on_violation: bool,
    ) -> Self {
        let mut seen = HashSet::new();
        let recipients = recipients
            .into_iter()
            .filter(|address| seen.insert(address.as_str().to_ascii_lowercase()))
            .collect();
        Self {
            recipients,
            notify_on_complaint,
            notify_on_violation,
        }
    }

    /// Admin recipients in insertion order.
    #[must_use]
    pub fn recipients(&self) -> &[EmailAddress] {
        &self.recipients
    }

    /// Whether new complaints notify admins.
    #[must_use]
    pub fn notify_on_complaint(&self) -> bool {
        self.notify_on_complaint
    }

    /// Whether recorded violations notify admins.
    #[must_use]
    pub fn notify_on_violation(&self) -> bool {
        self.notify_on_violation
    }

    /// Whether admins should hear about `kind`.
    #[must_use]
    pub fn is_enabled_for(&self, kind: EventKind) -> bool {
        match kind {
            EventKind::NewComplaint => self.notify_on_complaint,
            EventKind::ViolationRecorded => self.notify_on_violation,
            EventKind::StatusChanged => false,
        }
    }
}

/// Event classes that may trigger notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A complaint was submitted.
    NewComplaint,
    /// An admin changed a complaint's status.
    StatusChanged,
    /// An admin recorded a violation.
    ViolationRecorded,
}

impl EventKind {
    /// Stable label for logs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NewComplaint => "new_complaint",
            Self::StatusChanged => "status_changed",
            Self::ViolationRecorded => "violation_recorded",
        }
    }
}

/// Snapshot of a persisted record used to render notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainEvent {
    pub record_id: Uuid,
    pub reporter_name: String,
    pub class_name: String,
    pub category: String,
    pub detail: String,
    pub recipient_email: Option<EmailAddress>,
    pub status: Option<ComplaintStatus>,
    pub occurred_at: DateTime<Utc>,
}

impl DomainEvent {
    /// Event for a persisted complaint, carrying its current status.
    #[must_use]
    pub fn from_complaint(complaint: &Complaint) -> Self {
        Self {
            record_id: *complaint.id.as_uuid(),
            reporter_name: complaint.reporter_name.clone(),
            class_name: complaint.class_name.clone(),
            category: complaint.category.clone(),
            detail: complaint.detail.clone(),
            recipient_email: complaint.reporter_email.clone(),
            status: Some(complaint.status.clone()),
            occurred_at: complaint.created_at,
        }
    }

    /// Event for a persisted violation. Violations have no submitter.
    #[must_use]
    pub fn from_violation(violation: &Violation) -> Self {
        Self {
            record_id: *violation.id.as_uuid(),
            reporter_name: violation.student_name.clone(),
            class_name: violation.class_name.clone(),
            category: violation.category.clone(),
            detail: violation.note.clone(),
            recipient_email: None,
            status: None,
            occurred_at: violation.created_at,
        }
    }
}

/// Who a rendered message is addressed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Configured admin recipients.
    Admins,
    /// The person who submitted the complaint.
    Submitter,
}

/// Recipient-independent message content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub subject: String,
    pub body: String,
}

impl NotificationMessage {
    /// Address the message to one recipient.
    #[must_use]
    pub fn addressed_to(&self, to: EmailAddress) -> OutboundEmail {
        OutboundEmail {
            to,
            subject: self.subject.clone(),
            body: self.body.clone(),
        }
    }
}

/// One email ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundEmail {
    pub to: EmailAddress,
    pub subject: String,
    pub body: String,
}

/// Select and render the message for `kind` sent to `audience`.
///
/// Returns `None` when policy says nothing should be sent. Status changes
/// only notify the submitter, and only for `Diproses` and `Selesai`.
#[must_use]
pub fn render(kind: EventKind, audience: Audience, event: &DomainEvent) -> Option<NotificationMessage> {
    match (kind, audience) {
        (EventKind::NewComplaint, Audience::Admins) => Some(NotificationMessage {
            subject: format!("New complaint: {}", event.category),
            body: format!(
                "A new complaint was submitted.\n\n\
                 Reporter: {}\nClass: {}\nCategory: {}\nDetail: {}\n\
                 Reference: {}\nSubmitted at: {}\n",
                event.reporter_name,
                event.class_name,
                event.category,
                event.detail,
                event.record_id,
                event.occurred_at.to_rfc3339(),
            ),
        }),
        (EventKind::NewComplaint, Audience::Submitter) => Some(NotificationMessage {
            subject: "We received your complaint".to_owned(),
            body: format!(
                "Hello {},\n\nThank you for your report about \"{}\". \
                 It has been received and will be reviewed by the school.\n\n\
                 Reference: {}\n",
                event.reporter_name, event.category, event.record_id,
            ),
        }),
        (EventKind::StatusChanged, Audience::Submitter) => {
            let phrase = match event.status.as_ref()? {
                ComplaintStatus::InReview => "is now in review",
                ComplaintStatus::Resolved => "has been resolved",
                _ => return None,
            };
            Some(NotificationMessage {
                subject: format!("Your complaint {phrase}"),
                body: format!(
                    "Hello {},\n\nYour complaint about \"{}\" {phrase}.\n\nReference: {}\n",
                    event.reporter_name, event.category, event.record_id,
                ),
            })
        }
        (EventKind::ViolationRecorded, Audience::Admins) => Some(NotificationMessage {
            subject: format!("Violation recorded: {}", event.category),
            body: format!(
                "A violation was recorded.\n\n\
                 Student: {}\nClass: {}\nCategory: {}\nNote: {}\n\
                 Reference: {}\nRecorded at: {}\n",
                event.reporter_name,
                event.class_name,
                event.category,
                event.detail,
                event.record_id,
                event.occurred_at.to_rfc3339(),
            ),
        }),
        (EventKind::StatusChanged, Audience::Admins)
        | (EventKind::ViolationRecorded, Audience::Submitter) => None,
    }
}
