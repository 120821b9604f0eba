//! Internal Diesel row structs.
//!
//! These never leave the persistence layer; repositories convert them into
//! domain types.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use super::schema::{complaints, notification_settings, violations};

/// Fixed key of the notification configuration row.
pub(crate) const NOTIFICATION_SETTINGS_ID: i16 = 1;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = complaints)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ComplaintRow {
    pub id: Uuid,
    pub reporter_name: String,
    pub class_name: String,
    pub category: String,
    pub detail: String,
    pub reporter_email: Option<String>,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = complaints)]
pub(crate) struct NewComplaintRow<'a> {
    pub id: Uuid,
    pub reporter_name: &'a str,
    pub class_name: &'a str,
    pub category: &'a str,
    pub detail: &'a str,
    pub reporter_email: Option<&'a str>,
    pub status: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = violations)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ViolationRow {
    pub id: Uuid,
    pub student_name: String,
    pub class_name: String,
    pub category: String,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = violations)]
pub(crate) struct NewViolationRow<'a> {
    pub id: Uuid,
    pub student_name: &'a str,
    pub class_name: &'a str,
    pub category: &'a str,
    pub note: &'a str,
}

/// Editable violation fields; `created_at` is never rewritten.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = violations)]
pub(crate) struct ViolationUpdate<'a> {
    pub student_name: &'a str,
    pub class_name: &'a str,
    pub category: &'a str,
    pub note: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = notification_settings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct NotificationSettingsRow {
    pub recipients: Vec<String>,
    pub notify_on_complaint: bool,
    pub notify_on_violation: bool,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = notification_settings)]
pub(crate) struct NotificationSettingsUpsert {
    pub id: i16,
    pub recipients: Vec<String>,
    pub notify_on_complaint: bool,
    pub notify_on_violation: bool,
    pub updated_at: DateTime<Utc>,
}
