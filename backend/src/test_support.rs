//! In-memory adapters for integration tests.
//!
//! Compiled with the `test-support` feature. Every double implements a
//! driven port with the same observable semantics as the production adapter,
//! so tests can drive the full HTTP stack without a database, an identity
//! provider or a mail API.

use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::ports::{
    ComplaintRepository, ComplaintRepositoryError, IdentityOracle, IdentityOracleError,
    MailTransport, MailTransportError, NotificationConfigRepository,
    NotificationConfigRepositoryError, ViolationRepository, ViolationRepositoryError,
};
use crate::domain::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintStatus, IdToken, IdentityClaims,
    NotificationConfig, OutboundEmail, SessionCredential, StatusCount, Violation, ViolationDraft,
    ViolationId,
};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Complaint store backed by a vector.
#[derive(Default)]
pub struct InMemoryComplaintRepository {
    rows: Mutex<Vec<Complaint>>,
}

impl InMemoryComplaintRepository {
    /// Insert a complaint with a chosen timestamp.
    pub fn seed(&self, complaint: Complaint) {
        lock(&self.rows).push(complaint);
    }

    /// Snapshot of the stored complaints in insertion order.
    #[must_use]
    pub fn all(&self) -> Vec<Complaint> {
        lock(&self.rows).clone()
    }
}

#[async_trait]
impl ComplaintRepository for InMemoryComplaintRepository {
    async fn insert(&self, draft: &ComplaintDraft) -> Result<Complaint, ComplaintRepositoryError> {
        let complaint = Complaint {
            id: ComplaintId::from_uuid(Uuid::new_v4()),
            reporter_name: draft.reporter_name().to_owned(),
            class_name: draft.class_name().to_owned(),
            category: draft.category().to_owned(),
            detail: draft.detail().to_owned(),
            reporter_email: draft.reporter_email().cloned(),
            status: ComplaintStatus::New,
            created_at: Utc::now(),
        };
        lock(&self.rows).push(complaint.clone());
        Ok(complaint)
    }

    async fn list_newest_first(&self) -> Result<Vec<Complaint>, ComplaintRepositoryError> {
        let mut rows = self.all();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn update_status(
        &self,
        id: &ComplaintId,
        status: &ComplaintStatus,
    ) -> Result<Option<Complaint>, ComplaintRepositoryError> {
        let mut rows = lock(&self.rows);
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            row.status = status.clone();
            row.clone()
        }))
    }

    async fn delete(&self, id: &ComplaintId) -> Result<bool, ComplaintRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.id != *id);
        Ok(rows.len() < before)
    }

    async fn status_counts(&self) -> Result<Vec<StatusCount>, ComplaintRepositoryError> {
        let mut counts: Vec<StatusCount> = Vec::new();
        for row in lock(&self.rows).iter() {
            match counts.iter_mut().find(|entry| entry.status == row.status) {
                Some(entry) => entry.count += 1,
                None => counts.push(StatusCount {
                    status: row.status.clone(),
                    count: 1,
                }),
            }
        }
        counts.sort_by(|a, b| a.status.as_str().cmp(b.status.as_str()));
        Ok(counts)
    }

    async fn created_since(
        &self,
        since: DateTime<Utc>,
    ) -> Result<Vec<DateTime<Utc>>, ComplaintRepositoryError> {
        let mut stamps: Vec<_> = lock(&self.rows)
            .iter()
            .map(|row| row.created_at)
            .filter(|created| *created >= since)
            .collect();
        stamps.sort();
        Ok(stamps)
    }
}

/// Violation store backed by a vector.
#[derive(Default)]
pub struct InMemoryViolationRepository {
    rows: Mutex<Vec<Violation>>,
}

#[async_trait]
impl ViolationRepository for InMemoryViolationRepository {
    async fn insert(&self, draft: &ViolationDraft) -> Result<Violation, ViolationRepositoryError> {
        let violation = Violation {
            id: ViolationId::from_uuid(Uuid::new_v4()),
            student_name: draft.student_name().to_owned(),
            class_name: draft.class_name().to_owned(),
            category: draft.category().to_owned(),
            note: draft.note().to_owned(),
            created_at: Utc::now(),
        };
        lock(&self.rows).push(violation.clone());
        Ok(violation)
    }

    async fn list_newest_first(&self) -> Result<Vec<Violation>, ViolationRepositoryError> {
        let mut rows = lock(&self.rows).clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn replace(
        &self,
        id: &ViolationId,
        draft: &ViolationDraft,
    ) -> Result<Option<Violation>, ViolationRepositoryError> {
        let mut rows = lock(&self.rows);
        Ok(rows.iter_mut().find(|row| row.id == *id).map(|row| {
            draft.student_name().clone_into(&mut row.student_name);
            draft.class_name().clone_into(&mut row.class_name);
            draft.category().clone_into(&mut row.category);
            draft.note().clone_into(&mut row.note);
            row.clone()
        }))
    }

    async fn delete(&self, id: &ViolationId) -> Result<bool, ViolationRepositoryError> {
        let mut rows = lock(&self.rows);
        let before = rows.len();
        rows.retain(|row| row.id != *id);
        Ok(rows.len() < before)
    }
}

/// Notification configuration singleton held in memory.
///
/// [`InMemoryNotificationConfigRepository::unavailable`] builds a store whose
/// every call fails with a connection error.
#[derive(Default)]
pub struct InMemoryNotificationConfigRepository {
    config: Mutex<Option<NotificationConfig>>,
    unavailable: bool,
}

impl InMemoryNotificationConfigRepository {
    /// Store pre-populated with `config`.
    #[must_use]
    pub fn with_config(config: NotificationConfig) -> Self {
        Self {
            config: Mutex::new(Some(config)),
            unavailable: false,
        }
    }

    /// Store that refuses every call.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            config: Mutex::new(None),
            unavailable: true,
        }
    }
}

#[async_trait]
impl NotificationConfigRepository for InMemoryNotificationConfigRepository {
    async fn load(&self) -> Result<Option<NotificationConfig>, NotificationConfigRepositoryError> {
        if self.unavailable {
            return Err(NotificationConfigRepositoryError::connection(
                "config store offline",
            ));
        }
        Ok(lock(&self.config).clone())
    }

    async fn upsert(
        &self,
        config: &NotificationConfig,
    ) -> Result<(), NotificationConfigRepositoryError> {
        if self.unavailable {
            return Err(NotificationConfigRepositoryError::connection(
                "config store offline",
            ));
        }
        *lock(&self.config) = Some(config.clone());
        Ok(())
    }
}

/// Mail transport that records every message and fails for chosen recipients.
#[derive(Default)]
pub struct RecordingMailTransport {
    sent: Mutex<Vec<OutboundEmail>>,
    failing: HashSet<String>,
    delay: Option<Duration>,
}

impl RecordingMailTransport {
    /// Transport rejecting every message addressed to one of `recipients`.
    pub fn failing_for<'a>(recipients: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            failing: recipients.into_iter().map(str::to_owned).collect(),
            ..Self::default()
        }
    }

    /// Delay every send by `delay` before answering.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every message handed to the transport, including rejected ones.
    #[must_use]
    pub fn sent(&self) -> Vec<OutboundEmail> {
        lock(&self.sent).clone()
    }

    /// Sorted recipient addresses of every attempted send.
    #[must_use]
    pub fn recipients(&self) -> Vec<String> {
        let mut recipients: Vec<String> = lock(&self.sent)
            .iter()
            .map(|email| email.to.as_str().to_owned())
            .collect();
        recipients.sort();
        recipients
    }
}

#[async_trait]
impl MailTransport for RecordingMailTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        lock(&self.sent).push(email.clone());
        if self.failing.contains(email.to.as_str()) {
            return Err(MailTransportError::rejected(
                550_u16,
                format!("mailbox {} unavailable", email.to),
            ));
        }
        Ok(())
    }
}

/// Identity provider double keyed by credential string.
///
/// Session credentials and ID tokens resolve through the same table.
/// Minted session credentials are `session:<id token>` and resolve to the
/// token's claims. Revoked credentials answer with
/// [`IdentityOracleError::Revoked`].
#[derive(Default)]
pub struct StubIdentityOracle {
    claims: Mutex<HashMap<String, IdentityClaims>>,
    revoked: Mutex<HashSet<String>>,
}

impl StubIdentityOracle {
    /// Register `claims` for `credential`.
    #[must_use]
    pub fn with_claims(self, credential: &str, claims: IdentityClaims) -> Self {
        lock(&self.claims).insert(credential.to_owned(), claims);
        self
    }

    /// Revoke a credential after issuance.
    pub fn revoke(&self, credential: &str) {
        lock(&self.revoked).insert(credential.to_owned());
    }

    fn resolve(&self, raw: &str) -> Result<IdentityClaims, IdentityOracleError> {
        if lock(&self.revoked).contains(raw) {
            return Err(IdentityOracleError::Revoked);
        }
        lock(&self.claims)
            .get(raw)
            .cloned()
            .ok_or_else(|| IdentityOracleError::invalid("unknown credential"))
    }
}

/// Claims for a verified admin.
#[must_use]
pub fn admin_claims(uid: &str) -> IdentityClaims {
    IdentityClaims {
        uid: uid.to_owned(),
        email: Some(format!("{uid}@school.id")),
        email_verified: true,
        admin: true,
    }
}

/// Claims for a verified account without the admin privilege.
#[must_use]
pub fn staff_claims(uid: &str) -> IdentityClaims {
    IdentityClaims {
        admin: false,
        ..admin_claims(uid)
    }
}

#[async_trait]
impl IdentityOracle for StubIdentityOracle {
    async fn verify_session_credential(
        &self,
        credential: &SessionCredential,
        _check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityOracleError> {
        self.resolve(credential.expose())
    }

    async fn verify_id_token(
        &self,
        token: &IdToken,
        _check_revoked: bool,
    ) -> Result<IdentityClaims, IdentityOracleError> {
        self.resolve(token.expose())
    }

    async fn create_session_credential(
        &self,
        token: &IdToken,
        _ttl: Duration,
    ) -> Result<SessionCredential, IdentityOracleError> {
        let claims = self.resolve(token.expose())?;
        let minted = format!("session:{}", token.expose());
        lock(&self.claims).insert(minted.clone(), claims);
        Ok(SessionCredential::new(minted))
    }
}
