//! Tests for notification dispatch policy and failure isolation.

use std::sync::Mutex;

use chrono::Utc;
use mockall::predicate::always;
use rstest::{fixture, rstest};
use uuid::Uuid;

use super::*;
use crate::domain::ComplaintStatus;
use crate::domain::NotificationConfig;
use crate::domain::ports::{
    MockMailTransport, MockNotificationConfigRepository, NotificationConfigRepositoryError,
};

fn email(raw: &str) -> EmailAddress {
    EmailAddress::parse(raw).expect("valid email")
}

#[fixture]
fn complaint_event() -> DomainEvent {
    DomainEvent {
        record_id: Uuid::new_v4(),
        reporter_name: "Rina".to_owned(),
        class_name: "XI IPA 2".to_owned(),
        category: "Bullying".to_owned(),
        detail: "Teased at lunch".to_owned(),
        recipient_email: Some(email("rina@school.id")),
        status: Some(ComplaintStatus::New),
        occurred_at: Utc::now(),
    }
}

fn config_repo(config: Option<NotificationConfig>) -> MockNotificationConfigRepository {
    let mut repo = MockNotificationConfigRepository::new();
    repo.expect_load().returning(move || Ok(config.clone()));
    repo
}

fn admins(recipients: &[&str], on_complaint: bool, on_violation: bool) -> NotificationConfig {
    NotificationConfig::new(
        recipients.iter().map(|raw| email(raw)),
        on_complaint,
        on_violation,
    )
}

/// Transport recording every recipient and failing for a chosen set.
#[derive(Default)]
struct RecordingTransport {
    sent: Mutex<Vec<String>>,
    failing: Vec<String>,
}

impl RecordingTransport {
    fn failing_for(recipients: &[&str]) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            failing: recipients.iter().map(|r| (*r).to_owned()).collect(),
        }
    }

    fn recipients(&self) -> Vec<String> {
        let mut sent = self.sent.lock().expect("sent lock").clone();
        sent.sort();
        sent
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, email: &OutboundEmail) -> Result<(), MailTransportError> {
        let to = email.to.as_str().to_owned();
        self.sent.lock().expect("sent lock").push(to.clone());
        if self.failing.contains(&to) {
            Err(MailTransportError::rejected(422_u16, "mailbox unavailable"))
        } else {
            Ok(())
        }
    }
}

struct StalledTransport;

#[async_trait]
impl MailTransport for StalledTransport {
    async fn send(&self, _email: &OutboundEmail) -> Result<(), MailTransportError> {
        tokio::time::sleep(Duration::from_secs(30)).await;
        Ok(())
    }
}

#[rstest]
#[tokio::test]
async fn new_complaint_reaches_admins_and_submitter(complaint_event: DomainEvent) {
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher = NotificationDispatcher::new(
        Arc::new(config_repo(Some(admins(&["a@x", "b@x"], true, false)))),
        Arc::clone(&transport),
    );

    let report = dispatcher
        .dispatch(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(report.attempted, 3);
    assert_eq!(report.delivered, 3);
    assert_eq!(transport.recipients(), vec!["a@x", "b@x", "rina@school.id"]);
}

#[rstest]
#[tokio::test]
async fn new_complaint_without_email_only_notifies_admins(mut complaint_event: DomainEvent) {
    complaint_event.recipient_email = None;
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher = NotificationDispatcher::new(
        Arc::new(config_repo(Some(admins(&["a@x"], true, false)))),
        Arc::clone(&transport),
    );

    let report = dispatcher
        .dispatch(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(report.attempted, 1);
    assert_eq!(transport.recipients(), vec!["a@x"]);
}

#[rstest]
#[case::missing_config(None)]
#[case::flag_disabled(Some(admins(&["a@x"], false, true)))]
#[case::no_recipients(Some(admins(&[], true, true)))]
#[tokio::test]
async fn admin_fan_out_is_skipped_without_enabled_config(
    complaint_event: DomainEvent,
    #[case] config: Option<NotificationConfig>,
) {
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher =
        NotificationDispatcher::new(Arc::new(config_repo(config)), Arc::clone(&transport));

    let report = dispatcher
        .dispatch(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(report.attempted, 1, "only the submitter confirmation");
    assert_eq!(transport.recipients(), vec!["rina@school.id"]);
}

#[rstest]
#[tokio::test]
async fn config_store_failure_still_sends_confirmation(complaint_event: DomainEvent) {
    let mut repo = MockNotificationConfigRepository::new();
    repo.expect_load()
        .times(1)
        .return_once(|| Err(NotificationConfigRepositoryError::connection("refused")));
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher = NotificationDispatcher::new(Arc::new(repo), Arc::clone(&transport));

    let report = dispatcher
        .dispatch(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(report.delivered, 1);
    assert_eq!(transport.recipients(), vec!["rina@school.id"]);
}

#[rstest]
#[tokio::test]
async fn one_failed_recipient_does_not_abort_siblings(mut complaint_event: DomainEvent) {
    complaint_event.recipient_email = None;
    let transport = Arc::new(RecordingTransport::failing_for(&["b@x"]));
    let dispatcher = NotificationDispatcher::new(
        Arc::new(config_repo(Some(admins(&["a@x", "b@x", "c@x"], true, false)))),
        Arc::clone(&transport),
    );

    let report = dispatcher
        .dispatch(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(
        report,
        DispatchReport {
            attempted: 3,
            delivered: 2,
            failed: 1,
        }
    );
    assert_eq!(transport.recipients(), vec!["a@x", "b@x", "c@x"]);
}

#[rstest]
#[case(ComplaintStatus::InReview, 1)]
#[case(ComplaintStatus::Resolved, 1)]
#[case(ComplaintStatus::New, 0)]
#[case(ComplaintStatus::Other("Ditolak".to_owned()), 0)]
#[tokio::test]
async fn status_change_notifies_submitter_per_policy(
    mut complaint_event: DomainEvent,
    #[case] status: ComplaintStatus,
    #[case] expected_sends: usize,
) {
    complaint_event.status = Some(status);
    let mut repo = MockNotificationConfigRepository::new();
    repo.expect_load().never();
    let mut transport = MockMailTransport::new();
    transport
        .expect_send()
        .with(always())
        .times(expected_sends)
        .returning(|email| {
            assert_eq!(email.to.as_str(), "rina@school.id");
            Ok(())
        });
    let dispatcher = NotificationDispatcher::new(Arc::new(repo), Arc::new(transport));

    let report = dispatcher
        .dispatch(EventKind::StatusChanged, &complaint_event)
        .await;

    assert_eq!(report.attempted, expected_sends);
}

#[rstest]
#[tokio::test]
async fn status_change_without_email_sends_nothing(mut complaint_event: DomainEvent) {
    complaint_event.recipient_email = None;
    complaint_event.status = Some(ComplaintStatus::Resolved);
    let mut transport = MockMailTransport::new();
    transport.expect_send().never();
    let dispatcher = NotificationDispatcher::new(
        Arc::new(MockNotificationConfigRepository::new()),
        Arc::new(transport),
    );

    let report = dispatcher
        .dispatch(EventKind::StatusChanged, &complaint_event)
        .await;

    assert_eq!(report, DispatchReport::default());
}

#[rstest]
#[case(true, 2)]
#[case(false, 0)]
#[tokio::test]
async fn violation_notifies_admins_when_enabled(
    complaint_event: DomainEvent,
    #[case] enabled: bool,
    #[case] expected_sends: usize,
) {
    let transport = Arc::new(RecordingTransport::default());
    let dispatcher = NotificationDispatcher::new(
        Arc::new(config_repo(Some(admins(&["a@x", "b@x"], false, enabled)))),
        Arc::clone(&transport),
    );

    let report = dispatcher
        .dispatch(EventKind::ViolationRecorded, &complaint_event)
        .await;

    assert_eq!(report.attempted, expected_sends);
    assert!(!transport.recipients().contains(&"rina@school.id".to_owned()));
}

#[rstest]
#[tokio::test]
async fn stalled_send_times_out_as_failure(mut complaint_event: DomainEvent) {
    complaint_event.recipient_email = None;
    let dispatcher = NotificationDispatcher::new(
        Arc::new(config_repo(Some(admins(&["a@x"], true, false)))),
        Arc::new(StalledTransport),
    )
    .with_send_timeout(Duration::from_millis(20));

    let report = dispatcher
        .dispatch(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(report.failed, 1);
    assert_eq!(report.delivered, 0);
}

#[rstest]
#[tokio::test]
async fn dispatcher_serves_as_event_notifier(complaint_event: DomainEvent) {
    let transport = Arc::new(RecordingTransport::default());
    let notifier: Arc<dyn EventNotifier> = Arc::new(NotificationDispatcher::new(
        Arc::new(config_repo(None)),
        Arc::clone(&transport),
    ));

    let report = notifier
        .notify(EventKind::NewComplaint, &complaint_event)
        .await;

    assert_eq!(report.delivered, 1);
}
