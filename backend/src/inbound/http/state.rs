//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::ports::{
    AdminAuthorizer, ComplaintCommand, ComplaintQuery, ComplaintRepository, EventNotifier,
    IdentityOracle, LoginService, MailTransport, NotificationConfigRepository,
    NotificationSettings, ViolationCommand, ViolationQuery, ViolationRepository,
};
use crate::domain::{
    AdminLoginService, AuthGate, ComplaintService, NotificationDispatcher,
    NotificationSettingsService, ViolationService,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub authorizer: Arc<dyn AdminAuthorizer>,
    pub login: Arc<dyn LoginService>,
    pub complaints: Arc<dyn ComplaintCommand>,
    pub complaints_query: Arc<dyn ComplaintQuery>,
    pub violations: Arc<dyn ViolationCommand>,
    pub violations_query: Arc<dyn ViolationQuery>,
    pub notification_settings: Arc<dyn NotificationSettings>,
}

/// Driven adapters the domain services are built over.
pub struct DrivenAdapters {
    pub identity: Arc<dyn IdentityOracle>,
    pub complaints: Arc<dyn ComplaintRepository>,
    pub violations: Arc<dyn ViolationRepository>,
    pub notification_config: Arc<dyn NotificationConfigRepository>,
    pub mail: Arc<dyn MailTransport>,
    /// Upper bound for one notification send.
    pub send_timeout: Duration,
}

impl HttpState {
    /// Build every domain service over `adapters`.
    ///
    /// Complaint and violation services share one dispatcher.
    #[must_use]
    pub fn from_adapters(adapters: DrivenAdapters) -> Self {
        let DrivenAdapters {
            identity,
            complaints,
            violations,
            notification_config,
            mail,
            send_timeout,
        } = adapters;

        let notifier: Arc<dyn EventNotifier> = Arc::new(
            NotificationDispatcher::new(Arc::clone(&notification_config), mail)
                .with_send_timeout(send_timeout),
        );
        let complaint_service = Arc::new(ComplaintService::new(complaints, Arc::clone(&notifier)));
        let violation_service = Arc::new(ViolationService::new(violations, notifier));

        Self {
            authorizer: Arc::new(AuthGate::new(Arc::clone(&identity))),
            login: Arc::new(AdminLoginService::new(identity)),
            complaints: complaint_service.clone(),
            complaints_query: complaint_service,
            violations: violation_service.clone(),
            violations_query: violation_service,
            notification_settings: Arc::new(NotificationSettingsService::new(
                notification_config,
            )),
        }
    }
}
