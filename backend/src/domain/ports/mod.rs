//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`, [`LoginService`],
//! [`NotificationSettings`], [`AdminAuthorizer`]) are called by inbound
//! adapters. Driven ports (repositories, [`IdentityOracle`],
//! [`MailTransport`], [`EventNotifier`]) are implemented by outbound adapters
//! or by domain services.

mod macros;
pub(crate) use macros::define_port_error;

mod admin_authorizer;
mod complaint_command;
mod complaint_query;
mod complaint_repository;
mod event_notifier;
mod identity_oracle;
mod login_service;
mod mail_transport;
mod notification_config_repository;
mod notification_settings;
mod violation_command;
mod violation_query;
mod violation_repository;

pub use admin_authorizer::AdminAuthorizer;
#[cfg(test)]
pub use admin_authorizer::MockAdminAuthorizer;
pub use complaint_command::ComplaintCommand;
#[cfg(test)]
pub use complaint_command::MockComplaintCommand;
#[cfg(test)]
pub use complaint_query::MockComplaintQuery;
pub use complaint_query::ComplaintQuery;
#[cfg(test)]
pub use complaint_repository::MockComplaintRepository;
pub use complaint_repository::{ComplaintRepository, ComplaintRepositoryError};
#[cfg(test)]
pub use event_notifier::MockEventNotifier;
pub use event_notifier::{EventNotifier, NoOpEventNotifier};
#[cfg(test)]
pub use identity_oracle::MockIdentityOracle;
pub use identity_oracle::{IdentityOracle, IdentityOracleError};
#[cfg(test)]
pub use login_service::MockLoginService;
pub use login_service::{LoginService, SessionGrant};
#[cfg(test)]
pub use mail_transport::MockMailTransport;
pub use mail_transport::{MailTransport, MailTransportError};
#[cfg(test)]
pub use notification_config_repository::MockNotificationConfigRepository;
pub use notification_config_repository::{
    NotificationConfigRepository, NotificationConfigRepositoryError,
};
#[cfg(test)]
pub use notification_settings::MockNotificationSettings;
pub use notification_settings::NotificationSettings;
#[cfg(test)]
pub use violation_command::MockViolationCommand;
pub use violation_command::ViolationCommand;
#[cfg(test)]
pub use violation_query::MockViolationQuery;
pub use violation_query::ViolationQuery;
#[cfg(test)]
pub use violation_repository::MockViolationRepository;
pub use violation_repository::{ViolationRepository, ViolationRepositoryError};
