//! Domain primitives, services and ports.
//!
//! Purpose: hold the conduct desk's business rules independent of HTTP,
//! persistence and mail delivery. Inbound adapters call the driving ports in
//! [`ports`]; outbound adapters implement the driven ones.
//!
//! Public surface:
//! - [`AuthGate`]: admin authorization for protected routes.
//! - [`NotificationDispatcher`]: best-effort notification fan-out.
//! - [`ComplaintService`], [`ViolationService`],
//!   [`NotificationSettingsService`], [`AdminLoginService`]: use-cases.
//! - [`Error`] and [`ErrorCode`]: transport-agnostic failures.

pub mod admin_login;
pub mod auth_gate;
pub mod complaint;
pub mod complaint_service;
pub mod error;
pub mod notification;
pub mod notification_dispatcher;
pub mod notification_settings_service;
pub mod ports;
pub mod principal;
pub mod trace_id;
pub(crate) mod validation;
pub mod violation;
pub mod violation_service;

pub use self::admin_login::{AdminLoginService, SESSION_TTL};
pub use self::auth_gate::{
    API_PATH_PREFIX, AuthDecision, AuthGate, DenialOutcome, DenyReason, LOGIN_PATH,
    RequestSurface,
};
pub use self::complaint::{
    Complaint, ComplaintDraft, ComplaintId, ComplaintStats, ComplaintStatus,
    ComplaintValidationError, DailyCount, StatusCount, TREND_WINDOW_DAYS,
};
pub use self::complaint_service::ComplaintService;
pub use self::error::{Error, ErrorCode, ErrorValidationError};
pub use self::notification::{
    Audience, DomainEvent, EmailAddress, EmailValidationError, EventKind, NotificationConfig,
    NotificationMessage, OutboundEmail, render,
};
pub use self::notification_dispatcher::{
    DEFAULT_SEND_TIMEOUT, DispatchReport, NotificationDispatcher,
};
pub use self::notification_settings_service::NotificationSettingsService;
pub use self::principal::{
    IdToken, IdTokenValidationError, IdentityClaims, Principal, SessionCredential,
};
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};
pub use self::validation::MissingFieldError;
pub use self::violation::{Violation, ViolationDraft, ViolationId};
pub use self::violation_service::ViolationService;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use conduct_desk::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::forbidden("nope"))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
