//! PostgreSQL persistence adapters using Diesel.
//!
//! Repositories only translate between Diesel rows and domain types. Row
//! structs and the schema stay private to this module; every database error
//! is mapped onto the owning port's error type.

mod diesel_complaint_repository;
mod diesel_notification_config_repository;
mod diesel_violation_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_complaint_repository::DieselComplaintRepository;
pub use diesel_notification_config_repository::DieselNotificationConfigRepository;
pub use diesel_violation_repository::DieselViolationRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
