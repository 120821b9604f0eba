//! Outbound adapters implementing the domain's driven ports.
//!
//! - [`persistence`]: PostgreSQL repositories via Diesel.
//! - [`identity`]: the identity provider's admin API.
//! - [`mail`]: the transactional mail API.

pub mod identity;
pub mod mail;
pub mod persistence;
