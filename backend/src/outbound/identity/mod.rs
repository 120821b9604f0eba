//! Identity provider outbound adapters.
//!
//! This module provides a thin HTTP implementation of the `IdentityOracle`
//! port.

mod dto;
mod http_oracle;

pub use http_oracle::HttpIdentityOracle;
