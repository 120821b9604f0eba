//! Conduct desk backend library.
//!
//! Hexagonal layout: [`domain`] holds the rules and ports, [`inbound`] the
//! HTTP adapter, [`outbound`] the database, identity and mail adapters.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(feature = "test-support")]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
