//! Mail outbound adapters.

mod http_transport;

pub use http_transport::HttpMailTransport;
