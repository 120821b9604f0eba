//! Request middleware.
//!
//! Currently only request tracing; the admin gate is an extractor in
//! `inbound::http::admin`.

pub mod trace;

pub use trace::Trace;
