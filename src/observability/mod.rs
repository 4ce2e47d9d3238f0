//! Observability.
//!
//! Logging infrastructure for monitoring match sessions and the HTTP
//! server.

pub mod logging;

pub use logging::{LogFormat, init_logging};
