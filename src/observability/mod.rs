//! Observability infrastructure for the Graph client.
//!
//! Provides tracing spans and log redaction. The crate only emits `tracing`
//! events; installing a subscriber is left to the host application.

pub mod logging;
pub mod tracing_utils;

pub use logging::*;
pub use tracing_utils::*;
