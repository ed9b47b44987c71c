//! Observability module
//!
//! Structured logging setup and playback tracing helpers.

pub mod telemetry;
