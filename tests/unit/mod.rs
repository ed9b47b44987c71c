//! Unit tests for agent-showcase modules
//!
//! These tests cover the public API of each component without a terminal.

mod test_app;
mod test_config;
mod test_content;
mod test_errors;
mod test_sequencer;
mod test_timing;
