//! Agent Showcase - Scripted agentic AI playback
//!
//! A terminal demo of an AI agent working through a consulting task. Nothing
//! is computed: a fixed script of steps is played back over time, each agent
//! message moving through `thinking → processing → streaming → done` while
//! its bullets are revealed one by one.
//!
//! - **Content**: the scripted prompt, steps and closing texts
//! - **Runner**: timing and the sequencer that publishes snapshots
//! - **UI**: app phases, rendering and the terminal frontend
//!
//! # Quick Start
//!
//! ```ignore
//! use std::sync::Arc;
//! use agent_showcase::{content, runner::{Sequencer, Timing}};
//!
//! let sequencer = Sequencer::new(Arc::new(content::load()), Timing::default());
//! let outcome = sequencer.run().await?;
//! assert_eq!(sequencer.snapshot().messages.len(), 6);
//! ```

pub mod cli;
pub mod config;
pub mod confirm;
pub mod content;
pub mod errors;
pub mod observability;
mod output;
pub mod runner;
pub mod ui;

pub use config::Config;
pub use content::{AppContent, Step};
pub use errors::{ConfigError, PlaybackError, ShowcaseError};
pub use runner::{RunnerState, Sequencer, Timing};
