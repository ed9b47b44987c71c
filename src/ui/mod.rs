//! Presentation layer
//!
//! Application phase handling, transcript rendering and the terminal
//! frontend that follows the sequencer.

pub mod app;
pub mod render;
pub mod spinner;
pub mod style;
pub mod terminal;
pub mod theme;

pub use app::{AppPhase, ShowcaseApp};
pub use terminal::{play, Frontend, FrontendOptions, PlayFormat, PlaySummary};
