//! Playback runner
//!
//! The timeline driver behind the demo: message model, timing and the
//! sequencer that advances a run over time.

pub mod message;
mod sequencer;
pub mod timing;

pub use message::{ChatMessage, MessageKind, MessageStatus, RunnerState, USER_MESSAGE_ID};
pub use sequencer::{PlaybackEvent, RunCanceller, RunHandle, RunOutcome, Sequencer};
pub use timing::{bullet_duration_ms, Schedule, StepSchedule, Timing};
