//! Showcase application state
//!
//! Owns the phase flag, the set of expanded messages and the sequencer.
//! The phase gates what the user may do next:
//!
//! ```text
//! idle ─start─▶ running ─run ends─▶ done ─accept─▶ uploading ─timer─▶ uploaded
//!   ▲                                                                    │
//!   └──────────────────────────── replay (from any phase) ◀─────────────┘
//! ```

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info};

use super::render;
use crate::errors::PlaybackError;
use crate::runner::{ChatMessage, RunHandle, RunOutcome, Sequencer};

/// Default number of bullets shown per collapsed message.
pub const DEFAULT_COLLAPSED_BULLETS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AppPhase {
    #[default]
    Idle,
    Running,
    Done,
    Uploading,
    Uploaded,
}

impl AppPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Running => "running",
            Self::Done => "done",
            Self::Uploading => "uploading",
            Self::Uploaded => "uploaded",
        }
    }
}

impl fmt::Display for AppPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

struct AppInner {
    sequencer: Sequencer,
    phase: watch::Sender<AppPhase>,
    expanded: Mutex<HashSet<String>>,
    /// Bumped by every accept and replay; a late upload timer only lands
    /// while its epoch is current.
    upload_epoch: AtomicU64,
    collapsed_bullets: usize,
    expand_all: bool,
}

/// The presentation-side controller. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct ShowcaseApp {
    inner: Arc<AppInner>,
}

impl ShowcaseApp {
    pub fn new(sequencer: Sequencer) -> Self {
        Self::with_collapse(sequencer, DEFAULT_COLLAPSED_BULLETS, false)
    }

    pub fn with_collapse(sequencer: Sequencer, collapsed_bullets: usize, expand_all: bool) -> Self {
        let (phase, _) = watch::channel(AppPhase::Idle);
        Self {
            inner: Arc::new(AppInner {
                sequencer,
                phase,
                expanded: Mutex::new(HashSet::new()),
                upload_epoch: AtomicU64::new(0),
                collapsed_bullets: collapsed_bullets.max(1),
                expand_all,
            }),
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.inner.sequencer
    }

    pub fn phase(&self) -> AppPhase {
        *self.inner.phase.borrow()
    }

    pub fn subscribe_phase(&self) -> watch::Receiver<AppPhase> {
        self.inner.phase.subscribe()
    }

    /// Set the phase to `to` if it currently is `from`.
    fn transition(&self, from: AppPhase, to: AppPhase) -> bool {
        let moved = self.inner.phase.send_if_modified(|phase| {
            if *phase != from {
                return false;
            }
            *phase = to;
            true
        });
        if moved {
            info!(from = from.as_str(), to = to.as_str(), "Phase changed");
        }
        moved
    }

    /// Start a run if the app is idle. Returns `None` in any other phase.
    pub fn begin_run(&self) -> Option<RunHandle> {
        if !self.transition(AppPhase::Idle, AppPhase::Running) {
            debug!(phase = self.phase().as_str(), "Start ignored");
            return None;
        }
        Some(self.inner.sequencer.start())
    }

    /// Record how a run ended. Only a completed run that is still current
    /// moves `running → done`.
    pub fn complete_run(&self, outcome: &RunOutcome) -> bool {
        match outcome {
            RunOutcome::Completed { generation, .. }
                if self.inner.sequencer.is_current(*generation) =>
            {
                self.transition(AppPhase::Running, AppPhase::Done)
            }
            _ => false,
        }
    }

    /// Start a run and wait for it. Returns `Ok(None)` when the app was not
    /// idle.
    pub async fn handle_start(&self) -> Result<Option<RunOutcome>, PlaybackError> {
        let Some(handle) = self.begin_run() else {
            return Ok(None);
        };
        let outcome = handle.finished().await?;
        self.complete_run(&outcome);
        Ok(Some(outcome))
    }

    /// Back to an empty idle screen from any phase.
    pub fn handle_replay(&self) {
        self.inner.upload_epoch.fetch_add(1, Ordering::AcqRel);
        self.inner.phase.send_if_modified(|phase| {
            let changed = *phase != AppPhase::Idle;
            *phase = AppPhase::Idle;
            changed
        });
        self.inner.expanded.lock().clear();
        self.inner.sequencer.reset();
        info!("Replay requested");
    }

    /// Accept the generated document: `done → uploading`, then after the
    /// upload delay `uploading → uploaded`. Returns whether the upload
    /// finished. Ignored outside `done`.
    pub async fn handle_accept(&self) -> bool {
        if !self.transition(AppPhase::Done, AppPhase::Uploading) {
            debug!(phase = self.phase().as_str(), "Accept ignored");
            return false;
        }
        let epoch = self.inner.upload_epoch.fetch_add(1, Ordering::AcqRel) + 1;

        tokio::time::sleep(self.upload_delay()).await;

        if self.inner.upload_epoch.load(Ordering::Acquire) != epoch {
            debug!("Upload timer fired after replay");
            return false;
        }
        self.transition(AppPhase::Uploading, AppPhase::Uploaded)
    }

    pub fn upload_delay(&self) -> Duration {
        self.inner.sequencer.timing().upload
    }

    /// Flip the expanded state of a message. Returns the new state.
    pub fn toggle_expanded(&self, id: &str) -> bool {
        let mut expanded = self.inner.expanded.lock();
        if expanded.remove(id) {
            false
        } else {
            expanded.insert(id.to_string());
            true
        }
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.inner.expand_all || self.inner.expanded.lock().contains(id)
    }

    pub fn collapsed_bullets(&self) -> usize {
        self.inner.collapsed_bullets
    }

    /// Bullets of `message` currently on screen.
    pub fn visible_limit(&self, message: &ChatMessage) -> usize {
        render::shown_bullets(
            message,
            self.is_expanded(&message.id),
            self.inner.collapsed_bullets,
        )
    }

    /// Bullets hidden behind the "more" hint.
    pub fn hidden_count(&self, message: &ChatMessage) -> usize {
        render::hidden_bullets(
            message,
            self.is_expanded(&message.id),
            self.inner.collapsed_bullets,
        )
    }
}
