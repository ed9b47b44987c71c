//! Playback Sequencer
//!
//! Walks the scripted steps and moves each agent message through
//! `thinking → processing → streaming → done`, revealing bullets one at a
//! time. Every change is published as a new immutable [`RunnerState`]
//! snapshot on a watch channel, and as a [`PlaybackEvent`] on a broadcast
//! channel.
//!
//! Each `start` and `reset` bumps a run generation. A run captures its
//! generation and re-checks it inside the channel's write lock before every
//! mutation, so a reset can never interleave between check and write. Timers
//! of a superseded run still fire, but their updates are dropped.

use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant};
use tracing::{debug, info, Instrument};

use super::message::{ChatMessage, MessageStatus, RunnerState};
use super::timing::Timing;
use crate::content::AppContent;
use crate::errors::PlaybackError;
use crate::observability::telemetry::{record_stale_update, record_state_transition, run_span};

const EVENT_CAPACITY: usize = 256;

/// An applied change to the timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum PlaybackEvent {
    RunStarted {
        generation: u64,
    },
    MessageAdded {
        generation: u64,
        id: String,
    },
    StatusChanged {
        generation: u64,
        id: String,
        from: MessageStatus,
        to: MessageStatus,
    },
    BulletRevealed {
        generation: u64,
        id: String,
        visible: usize,
    },
    RunFinished {
        generation: u64,
    },
    RunCancelled {
        generation: u64,
    },
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed {
        generation: u64,
        steps: usize,
        elapsed: Duration,
    },
    Cancelled {
        generation: u64,
    },
}

impl RunOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }
}

/// Marker for a continuation whose run is no longer current.
#[derive(Debug)]
struct Superseded;

struct Inner {
    content: Arc<AppContent>,
    timing: Timing,
    state: watch::Sender<Arc<RunnerState>>,
    events: broadcast::Sender<PlaybackEvent>,
    generation: AtomicU64,
}

/// Timeline driver. Cheap to clone; clones share the same timeline.
#[derive(Clone)]
pub struct Sequencer {
    inner: Arc<Inner>,
}

impl Sequencer {
    pub fn new(content: Arc<AppContent>, timing: Timing) -> Self {
        let (state, _) = watch::channel(Arc::new(RunnerState::default()));
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            inner: Arc::new(Inner {
                content,
                timing,
                state,
                events,
                generation: AtomicU64::new(0),
            }),
        }
    }

    pub fn content(&self) -> &AppContent {
        &self.inner.content
    }

    pub fn timing(&self) -> &Timing {
        &self.inner.timing
    }

    /// Latest published snapshot.
    pub fn snapshot(&self) -> Arc<RunnerState> {
        Arc::clone(&self.inner.state.borrow())
    }

    pub fn subscribe(&self) -> watch::Receiver<Arc<RunnerState>> {
        self.inner.state.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<PlaybackEvent> {
        self.inner.events.subscribe()
    }

    pub fn generation(&self) -> u64 {
        self.inner.generation.load(Ordering::Acquire)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Begin a run: publish the user message, then play every step on a
    /// spawned task. Any run still in flight is superseded.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(&self) -> RunHandle {
        let mut generation = 0;
        self.inner.state.send_modify(|state| {
            let previous = self.inner.generation.fetch_add(1, Ordering::AcqRel);
            generation = previous + 1;
            if state.is_running {
                info!(generation = previous, "Run superseded by a new start");
                self.emit(PlaybackEvent::RunCancelled {
                    generation: previous,
                });
            }
            *state = Arc::new(RunnerState {
                messages: vec![ChatMessage::user(&self.inner.content.prompt)],
                is_running: true,
                current_message_index: None,
            });
            self.emit(PlaybackEvent::RunStarted { generation });
        });

        let span = run_span(generation, self.inner.content.steps.len());
        let this = self.clone();
        let task = tokio::spawn(async move { this.play(generation).await }.instrument(span));

        RunHandle {
            generation,
            sequencer: self.clone(),
            task,
        }
    }

    /// Start a run and wait for it to end.
    pub async fn run(&self) -> Result<RunOutcome, PlaybackError> {
        self.start().finished().await
    }

    /// Clear the timeline and invalidate any run in flight.
    pub fn reset(&self) {
        self.inner.state.send_modify(|state| {
            let previous = self.inner.generation.fetch_add(1, Ordering::AcqRel);
            if state.is_running {
                info!(generation = previous, "Run cancelled by reset");
                self.emit(PlaybackEvent::RunCancelled {
                    generation: previous,
                });
            }
            *state = Arc::new(RunnerState::default());
        });
    }

    /// Clear the timeline only if `generation` is still the current run.
    fn cancel_generation(&self, generation: u64) -> bool {
        let mut cancelled = false;
        self.inner.state.send_if_modified(|state| {
            if self
                .inner
                .generation
                .compare_exchange(generation, generation + 1, Ordering::AcqRel, Ordering::Acquire)
                .is_err()
            {
                return false;
            }
            *state = Arc::new(RunnerState::default());
            info!(generation, "Run cancelled");
            self.emit(PlaybackEvent::RunCancelled { generation });
            cancelled = true;
            true
        });
        cancelled
    }

    /// Broadcast `event`. Called while holding the state channel's write
    /// lock, so events arrive in the order their snapshots were published.
    fn emit(&self, event: PlaybackEvent) {
        // No subscribers is fine
        let _ = self.inner.events.send(event);
    }

    /// Apply `mutate` to a copy of the current snapshot and publish it, if
    /// `generation` is still current. `mutate` returns the event describing
    /// the change, or `None` when nothing changed.
    fn apply<F>(&self, generation: u64, what: &str, mutate: F) -> Result<(), Superseded>
    where
        F: FnOnce(&mut RunnerState) -> Option<PlaybackEvent>,
    {
        let mut stale = None;
        let changed = self.inner.state.send_if_modified(|state| {
            let current = self.inner.generation.load(Ordering::Acquire);
            if current != generation {
                stale = Some(current);
                return false;
            }
            let mut next = RunnerState::clone(state);
            let Some(event) = mutate(&mut next) else {
                return false;
            };
            *state = Arc::new(next);
            self.emit(event);
            true
        });

        if let Some(current) = stale {
            record_stale_update(generation, current, what);
            return Err(Superseded);
        }
        if !changed {
            debug!(update = what, "Update left the timeline unchanged");
        }
        Ok(())
    }

    fn advance(&self, generation: u64, id: &str, to: MessageStatus) -> Result<(), Superseded> {
        self.apply(generation, to.as_str(), |state| {
            let mut from = None;
            state.update_message(id, |message| {
                let before = message.status;
                let moved = message.advance(to);
                if moved {
                    from = Some(before);
                }
                moved
            });
            from.map(|from| {
                record_state_transition(id, from.as_str(), to.as_str());
                PlaybackEvent::StatusChanged {
                    generation,
                    id: id.to_string(),
                    from,
                    to,
                }
            })
        })
    }

    fn reveal(&self, generation: u64, id: &str, count: usize) -> Result<(), Superseded> {
        self.apply(generation, "reveal", |state| {
            let mut visible = None;
            state.update_message(id, |message| {
                let revealed = message.reveal(count);
                if revealed {
                    visible = Some(message.visible_bullets);
                }
                revealed
            });
            visible.map(|visible| PlaybackEvent::BulletRevealed {
                generation,
                id: id.to_string(),
                visible,
            })
        })
    }

    async fn pause(&self, generation: u64, duration: Duration) -> Result<(), Superseded> {
        sleep(duration).await;
        if self.is_current(generation) {
            Ok(())
        } else {
            Err(Superseded)
        }
    }

    async fn play(self, generation: u64) -> RunOutcome {
        let started = Instant::now();
        match self.play_steps(generation).await {
            Ok(steps) => {
                let elapsed = started.elapsed();
                info!(steps, elapsed_ms = elapsed.as_millis() as u64, "Run finished");
                RunOutcome::Completed {
                    generation,
                    steps,
                    elapsed,
                }
            }
            Err(Superseded) => {
                debug!("Run stopped after being superseded");
                RunOutcome::Cancelled { generation }
            }
        }
    }

    async fn play_steps(&self, generation: u64) -> Result<usize, Superseded> {
        let content = Arc::clone(&self.inner.content);
        let timing = &self.inner.timing;

        self.pause(generation, timing.settle).await?;

        for (index, step) in content.steps.iter().enumerate() {
            let id = ChatMessage::agent_id(index);

            self.apply(generation, "append", |state| {
                state.messages.push(ChatMessage::agent(index, step));
                state.current_message_index = Some(index);
                Some(PlaybackEvent::MessageAdded {
                    generation,
                    id: id.clone(),
                })
            })?;
            debug!(step = index, title = step.title.as_str(), "Step started");

            self.pause(generation, timing.thinking).await?;
            self.advance(generation, &id, MessageStatus::Processing)?;

            self.pause(generation, timing.processing).await?;
            self.advance(generation, &id, MessageStatus::Streaming)?;

            for (j, bullet) in step.bullets.iter().enumerate() {
                self.reveal(generation, &id, j + 1)?;
                self.pause(generation, timing.bullet_duration(bullet)).await?;
            }

            self.pause(generation, timing.step_delay(index)).await?;
            self.advance(generation, &id, MessageStatus::Done)?;

            self.pause(generation, timing.breathe).await?;
        }

        self.apply(generation, "finish", |state| {
            state.is_running = false;
            state.current_message_index = None;
            Some(PlaybackEvent::RunFinished { generation })
        })?;

        Ok(content.steps.len())
    }
}

/// Handle to one run, returned by [`Sequencer::start`].
pub struct RunHandle {
    generation: u64,
    sequencer: Sequencer,
    task: JoinHandle<RunOutcome>,
}

impl RunHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Whether this run has not been superseded by a `start` or `reset`.
    pub fn is_current(&self) -> bool {
        self.sequencer.is_current(self.generation)
    }

    /// Cancel this run. No-op (returns `false`) if it was already superseded.
    pub fn cancel(&self) -> bool {
        self.sequencer.cancel_generation(self.generation)
    }

    /// Detached canceller usable while `finished` is being awaited.
    pub fn canceller(&self) -> RunCanceller {
        RunCanceller {
            generation: self.generation,
            sequencer: self.sequencer.clone(),
        }
    }

    /// Wait for the run's task to end.
    pub async fn finished(self) -> Result<RunOutcome, PlaybackError> {
        self.task
            .await
            .map_err(|e| PlaybackError::TaskFailed(e.to_string()))
    }
}

#[derive(Clone)]
pub struct RunCanceller {
    generation: u64,
    sequencer: Sequencer,
}

impl RunCanceller {
    pub fn cancel(&self) -> bool {
        self.sequencer.cancel_generation(self.generation)
    }
}
