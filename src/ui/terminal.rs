//! Terminal frontend
//!
//! Follows the sequencer's snapshots and prints an append-only transcript:
//! a header when a message appears, a status line per transition, and each
//! newly revealed bullet, typed out when animations are on. With
//! `--format jsonl` every snapshot and phase change is printed as one JSON
//! object per line instead.

use serde::Serialize;
use std::collections::HashMap;
use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::app::{AppPhase, ShowcaseApp};
use super::render;
use super::spinner::TerminalSpinner;
use super::style::ShowcaseStyle;
use crate::confirm::{self, AcceptDecision, AcceptPolicy};
use crate::content::AppContent;
use crate::errors::{PlaybackError, ShowcaseError};
use crate::output;
use crate::runner::{ChatMessage, MessageStatus, RunOutcome, RunnerState};

/// Output format of the `play` command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum PlayFormat {
    /// Styled transcript (default)
    #[default]
    Text,
    /// One JSON object per snapshot or phase change
    Jsonl,
}

#[derive(Debug, Clone)]
pub struct FrontendOptions {
    pub format: PlayFormat,
    /// Type bullets out character by character
    pub animate: bool,
    /// Delay per typed character
    pub typing_char: Duration,
    /// Width of the summary card
    pub width: usize,
    /// Skip the footer and other decoration
    pub quiet: bool,
}

impl Default for FrontendOptions {
    fn default() -> Self {
        Self {
            format: PlayFormat::Text,
            animate: false,
            typing_char: Duration::from_millis(15),
            width: render::card_width(None),
            quiet: false,
        }
    }
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum JsonLine<'a> {
    Snapshot { state: &'a RunnerState },
    Phase { phase: AppPhase },
    Decision { accepted: bool },
}

/// What has been printed for one message so far.
#[derive(Debug, Default)]
struct Printed {
    header: bool,
    status: Option<MessageStatus>,
    bullets: usize,
}

pub struct Frontend<W: Write> {
    out: W,
    options: FrontendOptions,
    step_total: usize,
    printed: HashMap<String, Printed>,
    started: Option<Instant>,
}

impl<W: Write> Frontend<W> {
    pub fn new(out: W, options: FrontendOptions, step_total: usize) -> Self {
        Self {
            out,
            options,
            step_total,
            printed: HashMap::new(),
            started: None,
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn is_jsonl(&self) -> bool {
        self.options.format == PlayFormat::Jsonl
    }

    fn write_json(&mut self, line: &JsonLine<'_>) -> io::Result<()> {
        serde_json::to_writer(&mut self.out, line)?;
        writeln!(self.out)?;
        self.out.flush()
    }

    /// Print what changed since the previous snapshot.
    pub async fn render_snapshot(&mut self, state: &RunnerState, app: &ShowcaseApp) -> io::Result<()> {
        if self.is_jsonl() {
            return self.write_json(&JsonLine::Snapshot { state });
        }
        if state.is_empty() {
            self.printed.clear();
            self.started = None;
            return Ok(());
        }
        self.started.get_or_insert_with(Instant::now);

        let mut step = 0;
        for message in &state.messages {
            let mut printed = self.printed.remove(&message.id).unwrap_or_default();
            let result = if message.is_user() {
                self.render_user(message, &mut printed)
            } else {
                step += 1;
                self.render_agent(message, step - 1, app, &mut printed).await
            };
            self.printed.insert(message.id.clone(), printed);
            result?;
        }
        self.out.flush()
    }

    fn render_user(&mut self, message: &ChatMessage, printed: &mut Printed) -> io::Result<()> {
        if !printed.header {
            writeln!(self.out, "{}", render::user_message(message))?;
            printed.header = true;
            printed.status = Some(message.status);
        }
        Ok(())
    }

    async fn render_agent(
        &mut self,
        message: &ChatMessage,
        step: usize,
        app: &ShowcaseApp,
        printed: &mut Printed,
    ) -> io::Result<()> {
        if !printed.header {
            if !output::is_compact() {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}", render::agent_header(message, step, self.step_total))?;
            printed.header = true;
        }

        if message.status != MessageStatus::Done && printed.status != Some(message.status) {
            self.write_status(message.status)?;
            printed.status = Some(message.status);
        }

        let target = app.visible_limit(message);
        let revealed = message.revealed();
        while printed.bullets < target {
            self.write_bullet(&revealed[printed.bullets]).await?;
            printed.bullets += 1;
        }

        if message.status == MessageStatus::Done && printed.status != Some(MessageStatus::Done) {
            self.write_status(MessageStatus::Done)?;
            printed.status = Some(MessageStatus::Done);
            let hidden = app.hidden_count(message);
            if hidden > 0 {
                writeln!(self.out, "{}", render::more_hint(hidden))?;
            }
        }
        Ok(())
    }

    fn write_status(&mut self, status: MessageStatus) -> io::Result<()> {
        let line = render::status_line(status);
        match self.started {
            Some(started) if output::is_verbose() => {
                let elapsed = format!("({:.1}s)", started.elapsed().as_secs_f64());
                writeln!(self.out, "{} {}", line, elapsed.muted())
            }
            _ => writeln!(self.out, "{}", line),
        }
    }

    async fn write_bullet(&mut self, text: &str) -> io::Result<()> {
        if !self.options.animate || self.options.typing_char.is_zero() {
            return writeln!(self.out, "{}", render::bullet_line(text));
        }
        write!(self.out, "{}", render::bullet_prefix())?;
        let mut buf = [0u8; 4];
        for ch in text.chars() {
            self.out.write_all(ch.encode_utf8(&mut buf).as_bytes())?;
            self.out.flush()?;
            tokio::time::sleep(self.options.typing_char).await;
        }
        writeln!(self.out)
    }

    /// Print the block belonging to a newly entered phase.
    pub fn render_phase(&mut self, phase: AppPhase, content: &AppContent) -> io::Result<()> {
        if self.is_jsonl() {
            return self.write_json(&JsonLine::Phase { phase });
        }
        let width = self.options.width;
        let lines = match phase {
            AppPhase::Idle | AppPhase::Running => return Ok(()),
            AppPhase::Done => render::summary_card(content, width),
            AppPhase::Uploading => {
                render::upload_block(render::UPLOADING_TITLE, &content.uploading_text, false, width)
            }
            AppPhase::Uploaded => {
                render::upload_block(render::UPLOADED_TITLE, &content.uploaded_text, true, width)
            }
        };
        if !output::is_compact() {
            writeln!(self.out)?;
        }
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()
    }

    /// Echo an answer given by flag. Interactive answers echo themselves.
    pub fn render_decision(
        &mut self,
        question: &str,
        decision: AcceptDecision,
        echo: bool,
    ) -> io::Result<()> {
        if self.is_jsonl() {
            return self.write_json(&JsonLine::Decision {
                accepted: decision.is_accepted(),
            });
        }
        if echo {
            let answer = if decision.is_accepted() { "ja" } else { "nein" };
            writeln!(self.out)?;
            writeln!(self.out, "{} {}", question.emphasis(), answer.muted())?;
        }
        self.out.flush()
    }

    pub fn render_footer(&mut self, content: &AppContent) -> io::Result<()> {
        if self.is_jsonl() || self.options.quiet {
            return Ok(());
        }
        writeln!(self.out)?;
        writeln!(self.out, "{}", render::footer(content))?;
        self.out.flush()
    }
}

/// How a `play` session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaySummary {
    pub outcome: RunOutcome,
    pub decision: AcceptDecision,
    pub phase: AppPhase,
}

/// Aborts the signal listener when the session ends.
struct AbortOnDrop(tokio::task::JoinHandle<()>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run one full session: play the run, show the summary, resolve the accept
/// question and simulate the upload. Ctrl-C at any point replays the app
/// back to idle and ends the session with [`PlaybackError::Cancelled`].
pub async fn play<W: Write>(
    app: &ShowcaseApp,
    frontend: &mut Frontend<W>,
    policy: AcceptPolicy,
) -> Result<PlaySummary, ShowcaseError> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let interrupt = Arc::new(Notify::new());

    let ctrl_c_handle = {
        let app = app.clone();
        let interrupted = Arc::clone(&interrupted);
        let interrupt = Arc::clone(&interrupt);
        tokio::spawn(async move {
            if let Ok(()) = tokio::signal::ctrl_c().await {
                interrupted.store(true, Ordering::SeqCst);
                warn!("Interrupted, cancelling playback");
                app.handle_replay();
                interrupt.notify_one();
            }
        })
    };
    let _ctrl_c_guard = AbortOnDrop(ctrl_c_handle);

    let content = app.sequencer().content().clone();
    let mut snapshots = app.sequencer().subscribe();

    let handle = app.begin_run().ok_or_else(|| {
        ShowcaseError::Other(anyhow::anyhow!(
            "cannot start a run while the app is {}",
            app.phase()
        ))
    })?;
    frontend.render_phase(AppPhase::Running, &content)?;

    while snapshots.changed().await.is_ok() {
        let snapshot = snapshots.borrow_and_update().clone();
        frontend.render_snapshot(&snapshot, app).await?;
        if !snapshot.is_running {
            break;
        }
    }

    let outcome = handle.finished().await?;
    if interrupted.load(Ordering::SeqCst) || !app.complete_run(&outcome) {
        return Err(PlaybackError::Cancelled.into());
    }
    frontend.render_phase(AppPhase::Done, &content)?;

    let decision = tokio::select! {
        decision = confirm::resolve(policy, &content.accept_question) => decision?,
        _ = interrupt.notified() => return Err(PlaybackError::Cancelled.into()),
    };
    frontend.render_decision(&content.accept_question, decision, policy != AcceptPolicy::Ask)?;
    info!(accepted = decision.is_accepted(), "Accept question answered");

    if decision.is_accepted() {
        let mut phases = app.subscribe_phase();
        let upload = app.handle_accept();
        tokio::pin!(upload);

        let mut spinner = None;
        let uploaded = loop {
            tokio::select! {
                uploaded = &mut upload => break uploaded,
                changed = phases.changed() => {
                    if changed.is_err() {
                        continue;
                    }
                    let phase = *phases.borrow_and_update();
                    if phase == AppPhase::Uploading {
                        frontend.render_phase(phase, &content)?;
                        if frontend.options.format == PlayFormat::Text {
                            spinner = Some(TerminalSpinner::start(render::UPLOADING_TITLE));
                        }
                    }
                }
            }
        };
        if let Some(spinner) = spinner.take() {
            spinner.stop();
        }

        if interrupted.load(Ordering::SeqCst) {
            return Err(PlaybackError::Cancelled.into());
        }
        if uploaded {
            frontend.render_phase(AppPhase::Uploaded, &content)?;
        } else {
            debug!(phase = app.phase().as_str(), "Upload did not complete");
        }
    }

    frontend.render_footer(&content)?;

    Ok(PlaySummary {
        outcome,
        decision,
        phase: app.phase(),
    })
}
