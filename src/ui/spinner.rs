//! Live Terminal Spinner
//!
//! An animated spinner that updates on the current terminal line using `\r` + ANSI
//! line clearing, driven by a tokio background task. Shows elapsed time.
//! Used while the simulated upload runs.
//!
//! Terminal capability detection: Respects `TERM=dumb`, unset `TERM`, and the
//! `NO_COLOR` environment variable. When ANSI is not supported, spinner output
//! and color sequences are suppressed.

use std::io::{self, IsTerminal, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::watch;

use crate::output;

/// Braille dot frames
pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Check if the terminal supports ANSI escape sequences.
///
/// Returns `false` if:
/// - The `TERM` env var is `"dumb"` or unset/empty
/// - Stdout is not a terminal (piped to a file, etc.)
pub fn supports_ansi() -> bool {
    if !io::stdout().is_terminal() {
        return false;
    }
    match std::env::var("TERM") {
        Ok(term) => !term.is_empty() && term != "dumb",
        Err(_) => false,
    }
}

/// Check if color output is allowed (`NO_COLOR` unset and ANSI supported).
pub fn supports_color() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    supports_ansi()
}

/// A terminal spinner that animates on a single line
pub struct TerminalSpinner {
    stop_signal: Arc<AtomicBool>,
    message_tx: watch::Sender<String>,
    handle: Option<tokio::task::JoinHandle<()>>,
    start_time: Instant,
}

impl TerminalSpinner {
    /// Start a new spinner with the given message
    pub fn start(message: &str) -> Self {
        // Skip in compact mode, non-terminal, or dumb terminal
        if output::is_compact() || !supports_ansi() {
            return Self::inert();
        }

        let stop_signal = Arc::new(AtomicBool::new(false));
        let (message_tx, message_rx) = watch::channel(message.to_string());
        let stop = stop_signal.clone();
        let start = Instant::now();

        let handle = tokio::spawn(async move {
            let mut tick: usize = 0;

            loop {
                if stop.load(Ordering::Relaxed) {
                    break;
                }

                let frame = SPINNER_FRAMES[tick % SPINNER_FRAMES.len()];
                let msg = message_rx.borrow().clone();
                let elapsed = start.elapsed().as_secs_f64();

                print!("\r\x1b[2K  {} {} ({:.1}s)", frame, msg, elapsed);
                io::stdout().flush().ok();

                tick += 1;
                tokio::time::sleep(tokio::time::Duration::from_millis(80)).await;
            }
        });

        Self {
            stop_signal,
            message_tx,
            handle: Some(handle),
            start_time: Instant::now(),
        }
    }

    /// A spinner that draws nothing
    fn inert() -> Self {
        Self {
            stop_signal: Arc::new(AtomicBool::new(true)),
            message_tx: watch::channel(String::new()).0,
            handle: None,
            start_time: Instant::now(),
        }
    }

    /// Update the spinner message
    pub fn set_message(&self, msg: &str) {
        let _ = self.message_tx.send(msg.to_string());
    }

    /// Stop the spinner and clear its line
    pub fn stop(mut self) {
        self.halt();
    }

    fn halt(&mut self) {
        self.stop_signal.store(true, Ordering::Relaxed);
        if let Some(handle) = self.handle.take() {
            handle.abort();
            if !output::is_compact() && io::stdout().is_terminal() {
                print!("\r\x1b[2K");
                io::stdout().flush().ok();
            }
        }
    }

    /// Get elapsed time since spinner started
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }
}

impl Drop for TerminalSpinner {
    fn drop(&mut self) {
        self.halt();
    }
}
