//! Content Store
//!
//! Static, read-only data for the playback: the user prompt, the ordered
//! steps of the simulated agent and the canned status texts shown around the
//! run. Steps are written as small markdown templates and parsed once on load.

mod script;

use serde::Serialize;
use std::sync::Arc;

/// Marker that prefixes a bullet line in a step template.
pub const BULLET_MARKER: char = '•';

/// One canned unit of simulated agent work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Step {
    pub title: String,
    pub summary: String,
    /// Shared with every message created from this step.
    pub bullets: Arc<[String]>,
}

/// Everything the sequencer and the presentation layer need.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AppContent {
    pub prompt: String,
    pub steps: Vec<Step>,
    /// Closing message shown once the run is done.
    pub final_summary: String,
    pub uploading_text: String,
    pub uploaded_text: String,
    pub footer: String,
    pub document_name: String,
    pub accept_question: String,
}

impl AppContent {
    /// Bullet lines of the closing message (one per completed step).
    pub fn completed_steps(&self) -> Vec<String> {
        bullet_lines(&self.final_summary)
    }

    /// Number of bullets per step, in step order.
    pub fn bullet_counts(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.bullets.len()).collect()
    }
}

/// Load the scripted content. Returns the same value on every call.
pub fn load() -> AppContent {
    AppContent {
        prompt: script::PROMPT.trim().to_string(),
        steps: script::STEPS.iter().map(|md| parse_step(md)).collect(),
        final_summary: script::FINAL_SUMMARY.trim().to_string(),
        uploading_text: script::UPLOADING.trim().to_string(),
        uploaded_text: script::UPLOADED.trim().to_string(),
        footer: script::FOOTER.trim().to_string(),
        document_name: script::DOCUMENT_NAME.to_string(),
        accept_question: script::ACCEPT_QUESTION.to_string(),
    }
}

/// Parse a step template.
///
/// Line 0 is the title (`# `), line 1 the summary (`## `); bullets are the
/// marker-prefixed lines after the blank separator. Missing lines yield empty
/// strings.
pub fn parse_step(markdown: &str) -> Step {
    let lines: Vec<&str> = markdown.trim().lines().collect();

    let title = lines
        .first()
        .map(|l| l.replacen("# ", "", 1))
        .unwrap_or_default();
    let summary = lines
        .get(1)
        .map(|l| l.replacen("## ", "", 1))
        .unwrap_or_default();
    let bullets = lines
        .iter()
        .skip(3)
        .filter_map(|line| strip_bullet(line))
        .collect::<Vec<_>>();

    Step {
        title,
        summary,
        bullets: bullets.into(),
    }
}

fn bullet_lines(text: &str) -> Vec<String> {
    text.lines().filter_map(strip_bullet).collect()
}

fn strip_bullet(line: &str) -> Option<String> {
    if !line.starts_with(BULLET_MARKER) {
        return None;
    }
    let rest = &line[BULLET_MARKER.len_utf8()..];
    Some(rest.strip_prefix(' ').unwrap_or(rest).to_string())
}
