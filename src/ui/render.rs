//! Transcript rendering
//!
//! Pure functions turning messages and content into printable lines. Nothing
//! here writes to the terminal.

use unicode_width::UnicodeWidthStr;

use super::style::{Glyphs, ShowcaseStyle};
use crate::content::AppContent;
use crate::runner::{ChatMessage, MessageStatus};

pub const CARD_TITLE: &str = "Strategiedokument erstellt";
pub const UPLOADING_TITLE: &str = "Speichere im System";
pub const UPLOADED_TITLE: &str = "Erfolgreich gespeichert";
pub const MORE_LABEL: &str = "Mehr anzeigen";
pub const DOCUMENT_META: &str = "~2.1 MB • 3 Seiten";

const CARD_MIN_WIDTH: usize = 40;
const CARD_MAX_WIDTH: usize = 76;

/// Label shown on a status line.
pub fn status_label(status: MessageStatus) -> &'static str {
    match status {
        MessageStatus::Pending => "wartet",
        MessageStatus::Thinking => "denkt nach",
        MessageStatus::Processing => "verarbeitet",
        MessageStatus::Streaming => "schreibt",
        MessageStatus::Done => "fertig",
    }
}

/// Bullets of `message` to show: everything when expanded, at most `limit`
/// otherwise.
pub fn shown_bullets(message: &ChatMessage, expanded: bool, limit: usize) -> usize {
    let revealed = message.revealed().len();
    if expanded {
        revealed
    } else {
        revealed.min(limit)
    }
}

/// Bullets hidden behind the "more" hint. Only done, collapsed messages
/// with more than `limit` bullets hide any.
pub fn hidden_bullets(message: &ChatMessage, expanded: bool, limit: usize) -> usize {
    if expanded || message.status != MessageStatus::Done {
        return 0;
    }
    message.bullet_count().saturating_sub(limit)
}

pub fn user_message(message: &ChatMessage) -> String {
    let text = message.content.as_deref().unwrap_or_default();
    format!("{} {}", Glyphs::user(), text.user_voice())
}

/// Header printed when an agent message first appears.
pub fn agent_header(message: &ChatMessage, index: usize, total: usize) -> String {
    let title = message.title.as_deref().unwrap_or_default();
    format!(
        "{} {} {}",
        Glyphs::agent(),
        format!("[{}/{}]", index + 1, total).muted(),
        title.agent_title()
    )
}

pub fn status_line(status: MessageStatus) -> String {
    let label = format!("{} {}", Glyphs::status(status), status_label(status));
    let styled = if status.is_terminal() {
        label.status_done()
    } else {
        label.status_active()
    };
    format!("   {}", styled)
}

/// Prefix printed in front of a bullet, before its text.
pub fn bullet_prefix() -> String {
    format!("     {} ", Glyphs::bullet().accent())
}

pub fn bullet_line(text: &str) -> String {
    format!("{}{}", bullet_prefix(), text)
}

pub fn more_hint(hidden: usize) -> String {
    format!("     {} {} (+{})", Glyphs::more(), MORE_LABEL, hidden)
        .muted()
        .to_string()
}

/// Remove markdown bold markers.
pub fn strip_emphasis(text: &str) -> String {
    text.replace("**", "")
}

/// Greedy word wrap on display width. Words wider than `width` get a line
/// of their own.
pub fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        let needed = if line.is_empty() {
            word.width()
        } else {
            line.width() + 1 + word.width()
        };
        if needed > width && !line.is_empty() {
            lines.push(std::mem::take(&mut line));
        }
        if !line.is_empty() {
            line.push(' ');
        }
        line.push_str(word);
    }
    if !line.is_empty() {
        lines.push(line);
    }
    lines
}

/// Card width for a terminal `columns` wide.
pub fn card_width(columns: Option<u16>) -> usize {
    columns
        .map(|c| c as usize)
        .unwrap_or(CARD_MAX_WIDTH)
        .clamp(CARD_MIN_WIDTH, CARD_MAX_WIDTH)
}

/// The closing card: title, the summary text with completed steps checked
/// off, and the generated document.
pub fn summary_card(content: &AppContent, width: usize) -> Vec<String> {
    let inner = width.saturating_sub(4).max(1);
    let rule = Glyphs::horiz().repeat(width);
    let edge = Glyphs::vert().muted().to_string();

    let mut body = Vec::new();
    for line in content.final_summary.lines() {
        let line = strip_emphasis(line);
        if let Some(step) = line.strip_prefix(crate::content::BULLET_MARKER) {
            body.push(format!(
                "{} {}",
                Glyphs::check().status_done(),
                step.trim_start()
            ));
        } else if line.trim().is_empty() {
            body.push(String::new());
        } else {
            body.extend(wrap(&line, inner));
        }
    }

    let mut lines = Vec::with_capacity(body.len() + 6);
    lines.push(rule.as_str().muted().to_string());
    lines.push(format!("{} {} {}", edge, Glyphs::check(), CARD_TITLE.heading()));
    lines.push(edge.clone());
    lines.push(format!(
        "{} {} {}  {}",
        edge,
        Glyphs::document(),
        content.document_name.as_str().emphasis(),
        DOCUMENT_META.muted()
    ));
    lines.push(edge.clone());
    for line in body {
        if line.is_empty() {
            lines.push(edge.clone());
        } else {
            lines.push(format!("{} {}", edge, line));
        }
    }
    lines.push(rule.as_str().muted().to_string());
    lines
}

/// Status block for the simulated upload.
pub fn upload_block(title: &str, text: &str, done: bool, width: usize) -> Vec<String> {
    let glyph = if done { Glyphs::check() } else { Glyphs::upload() };
    let heading = if done {
        title.status_done()
    } else {
        title.status_active()
    };
    let mut lines = vec![format!("{} {}", glyph, heading)];
    for paragraph in text.lines() {
        if paragraph.trim().is_empty() {
            continue;
        }
        lines.extend(wrap(paragraph, width).into_iter().map(|l| format!("  {}", l)));
    }
    lines
}

pub fn footer(content: &AppContent) -> String {
    content.footer.as_str().muted().to_string()
}
