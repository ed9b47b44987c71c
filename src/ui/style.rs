//! Style System
//!
//! Semantic styling and glyphs for the transcript, resolved against the
//! current theme.

use std::sync::atomic::{AtomicBool, Ordering};

use super::theme::current_theme;
use crate::runner::MessageStatus;
use colored::Colorize;

/// When true, all glyphs use plain ASCII instead of Unicode/emoji.
static ASCII_MODE: AtomicBool = AtomicBool::new(false);

/// Enable ASCII-only mode (no emoji or extended Unicode).
pub fn set_ascii_mode(enabled: bool) {
    ASCII_MODE.store(enabled, Ordering::Relaxed);
}

/// Check if ASCII mode is active.
pub fn is_ascii_mode() -> bool {
    ASCII_MODE.load(Ordering::Relaxed)
}

/// Semantic styling for different transcript elements
pub trait ShowcaseStyle {
    fn heading(self) -> colored::ColoredString;
    fn user_voice(self) -> colored::ColoredString;
    fn agent_title(self) -> colored::ColoredString;
    fn status_active(self) -> colored::ColoredString;
    fn status_done(self) -> colored::ColoredString;
    fn accent(self) -> colored::ColoredString;
    fn muted(self) -> colored::ColoredString;
    fn emphasis(self) -> colored::ColoredString;
}

impl ShowcaseStyle for &str {
    fn heading(self) -> colored::ColoredString {
        self.custom_color(current_theme().primary).bold()
    }

    fn user_voice(self) -> colored::ColoredString {
        self.custom_color(current_theme().user)
    }

    fn agent_title(self) -> colored::ColoredString {
        self.custom_color(current_theme().primary).bold()
    }

    fn status_active(self) -> colored::ColoredString {
        self.custom_color(current_theme().active).italic()
    }

    fn status_done(self) -> colored::ColoredString {
        self.custom_color(current_theme().success)
    }

    fn accent(self) -> colored::ColoredString {
        self.custom_color(current_theme().accent)
    }

    fn muted(self) -> colored::ColoredString {
        self.custom_color(current_theme().muted)
    }

    fn emphasis(self) -> colored::ColoredString {
        self.custom_color(current_theme().primary).bold()
    }
}

impl ShowcaseStyle for String {
    fn heading(self) -> colored::ColoredString {
        self.as_str().heading()
    }

    fn user_voice(self) -> colored::ColoredString {
        self.as_str().user_voice()
    }

    fn agent_title(self) -> colored::ColoredString {
        self.as_str().agent_title()
    }

    fn status_active(self) -> colored::ColoredString {
        self.as_str().status_active()
    }

    fn status_done(self) -> colored::ColoredString {
        self.as_str().status_done()
    }

    fn accent(self) -> colored::ColoredString {
        self.as_str().accent()
    }

    fn muted(self) -> colored::ColoredString {
        self.as_str().muted()
    }

    fn emphasis(self) -> colored::ColoredString {
        self.as_str().emphasis()
    }
}

/// Glyphs for the transcript. Unicode by default, plain ASCII after
/// [`set_ascii_mode`].
pub struct Glyphs;

impl Glyphs {
    pub fn user() -> &'static str {
        if is_ascii_mode() {
            ">"
        } else {
            "👤"
        }
    }
    pub fn agent() -> &'static str {
        if is_ascii_mode() {
            "*"
        } else {
            "🤖"
        }
    }
    pub fn bullet() -> &'static str {
        if is_ascii_mode() {
            "-"
        } else {
            "•"
        }
    }
    pub fn check() -> &'static str {
        if is_ascii_mode() {
            "[x]"
        } else {
            "✔"
        }
    }
    pub fn document() -> &'static str {
        if is_ascii_mode() {
            "[pdf]"
        } else {
            "📄"
        }
    }
    pub fn upload() -> &'static str {
        if is_ascii_mode() {
            "[^]"
        } else {
            "⇪"
        }
    }
    pub fn more() -> &'static str {
        if is_ascii_mode() {
            "..."
        } else {
            "…"
        }
    }
    pub fn horiz() -> &'static str {
        if is_ascii_mode() {
            "-"
        } else {
            "─"
        }
    }
    pub fn vert() -> &'static str {
        if is_ascii_mode() {
            "|"
        } else {
            "│"
        }
    }

    /// Marker shown next to a status line.
    pub fn status(status: MessageStatus) -> &'static str {
        let ascii = is_ascii_mode();
        match status {
            MessageStatus::Pending => {
                if ascii {
                    "[ ]"
                } else {
                    "○"
                }
            }
            MessageStatus::Thinking => {
                if ascii {
                    "[?]"
                } else {
                    "💭"
                }
            }
            MessageStatus::Processing => {
                if ascii {
                    "[~]"
                } else {
                    "⚙"
                }
            }
            MessageStatus::Streaming => {
                if ascii {
                    "[>]"
                } else {
                    "✎"
                }
            }
            MessageStatus::Done => Self::check(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ascii_glyphs() {
        set_ascii_mode(true);
        assert_eq!(Glyphs::bullet(), "-");
        assert_eq!(Glyphs::status(MessageStatus::Done), "[x]");
        assert!(Glyphs::status(MessageStatus::Thinking).is_ascii());
        set_ascii_mode(false);
        assert_eq!(Glyphs::bullet(), "•");
    }

    #[test]
    fn test_styles_keep_text() {
        colored::control::set_override(false);
        assert_eq!("Title".heading().to_string(), "Title");
        assert_eq!(String::from("x").muted().to_string(), "x");
    }
}
