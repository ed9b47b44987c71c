//! Theme System
//!
//! Color themes for the terminal transcript.

use colored::CustomColor;
use std::sync::atomic::{AtomicU8, Ordering};

/// Global theme selection (0 = Brand, 1 = Minimal, 2 = HighContrast)
static CURRENT_THEME: AtomicU8 = AtomicU8::new(0);

/// Theme identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeId {
    #[default]
    Brand,
    Minimal,
    HighContrast,
}

impl ThemeId {
    pub fn from_u8(value: u8) -> Self {
        match value {
            1 => ThemeId::Minimal,
            2 => ThemeId::HighContrast,
            _ => ThemeId::Brand,
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            ThemeId::Brand => 0,
            ThemeId::Minimal => 1,
            ThemeId::HighContrast => 2,
        }
    }

    /// Parse a config value; unknown names fall back to the brand theme.
    pub fn parse(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "minimal" => ThemeId::Minimal,
            "high-contrast" | "highcontrast" | "high_contrast" => ThemeId::HighContrast,
            _ => ThemeId::Brand,
        }
    }
}

/// A complete color theme
#[derive(Debug, Clone, Copy)]
pub struct ThemeColors {
    /// Titles and emphasis
    pub primary: CustomColor,
    /// Done / success
    pub success: CustomColor,
    /// In-progress states
    pub active: CustomColor,
    /// Secondary text
    pub muted: CustomColor,
    /// The user's own message
    pub user: CustomColor,
    /// Bullet markers and highlights
    pub accent: CustomColor,
}

impl ThemeColors {
    /// Brand theme - deep navy and light blue
    pub const BRAND: ThemeColors = ThemeColors {
        primary: CustomColor {
            r: 30,
            g: 58,
            b: 138,
        }, // #1E3A8A - Navy
        success: CustomColor {
            r: 34,
            g: 197,
            b: 94,
        }, // #22C55E - Green
        active: CustomColor {
            r: 59,
            g: 130,
            b: 246,
        }, // #3B82F6 - Blue
        muted: CustomColor {
            r: 107,
            g: 114,
            b: 128,
        }, // #6B7280 - Gray
        user: CustomColor {
            r: 96,
            g: 165,
            b: 250,
        }, // #60A5FA - Light blue
        accent: CustomColor {
            r: 14,
            g: 165,
            b: 233,
        }, // #0EA5E9 - Sky
    };

    /// Minimal grayscale theme
    pub const MINIMAL: ThemeColors = ThemeColors {
        primary: CustomColor {
            r: 220,
            g: 220,
            b: 220,
        },
        success: CustomColor {
            r: 180,
            g: 180,
            b: 180,
        },
        active: CustomColor {
            r: 160,
            g: 160,
            b: 160,
        },
        muted: CustomColor {
            r: 100,
            g: 100,
            b: 100,
        },
        user: CustomColor {
            r: 200,
            g: 200,
            b: 200,
        },
        accent: CustomColor {
            r: 180,
            g: 180,
            b: 180,
        },
    };

    /// High contrast theme - accessibility focused
    pub const HIGH_CONTRAST: ThemeColors = ThemeColors {
        primary: CustomColor {
            r: 255,
            g: 255,
            b: 255,
        },
        success: CustomColor { r: 0, g: 255, b: 0 },
        active: CustomColor {
            r: 255,
            g: 255,
            b: 0,
        },
        muted: CustomColor {
            r: 192,
            g: 192,
            b: 192,
        },
        user: CustomColor {
            r: 0,
            g: 255,
            b: 255,
        },
        accent: CustomColor {
            r: 255,
            g: 0,
            b: 255,
        },
    };
}

/// Set the global theme
pub fn set_theme(theme: ThemeId) {
    CURRENT_THEME.store(theme.to_u8(), Ordering::SeqCst);
}

/// Get the current theme ID
pub fn current_theme_id() -> ThemeId {
    ThemeId::from_u8(CURRENT_THEME.load(Ordering::SeqCst))
}

/// Get the current theme colors
pub fn current_theme() -> ThemeColors {
    theme_colors(current_theme_id())
}

/// Get theme colors by ID
pub fn theme_colors(id: ThemeId) -> ThemeColors {
    match id {
        ThemeId::Brand => ThemeColors::BRAND,
        ThemeId::Minimal => ThemeColors::MINIMAL,
        ThemeId::HighContrast => ThemeColors::HIGH_CONTRAST,
    }
}
