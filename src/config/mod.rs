//! Configuration Management
//!
//! Loads playback settings from TOML files.
//! Configuration includes:
//! - Timing (every delay of the run, plus a global speed multiplier)
//! - UI (theme, animations, collapsed bullet count, typing speed)
//!
//! Precedence: defaults, then the config file, then `SHOWCASE_*`
//! environment variables, then CLI flags.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ConfigError, ShowcaseError};
use crate::runner::timing::{
    BREATHE_DELAY_MS, BULLET_BUFFER_MS, BULLET_DELAY_MS, CHAR_DELAY_MS, PROCESSING_DELAY_MS,
    SETTLE_DELAY_MS, STEP_DELAYS_MS, THINKING_DELAY_MS, UPLOAD_DELAY_MS,
};

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "agent-showcase.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub timing: TimingConfig,

    #[serde(default)]
    pub ui: UiConfig,

    /// Compact output mode (less visual chrome) - CLI override
    #[serde(skip)]
    pub compact_mode: bool,

    /// Verbose output mode (debug logging) - CLI override
    #[serde(skip)]
    pub verbose_mode: bool,
}

/// Delays of a run in milliseconds at speed 1.0
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimingConfig {
    /// Playback speed multiplier (2.0 = twice as fast)
    #[serde(default = "default_speed")]
    pub speed: f64,
    #[serde(default = "default_settle")]
    pub settle_ms: u64,
    #[serde(default = "default_thinking")]
    pub thinking_ms: u64,
    #[serde(default = "default_processing")]
    pub processing_ms: u64,
    /// Minimum time between two bullet reveals
    #[serde(default = "default_bullet_floor")]
    pub bullet_floor_ms: u64,
    #[serde(default = "default_char")]
    pub char_ms: u64,
    #[serde(default = "default_bullet_buffer")]
    pub bullet_buffer_ms: u64,
    /// Settle delay after each step, by step index
    #[serde(default = "default_step_delays")]
    pub step_delays_ms: Vec<u64>,
    #[serde(default = "default_breathe")]
    pub breathe_ms: u64,
    #[serde(default = "default_upload")]
    pub upload_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            speed: default_speed(),
            settle_ms: default_settle(),
            thinking_ms: default_thinking(),
            processing_ms: default_processing(),
            bullet_floor_ms: default_bullet_floor(),
            char_ms: default_char(),
            bullet_buffer_ms: default_bullet_buffer(),
            step_delays_ms: default_step_delays(),
            breathe_ms: default_breathe(),
            upload_ms: default_upload(),
        }
    }
}

/// UI configuration for themes, animations, and output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Color theme: "brand", "minimal", "high-contrast"
    #[serde(default = "default_theme")]
    pub theme: String,
    /// Type bullets out character by character
    #[serde(default = "default_true")]
    pub animations: bool,
    /// Default to compact mode
    #[serde(default)]
    pub compact_mode: bool,
    /// Default to verbose mode
    #[serde(default)]
    pub verbose_mode: bool,
    /// Bullets shown per message until it is expanded
    #[serde(default = "default_collapsed_bullets")]
    pub collapsed_bullets: usize,
    /// Typing speed of the frontend, per character at speed 1.0
    #[serde(default = "default_typing_char")]
    pub typing_char_ms: u64,
    /// Expand every message instead of collapsing long bullet lists
    #[serde(default)]
    pub expand_all: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            animations: true,
            compact_mode: false,
            verbose_mode: false,
            collapsed_bullets: default_collapsed_bullets(),
            typing_char_ms: default_typing_char(),
            expand_all: false,
        }
    }
}

/// Slowest accepted playback speed. Below it the scaled delays overflow.
pub const MIN_SPEED: f64 = 0.01;

fn default_true() -> bool {
    true
}
fn default_speed() -> f64 {
    1.0
}
fn default_settle() -> u64 {
    SETTLE_DELAY_MS
}
fn default_thinking() -> u64 {
    THINKING_DELAY_MS
}
fn default_processing() -> u64 {
    PROCESSING_DELAY_MS
}
fn default_bullet_floor() -> u64 {
    BULLET_DELAY_MS
}
fn default_char() -> u64 {
    CHAR_DELAY_MS
}
fn default_bullet_buffer() -> u64 {
    BULLET_BUFFER_MS
}
fn default_step_delays() -> Vec<u64> {
    STEP_DELAYS_MS.to_vec()
}
fn default_breathe() -> u64 {
    BREATHE_DELAY_MS
}
fn default_upload() -> u64 {
    UPLOAD_DELAY_MS
}
fn default_theme() -> String {
    "brand".to_string()
}
fn default_collapsed_bullets() -> usize {
    3
}
fn default_typing_char() -> u64 {
    15
}

impl Config {
    /// Load configuration from `path`, or from the default locations when no
    /// path is given. A missing explicit file is an error; missing default
    /// files fall back to built-in defaults.
    pub fn load(path: Option<&str>) -> Result<Self, ShowcaseError> {
        let mut config = match path {
            Some(p) => Self::from_file(Path::new(p))?,
            None => {
                let mut candidates = vec![PathBuf::from(CONFIG_FILE_NAME)];
                if let Some(home) = dirs::home_dir() {
                    candidates.push(home.join(".config/agent-showcase/config.toml"));
                }

                match candidates.iter().find(|p| p.is_file()) {
                    Some(found) => Self::from_file(found)?,
                    None => {
                        tracing::debug!("No config file found, using defaults");
                        Self::default()
                    }
                }
            }
        };

        config.apply_env_overrides(|key| std::env::var(key).ok());

        // Apply UI defaults from config (CLI flags will override later)
        config.compact_mode = config.ui.compact_mode;
        config.verbose_mode = config.ui.verbose_mode;

        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Override settings from `SHOWCASE_*` variables. Unparseable values are
    /// ignored with a warning.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(speed) = lookup("SHOWCASE_SPEED") {
            match speed.parse::<f64>() {
                Ok(s) => self.timing.speed = s,
                Err(_) => tracing::warn!("Ignoring SHOWCASE_SPEED={:?}: not a number", speed),
            }
        }
        if let Some(theme) = lookup("SHOWCASE_THEME") {
            self.ui.theme = theme;
        }
        if let Some(animations) = lookup("SHOWCASE_ANIMATIONS") {
            match animations.to_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => self.ui.animations = true,
                "0" | "false" | "no" | "off" => self.ui.animations = false,
                other => tracing::warn!("Ignoring SHOWCASE_ANIMATIONS={:?}", other),
            }
        }
    }

    /// Reject values the playback cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let speed = self.timing.speed;
        if !speed.is_finite() || speed < MIN_SPEED {
            return Err(ConfigError::Invalid {
                field: "timing.speed".to_string(),
                message: format!("must be a number of at least {}, got {}", MIN_SPEED, speed),
            });
        }
        if self.ui.collapsed_bullets == 0 {
            return Err(ConfigError::Invalid {
                field: "ui.collapsed_bullets".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    /// Apply UI settings to the global theme and output systems
    ///
    /// CLI flags can override the config file settings before calling this.
    pub fn apply_ui_settings(&self) {
        use crate::ui::theme::{set_theme, ThemeId};

        set_theme(ThemeId::parse(&self.ui.theme));
        crate::output::init(self.compact_mode, self.verbose_mode);
    }
}
