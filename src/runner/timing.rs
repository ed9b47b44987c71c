//! Playback timing
//!
//! Every delay of a run lives here. Values are milliseconds at speed 1.0; a
//! speed multiplier divides all of them. `Timing::schedule` replays the
//! timeline arithmetically so callers can know when each transition will
//! happen without running it.

use std::time::Duration;

use crate::config::TimingConfig;
use crate::content::AppContent;

pub const SETTLE_DELAY_MS: u64 = 500;
pub const THINKING_DELAY_MS: u64 = 600;
pub const PROCESSING_DELAY_MS: u64 = 200;
pub const BULLET_DELAY_MS: u64 = 100;
pub const CHAR_DELAY_MS: u64 = 20;
pub const BULLET_BUFFER_MS: u64 = 400;
pub const BREATHE_DELAY_MS: u64 = 200;
pub const STEP_DELAYS_MS: [u64; 5] = [400, 500, 450, 550, 400];
pub const UPLOAD_DELAY_MS: u64 = 3000;

/// Time a bullet stays the newest one before the next is revealed.
///
/// Proportional to text length in UTF-16 code units, so a character outside
/// the Basic Multilingual Plane counts twice. Floor of `BULLET_DELAY_MS`.
pub fn bullet_duration_ms(text: &str) -> u64 {
    let typed = text_len(text) as u64 * CHAR_DELAY_MS + BULLET_BUFFER_MS;
    typed.max(BULLET_DELAY_MS)
}

fn text_len(text: &str) -> usize {
    text.encode_utf16().count()
}

#[derive(Debug, Clone, PartialEq)]
pub struct Timing {
    pub settle: Duration,
    pub thinking: Duration,
    pub processing: Duration,
    pub bullet_floor: Duration,
    pub per_char: Duration,
    pub bullet_buffer: Duration,
    pub step_delays: Vec<Duration>,
    pub breathe: Duration,
    pub upload: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(SETTLE_DELAY_MS),
            thinking: Duration::from_millis(THINKING_DELAY_MS),
            processing: Duration::from_millis(PROCESSING_DELAY_MS),
            bullet_floor: Duration::from_millis(BULLET_DELAY_MS),
            per_char: Duration::from_millis(CHAR_DELAY_MS),
            bullet_buffer: Duration::from_millis(BULLET_BUFFER_MS),
            step_delays: STEP_DELAYS_MS.iter().map(|ms| Duration::from_millis(*ms)).collect(),
            breathe: Duration::from_millis(BREATHE_DELAY_MS),
            upload: Duration::from_millis(UPLOAD_DELAY_MS),
        }
    }
}

impl Timing {
    /// Build from config, applying its speed multiplier.
    pub fn from_config(config: &TimingConfig) -> Self {
        let ms = Duration::from_millis;
        Self {
            settle: ms(config.settle_ms),
            thinking: ms(config.thinking_ms),
            processing: ms(config.processing_ms),
            bullet_floor: ms(config.bullet_floor_ms),
            per_char: ms(config.char_ms),
            bullet_buffer: ms(config.bullet_buffer_ms),
            step_delays: config.step_delays_ms.iter().map(|v| ms(*v)).collect(),
            breathe: ms(config.breathe_ms),
            upload: ms(config.upload_ms),
        }
        .scaled(config.speed)
    }

    /// Divide every delay by `speed`. Non-positive or non-finite speeds leave
    /// the timing unchanged.
    pub fn scaled(&self, speed: f64) -> Self {
        if !speed.is_finite() || speed <= 0.0 || (speed - 1.0).abs() < f64::EPSILON {
            return self.clone();
        }
        let scale = |d: Duration| Duration::from_nanos((d.as_nanos() as f64 / speed).round() as u64);
        Self {
            settle: scale(self.settle),
            thinking: scale(self.thinking),
            processing: scale(self.processing),
            bullet_floor: scale(self.bullet_floor),
            per_char: scale(self.per_char),
            bullet_buffer: scale(self.bullet_buffer),
            step_delays: self.step_delays.iter().copied().map(scale).collect(),
            breathe: scale(self.breathe),
            upload: scale(self.upload),
        }
    }

    pub fn bullet_duration(&self, text: &str) -> Duration {
        let typed = self.per_char * text_len(text) as u32 + self.bullet_buffer;
        typed.max(self.bullet_floor)
    }

    /// Settle delay after step `index`. Steps beyond the configured list
    /// reuse the last entry.
    pub fn step_delay(&self, index: usize) -> Duration {
        self.step_delays
            .get(index)
            .or_else(|| self.step_delays.last())
            .copied()
            .unwrap_or_default()
    }

    /// Offsets of every transition of a full run over `content`.
    pub fn schedule(&self, content: &AppContent) -> Schedule {
        let mut at = self.settle;
        let mut steps = Vec::with_capacity(content.steps.len());

        for (index, step) in content.steps.iter().enumerate() {
            let added = at;
            at += self.thinking;
            let processing = at;
            at += self.processing;
            let streaming = at;
            let mut bullets = Vec::with_capacity(step.bullets.len());
            for bullet in step.bullets.iter() {
                bullets.push(at);
                at += self.bullet_duration(bullet);
            }
            at += self.step_delay(index);
            let done = at;
            at += self.breathe;

            steps.push(StepSchedule {
                index,
                title: step.title.clone(),
                added,
                processing,
                streaming,
                bullets,
                done,
            });
        }

        Schedule { steps, total: at }
    }
}

/// When each transition of one step happens, relative to `start()`.
#[derive(Debug, Clone, PartialEq)]
pub struct StepSchedule {
    pub index: usize,
    pub title: String,
    pub added: Duration,
    pub processing: Duration,
    pub streaming: Duration,
    pub bullets: Vec<Duration>,
    pub done: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    pub steps: Vec<StepSchedule>,
    /// When the run reports itself finished.
    pub total: Duration,
}
