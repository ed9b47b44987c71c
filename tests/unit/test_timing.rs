//! Unit tests for playback timing

use agent_showcase::content;
use agent_showcase::runner::{bullet_duration_ms, Timing};
use std::time::Duration;

#[test]
fn test_bullet_duration_grows_with_length() {
    assert!(bullet_duration_ms("kurz") < bullet_duration_ms("ein deutlich längerer Text"));
    assert_eq!(bullet_duration_ms("kurz"), 4 * 20 + 400);
}

#[test]
fn test_double_speed_halves_every_delay() {
    let normal = Timing::default();
    let fast = normal.scaled(2.0);
    assert_eq!(fast.settle, normal.settle / 2);
    assert_eq!(fast.thinking, normal.thinking / 2);
    assert_eq!(fast.processing, normal.processing / 2);
    assert_eq!(fast.breathe, normal.breathe / 2);
    assert_eq!(fast.upload, normal.upload / 2);
    for (a, b) in fast.step_delays.iter().zip(&normal.step_delays) {
        assert_eq!(*a, *b / 2);
    }
}

#[test]
fn test_schedule_is_ordered() {
    let content = content::load();
    let schedule = Timing::default().schedule(&content);
    assert_eq!(schedule.steps.len(), 5);

    let mut last = Duration::ZERO;
    for step in &schedule.steps {
        assert!(step.added >= last);
        assert!(step.processing > step.added);
        assert!(step.streaming > step.processing);
        assert_eq!(step.bullets.first(), Some(&step.streaming));
        assert!(step.done > *step.bullets.last().unwrap());
        last = step.done;
    }
    assert!(schedule.total > last);
}

#[test]
fn test_first_step_offsets() {
    let schedule = Timing::default().schedule(&content::load());
    let first = &schedule.steps[0];
    assert_eq!(first.added, Duration::from_millis(500));
    assert_eq!(first.processing, Duration::from_millis(1100));
    assert_eq!(first.streaming, Duration::from_millis(1300));
}
