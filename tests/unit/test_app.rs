//! Unit tests for the showcase app phases

use agent_showcase::content;
use agent_showcase::runner::{Sequencer, Timing};
use agent_showcase::ui::{AppPhase, ShowcaseApp};
use std::sync::Arc;
use std::time::Duration;

fn app() -> ShowcaseApp {
    ShowcaseApp::new(Sequencer::new(Arc::new(content::load()), Timing::default()))
}

#[tokio::test(start_paused = true)]
async fn test_full_lifecycle() {
    let app = app();
    assert_eq!(app.phase(), AppPhase::Idle);

    app.handle_start().await.unwrap();
    assert_eq!(app.phase(), AppPhase::Done);

    assert!(app.handle_accept().await);
    assert_eq!(app.phase(), AppPhase::Uploaded);

    app.handle_replay();
    assert_eq!(app.phase(), AppPhase::Idle);
    assert!(app.sequencer().snapshot().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_upload_takes_three_seconds() {
    let app = app();
    app.handle_start().await.unwrap();

    let started = tokio::time::Instant::now();
    app.handle_accept().await;
    let elapsed = started.elapsed();
    assert!(elapsed >= Duration::from_millis(3_000));
    assert!(elapsed < Duration::from_millis(3_010));
}

#[tokio::test(start_paused = true)]
async fn test_phase_changes_are_observable() {
    let app = app();
    let mut phases = app.subscribe_phase();
    let handle = app.begin_run().unwrap();

    phases.changed().await.unwrap();
    assert_eq!(*phases.borrow_and_update(), AppPhase::Running);

    let outcome = handle.finished().await.unwrap();
    app.complete_run(&outcome);
    phases.changed().await.unwrap();
    assert_eq!(*phases.borrow_and_update(), AppPhase::Done);
}

#[tokio::test(start_paused = true)]
async fn test_replay_while_idle_keeps_idle() {
    let app = app();
    let mut phases = app.subscribe_phase();
    app.handle_replay();
    assert!(!phases.has_changed().unwrap());
    assert_eq!(app.phase(), AppPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_toggle_is_per_message() {
    let app = app();
    assert!(app.toggle_expanded("agent-2"));
    assert!(app.is_expanded("agent-2"));
    assert!(!app.is_expanded("agent-3"));
    assert_eq!(app.collapsed_bullets(), 3);
}
