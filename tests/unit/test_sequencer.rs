//! Unit tests for the playback sequencer
//!
//! All tests run on tokio's paused clock, so a full run takes no real time.

use agent_showcase::content::{self, parse_step, AppContent};
use agent_showcase::runner::{
    MessageStatus, PlaybackEvent, RunOutcome, RunnerState, Sequencer, Timing, USER_MESSAGE_ID,
};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

fn sequencer() -> Sequencer {
    Sequencer::new(Arc::new(content::load()), Timing::default())
}

#[tokio::test(start_paused = true)]
async fn test_start_publishes_user_message_immediately() {
    let seq = sequencer();
    let handle = seq.start();

    let state = seq.snapshot();
    assert_eq!(state.messages.len(), 1);
    assert_eq!(state.messages[0].id, USER_MESSAGE_ID);
    assert!(state.is_running);
    assert_eq!(state.current_message_index, None);

    handle.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_first_agent_message_after_settle() {
    let seq = sequencer();
    let _handle = seq.start();

    tokio::time::sleep(Duration::from_millis(499)).await;
    assert_eq!(seq.snapshot().messages.len(), 1);
    assert!(seq.snapshot().is_running);

    tokio::time::sleep(Duration::from_millis(2)).await;
    let state = seq.snapshot();
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].status, MessageStatus::Thinking);
    assert_eq!(state.current_message_index, Some(0));
}

#[tokio::test(start_paused = true)]
async fn test_reset_after_50ms_leaves_empty_state() {
    let seq = sequencer();
    let _handle = seq.start();
    tokio::time::sleep(Duration::from_millis(50)).await;
    seq.reset();

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(*seq.snapshot(), RunnerState::default());
}

#[tokio::test(start_paused = true)]
async fn test_full_run_duration_matches_schedule() {
    let seq = sequencer();
    let expected = seq.timing().schedule(seq.content()).total;
    let started = Instant::now();
    let outcome = seq.run().await.unwrap();
    let elapsed = started.elapsed();

    match outcome {
        RunOutcome::Completed { steps, .. } => assert_eq!(steps, 5),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(elapsed >= expected);
    assert!(elapsed < expected + Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn test_events_bracket_the_run() {
    let seq = sequencer();
    let mut events = seq.subscribe_events();
    let outcome = seq.run().await.unwrap();
    assert!(outcome.is_completed());

    let mut seen = Vec::new();
    while let Ok(event) = events.try_recv() {
        seen.push(event);
    }
    assert!(matches!(seen.first(), Some(PlaybackEvent::RunStarted { .. })));
    assert!(matches!(seen.last(), Some(PlaybackEvent::RunFinished { .. })));
    let added = seen
        .iter()
        .filter(|e| matches!(e, PlaybackEvent::MessageAdded { .. }))
        .count();
    assert_eq!(added, 5);
}

#[test]
fn test_event_serializes_with_tag() {
    let event = PlaybackEvent::StatusChanged {
        generation: 1,
        id: "agent-0".into(),
        from: MessageStatus::Thinking,
        to: MessageStatus::Processing,
    };
    let json = serde_json::to_value(&event).unwrap();
    assert_eq!(json["event"], "status_changed");
    assert_eq!(json["to"], "processing");
}

#[tokio::test(start_paused = true)]
async fn test_step_with_no_bullets() {
    let content = AppContent {
        steps: vec![parse_step("# Leer\n## Nichts")],
        ..content::load()
    };
    let seq = Sequencer::new(Arc::new(content), Timing::default());
    seq.run().await.unwrap();

    let state = seq.snapshot();
    assert_eq!(state.messages.len(), 2);
    assert_eq!(state.messages[1].status, MessageStatus::Done);
    assert_eq!(state.messages[1].visible_bullets, 0);
}

#[tokio::test(start_paused = true)]
async fn test_running_twice_resets_timeline() {
    let seq = sequencer();
    seq.run().await.unwrap();
    seq.run().await.unwrap();
    assert_eq!(seq.snapshot().messages.len(), 6);
}
