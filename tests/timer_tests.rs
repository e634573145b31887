//! Timed-variant integration tests.
//!
//! Time never comes from a wall clock here: the host reports elapsed
//! durations through `tick` and the session fires whatever deadlines
//! fell inside the slice, in order.

use std::time::Duration;

use grammar_rounds::core::{Question, RoundConfig, SessionRng, ANSWER_TIMER};
use grammar_rounds::engine::{Feedback, RoundSeq, Session, Submission, TickEvent};

fn timed_config() -> RoundConfig {
    RoundConfig::default()
        .with_timer(Some(ANSWER_TIMER))
        .with_feedback_pause(Duration::from_millis(2500))
}

fn batch() -> Vec<Question> {
    (0..5)
        .map(|i| {
            Question::new(
                format!("Timed prompt {i} __BLANK__."),
                vec!["tick".into(), "tock".into(), "boom".into()],
                "tick",
                Some("The fuse was generous.".into()),
            )
            .unwrap()
        })
        .collect()
}

fn start_timed() -> Session {
    Session::start(timed_config(), batch(), SessionRng::new(9)).unwrap()
}

// ==== Timeouts ====

/// Test that ten silent seconds decide the round as a timeout, scored
/// as incorrect, with feedback that says so.
#[test]
fn test_timeout_records_implicit_answer() {
    let mut session = start_timed();
    assert_eq!(session.remaining_seconds(), Some(10));

    let events = session.tick(Duration::from_secs(10));
    assert_eq!(events, vec![TickEvent::TimedOut(RoundSeq::new(0))]);

    assert!(session.round().is_decided());
    assert_eq!(session.round().feedback(), Feedback::Incorrect);
    assert!(session.round().timed_out());
    assert_eq!(session.round().selected(), None, "no pick was made");
    assert_eq!(session.score(), 0);

    let record = &session.answers()[0];
    assert!(record.timed_out);
    let line = record.feedback_line();
    assert!(
        line.contains("Time's up!"),
        "timeout feedback must say so: {line}"
    );
    assert!(
        line.contains("\"tick\""),
        "timeout feedback must name the answer: {line}"
    );
}

/// Test that a timed-out round still advances after the feedback pause.
#[test]
fn test_timeout_then_pause_then_next_round() {
    let mut session = start_timed();

    session.tick(Duration::from_secs(10));
    let events = session.tick(Duration::from_millis(2500));

    assert_eq!(events, vec![TickEvent::Advanced(RoundSeq::new(1))]);
    assert_eq!(session.current_index(), 1);
    assert_eq!(session.remaining_seconds(), Some(10), "fresh timer re-armed");
}

// ==== Cancellation ====

/// Test that answering disarms the countdown: the old deadline never
/// fires.
#[test]
fn test_answer_cancels_countdown() {
    let mut session = start_timed();

    session.tick(Duration::from_secs(9));
    let result = session.submit_answer("tick");
    assert!(result.is_accepted());
    assert_eq!(session.remaining_seconds(), None);

    // Where the timeout would have been, only the pause is running
    let events = session.tick(Duration::from_secs(1));
    assert!(events.is_empty());
    assert!(!session.round().timed_out());
    assert_eq!(session.score(), 1);
}

/// Test that dropping a session discards its armed deadlines: a
/// replacement session starts with a full timer.
#[test]
fn test_replacing_session_resets_deadlines() {
    let mut session = start_timed();
    session.tick(Duration::from_secs(9));
    assert_eq!(session.remaining_seconds(), Some(1));

    // Host starts over: the old session (and its 1s-from-firing
    // countdown) is gone
    session = start_timed();
    let events = session.tick(Duration::from_secs(2));
    assert!(events.is_empty(), "old deadline must not leak into the new session");
    assert_eq!(session.remaining_seconds(), Some(8));
}

// ==== Deadline ordering ====

/// Test that one oversized tick replays the deadlines in order instead
/// of collapsing them.
#[test]
fn test_large_tick_preserves_deadline_order() {
    let mut session = start_timed();

    // 26s: timeout at 10s, advance at 12.5s, timeout at 22.5s, then
    // 3.5s into round 2's pause... which ends at 25s, advancing again
    let events = session.tick(Duration::from_secs(26));

    assert_eq!(
        events,
        vec![
            TickEvent::TimedOut(RoundSeq::new(0)),
            TickEvent::Advanced(RoundSeq::new(1)),
            TickEvent::TimedOut(RoundSeq::new(1)),
            TickEvent::Advanced(RoundSeq::new(2)),
        ]
    );
    assert_eq!(session.current_index(), 2);
    // 26 - 25 = 1s into round 2's timer
    assert_eq!(session.remaining_seconds(), Some(9));
}

/// Test that a neglected session times out all the way to completion
/// with a zero score.
#[test]
fn test_neglected_session_completes_at_zero() {
    let mut session = start_timed();

    let events = session.tick(Duration::from_secs(3600));

    // Five timeouts, four advances, one finish
    assert_eq!(events.len(), 10);
    let report = match events.last() {
        Some(TickEvent::Finished(report)) => report,
        other => panic!("expected Finished last, got {other:?}"),
    };
    assert_eq!(report.score(), 0);
    assert_eq!(report.percentage(), 0);
    assert!(report.rounds().iter().all(|r| r.timed_out));

    // A finished session ignores further time
    assert!(session.tick(Duration::from_secs(3600)).is_empty());
}

/// Test that submissions racing the timeout lose cleanly once it fired.
#[test]
fn test_submission_after_timeout_dropped() {
    let mut session = start_timed();

    session.tick(Duration::from_secs(10));
    let late = session.submit_answer("tick");

    assert_eq!(
        late,
        Submission::Ignored(grammar_rounds::engine::IgnoreReason::RoundDecided)
    );
    assert!(session.round().timed_out(), "timeout verdict stands");
    assert_eq!(session.score(), 0);
}

/// Test display seconds round up, matching a countdown readout.
#[test]
fn test_remaining_seconds_rounds_up() {
    let mut session = start_timed();

    session.tick(Duration::from_millis(300));
    assert_eq!(session.remaining_seconds(), Some(10), "9.7s displays as 10");

    session.tick(Duration::from_millis(8800));
    assert_eq!(session.remaining_seconds(), Some(1), "0.9s displays as 1");
}
