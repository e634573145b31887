//! Session lifecycle integration tests.
//!
//! These walk full sessions through the round state machine: answering,
//! advancing, finishing, and the no-op guards around each step.

use grammar_rounds::core::{Question, RoundConfig, SessionRng};
use grammar_rounds::engine::{
    EngineError, Feedback, IgnoreReason, Progress, RoundSeq, Session, Submission,
};

/// A five-question batch where question 0 is the "She __BLANK__ happy"
/// singular/plural drill.
fn standard_batch() -> Vec<Question> {
    let mut questions = vec![Question::new(
        "She __BLANK__ happy.",
        vec!["is".into(), "are".into(), "am".into(), "be".into()],
        "is",
        Some("Singular subjects take 'is'.".into()),
    )
    .unwrap()];

    for i in 1..5 {
        questions.push(
            Question::new(
                format!("Filler prompt {i} __BLANK__."),
                vec!["right".into(), "wrong".into(), "other".into()],
                "right",
                None,
            )
            .unwrap(),
        );
    }
    questions
}

fn start() -> Session {
    Session::start(RoundConfig::default(), standard_batch(), SessionRng::new(42)).unwrap()
}

/// Answer whatever the current round's correct option is.
fn answer_correctly(session: &mut Session) {
    let answer = session.question().answer().to_string();
    let result = session.submit_answer(&answer);
    assert!(result.is_accepted(), "correct answer should be accepted");
}

// ==== Starting ====

/// Test that a session starts at round 0 with nothing decided.
#[test]
fn test_session_starts_clean() {
    let session = start();

    assert_eq!(session.current_index(), 0);
    assert_eq!(session.score(), 0);
    assert_eq!(session.rounds_total(), 5);
    assert_eq!(session.max_score(), 5);
    assert!(!session.is_complete());
    assert!(session.answers().is_empty());
    assert!(!session.round().is_decided());
}

/// Test that a short batch is rejected with the counts spelled out.
#[test]
fn test_insufficient_content_reports_counts() {
    let err = Session::start(
        RoundConfig::default(),
        standard_batch()[..4].to_vec(),
        SessionRng::new(42),
    )
    .unwrap_err();

    assert_eq!(err, EngineError::InsufficientContent { got: 4, need: 5 });
    assert_eq!(
        err.to_string(),
        "insufficient content: got 4 questions, need 5"
    );
}

/// Test that the dealt options are a permutation of the question's.
#[test]
fn test_deal_is_a_permutation() {
    let session = start();
    let dealt = session.round().dealt();
    let canonical = session.question().options();

    assert_eq!(dealt.len(), canonical.len());
    for option in canonical {
        assert!(dealt.contains(option), "missing option {option}");
    }
}

// ==== Correct answers ====

/// Test that submitting the correct option scores a point and reads
/// back as correct feedback.
#[test]
fn test_correct_answer_scores_point() {
    let mut session = start();

    let result = session.submit_answer("is");
    assert_eq!(
        result,
        Submission::Accepted {
            seq: RoundSeq::new(0),
            feedback: Feedback::Correct,
        }
    );
    assert_eq!(session.score(), 1);
    assert_eq!(session.round().selected(), Some("is"));
}

// ==== Wrong answers ====

/// Test that a wrong pick scores nothing and the feedback names the
/// correct answer.
#[test]
fn test_wrong_answer_feedback_names_correct_option() {
    let mut session = start();

    let result = session.submit_answer("are");
    assert_eq!(
        result,
        Submission::Accepted {
            seq: RoundSeq::new(0),
            feedback: Feedback::Incorrect,
        }
    );
    assert_eq!(session.score(), 0);

    let record = &session.answers()[0];
    let line = record.feedback_line();
    assert!(line.contains("\"is\""), "feedback must name the answer: {line}");
    assert!(
        line.contains("Singular subjects take 'is'."),
        "feedback must carry the explanation: {line}"
    );
}

// ==== Idempotence guards ====

/// Test that a second submission on a decided round changes nothing.
#[test]
fn test_double_submit_is_noop() {
    let mut session = start();

    session.submit_answer("are");
    let before_score = session.score();
    let before_feedback = session.round().feedback();

    let second = session.submit_answer("is");
    assert_eq!(second, Submission::Ignored(IgnoreReason::RoundDecided));
    assert_eq!(session.score(), before_score);
    assert_eq!(session.round().feedback(), before_feedback);
    assert_eq!(session.answers().len(), 1);
}

/// Test that input tagged with an old round's sequence is dropped.
#[test]
fn test_stale_submission_dropped() {
    let mut session = start();
    let old_seq = session.round().seq();

    answer_correctly(&mut session);
    session.advance();

    let stale = session.submit_answer_for(old_seq, "is");
    assert_eq!(stale, Submission::Ignored(IgnoreReason::StaleRound));
    assert!(!session.round().is_decided(), "current round must stay open");
    assert_eq!(session.score(), 1);
}

/// Test that a choice outside the dealt options is dropped without
/// deciding the round.
#[test]
fn test_unknown_option_dropped() {
    let mut session = start();

    let result = session.submit_answer("definitely-not-an-option");
    assert_eq!(result, Submission::Ignored(IgnoreReason::UnknownOption));
    assert!(!session.round().is_decided());
    assert_eq!(session.answers().len(), 0);
}

/// Test that advancing an unanswered round does nothing.
#[test]
fn test_advance_requires_verdict() {
    let mut session = start();

    assert_eq!(session.advance(), Progress::AwaitingAnswer);
    assert_eq!(session.current_index(), 0);
    assert_eq!(session.round().seq(), RoundSeq::new(0));
}

// ==== Completion ====

/// Test the full walk: five rounds, completion exactly once, frozen
/// score, further advances no-ops.
#[test]
fn test_completion_fires_exactly_once() {
    let mut session = start();

    for round in 0..4 {
        answer_correctly(&mut session);
        assert_eq!(
            session.advance(),
            Progress::Next(RoundSeq::new(round + 1)),
            "round {round} should advance to the next deal"
        );
    }

    // Last round: answer, then the advance that completes
    answer_correctly(&mut session);
    let finish = session.advance();
    let report = match finish {
        Progress::Finished(report) => report,
        other => panic!("expected Finished, got {other:?}"),
    };

    assert_eq!(report.score(), 5);
    assert_eq!(report.max_score(), 5);
    assert_eq!(report.percentage(), 100);
    assert_eq!(report.rounds().len(), 5);
    assert!(session.is_complete());

    // Everything after the transition is a no-op
    assert_eq!(session.advance(), Progress::AlreadyComplete);
    assert_eq!(session.advance(), Progress::AlreadyComplete);
    assert_eq!(
        session.submit_answer("right"),
        Submission::Ignored(IgnoreReason::SessionOver)
    );
    assert_eq!(session.score(), 5, "score frozen after completion");
}

/// Test a mixed run's report: wrong answers recorded, score partial.
#[test]
fn test_mixed_run_report() {
    let mut session = start();

    // Wrong on round 0, correct on the rest
    session.submit_answer("are");
    session.advance();
    for _ in 1..5 {
        answer_correctly(&mut session);
        session.advance();
    }

    let report = session.report().expect("complete session has a report");
    assert_eq!(report.score(), 4);
    assert_eq!(report.percentage(), 80);
    assert_eq!(
        report.summary_message(),
        "Great job! You're getting really good."
    );

    assert!(!report.rounds()[0].correct);
    assert_eq!(report.rounds()[0].chosen.as_deref(), Some("are"));
    for record in &report.rounds()[1..] {
        assert!(record.correct);
    }
}

// ==== Invariants ====

/// Test that the score stays within bounds at every lifecycle point.
#[test]
fn test_score_bounds_throughout() {
    let mut session = start();

    loop {
        assert!(session.score() <= session.max_score());
        if session.is_complete() {
            break;
        }
        answer_correctly(&mut session);
        assert!(session.score() <= session.max_score());
        session.advance();
    }
}

/// Test that sequence numbers increase monotonically across deals.
#[test]
fn test_round_seq_monotonic() {
    let mut session = start();
    let mut last = session.round().seq().raw();

    for _ in 0..4 {
        answer_correctly(&mut session);
        session.advance();
        let seq = session.round().seq().raw();
        assert!(seq > last, "sequence must increase: {last} then {seq}");
        last = seq;
    }
}

/// Test that weighted configs scale the score and ceiling together.
#[test]
fn test_weighted_scoring() {
    let config = RoundConfig::default().with_points_per_round(2);
    let mut session = Session::start(config, standard_batch(), SessionRng::new(42)).unwrap();

    assert_eq!(session.max_score(), 10);
    answer_correctly(&mut session);
    assert_eq!(session.score(), 2);
}

/// Test that cloned sessions diverge independently (persistent history).
#[test]
fn test_snapshot_clone_diverges() {
    let mut session = start();
    answer_correctly(&mut session);
    session.advance();

    let snapshot = session.clone();
    answer_correctly(&mut session);

    assert_eq!(session.answers().len(), 2);
    assert_eq!(snapshot.answers().len(), 1, "snapshot must not see later answers");
    assert_eq!(snapshot.score(), 1);
}
