//! The session state machine: deal, answer, pause, advance, finish.
//!
//! ## Lifecycle
//!
//! ```text
//! start -> [round open] -> submit/timeout -> [feedback pause] -> advance
//!             ^                                                    |
//!             +------------------- next round ---------------------+
//!                                                                  |
//!                                             last round -> Finished(report)
//! ```
//!
//! ## Rules
//!
//! - A round is decided at most once. Repeat submissions, submissions for
//!   an earlier deal, and submissions after completion are ignored, never
//!   errors.
//! - The completion report is produced exactly once, at the transition to
//!   `Complete`. Advancing a finished session is a no-op.
//! - Timers are data owned by the session. The host reports elapsed time
//!   via [`Session::tick`]; deadlines that fall inside the slice fire in
//!   order. Dropping the session cancels everything.

use std::time::Duration;

use im::Vector;
use thiserror::Error;

use crate::core::{Question, RoundConfig, SessionRng};
use crate::engine::round::{AnswerRecord, Feedback, RoundSeq, RoundState};
use crate::engine::timing::Countdown;
use crate::score::SessionReport;

/// Failure to start a session.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The supplier produced fewer questions than the session needs.
    #[error("insufficient content: got {got} questions, need {need}")]
    InsufficientContent { got: usize, need: usize },

    /// The config asks for a session of zero rounds.
    #[error("config specifies zero rounds per session")]
    ZeroRounds,
}

/// Whether the session is still running.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    InProgress,
    Complete,
}

/// Why a submission was dropped instead of scored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IgnoreReason {
    /// The current round already has a verdict.
    RoundDecided,
    /// The session is complete.
    SessionOver,
    /// The submission targeted a deal that is no longer current.
    StaleRound,
    /// The choice is not among the dealt options.
    UnknownOption,
    /// No session is running (flow-level).
    NoSession,
    /// No question is posed right now (door sessions between doors).
    NoQuestionPosed,
}

/// Outcome of a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Submission {
    /// The submission decided the round.
    Accepted { seq: RoundSeq, feedback: Feedback },
    /// The submission was dropped. Never an error.
    Ignored(IgnoreReason),
}

impl Submission {
    /// Whether the submission decided the round.
    #[must_use]
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted { .. })
    }
}

/// Outcome of an advance.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Progress {
    /// A new round was dealt.
    Next(RoundSeq),
    /// The session just completed. Produced exactly once.
    Finished(SessionReport),
    /// The current round has no verdict yet; nothing to advance past.
    AwaitingAnswer,
    /// The session was already complete.
    AlreadyComplete,
}

/// Something that happened during a [`Session::tick`].
///
/// Events come back in deadline order. A single large tick can carry a
/// timeout, the advance it triggers, and so on through to completion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickEvent {
    /// The answer timer ran out; the round was decided as a timeout.
    TimedOut(RoundSeq),
    /// The feedback pause ended; a new round was dealt.
    Advanced(RoundSeq),
    /// The feedback pause ended on the last round; the session completed.
    Finished(SessionReport),
}

/// One run of a game: a fixed list of questions played as rounds.
///
/// ## Example
///
/// ```
/// use grammar_rounds::core::{Question, RoundConfig, SessionRng};
/// use grammar_rounds::engine::{Progress, Session};
///
/// let questions: Vec<Question> = (0..5)
///     .map(|i| {
///         Question::new(
///             format!("Prompt {i} __BLANK__."),
///             vec!["yes".into(), "no".into()],
///             "yes",
///             None,
///         )
///         .unwrap()
///     })
///     .collect();
///
/// let mut session =
///     Session::start(RoundConfig::default(), questions, SessionRng::new(7)).unwrap();
///
/// for _ in 0..5 {
///     let choice = session.round().dealt()[0].clone();
///     session.submit_answer(&choice);
///     session.advance();
/// }
///
/// assert!(session.is_complete());
/// ```
#[derive(Clone, Debug)]
pub struct Session {
    config: RoundConfig,
    questions: Vec<Question>,
    round: RoundState,
    current_index: usize,
    score: u32,
    status: SessionStatus,
    answers: Vector<AnswerRecord>,
    next_seq: u32,
    countdown: Option<Countdown>,
    pending_advance: Option<Countdown>,
    rng: SessionRng,
}

impl Session {
    /// Start a session, dealing the first round.
    ///
    /// Extra questions beyond the configured round count are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientContent`] when fewer questions
    /// arrive than the config needs.
    pub fn start(
        config: RoundConfig,
        mut questions: Vec<Question>,
        mut rng: SessionRng,
    ) -> Result<Self, EngineError> {
        let need = config.rounds_per_session();
        if need == 0 {
            return Err(EngineError::ZeroRounds);
        }
        if questions.len() < need {
            return Err(EngineError::InsufficientContent {
                got: questions.len(),
                need,
            });
        }
        questions.truncate(need);

        let round = RoundState::deal(RoundSeq::new(0), 0, &questions[0], &mut rng);
        let countdown = config.timer().map(Countdown::new);

        log::debug!(
            "session started: {} rounds, timed: {}",
            need,
            countdown.is_some()
        );

        Ok(Self {
            config,
            questions,
            round,
            current_index: 0,
            score: 0,
            status: SessionStatus::InProgress,
            answers: Vector::new(),
            next_seq: 1,
            countdown,
            pending_advance: None,
            rng,
        })
    }

    /// Submit an answer for the round currently on screen.
    pub fn submit_answer(&mut self, choice: &str) -> Submission {
        self.submit_answer_for(self.round.seq(), choice)
    }

    /// Submit an answer aimed at a specific deal.
    ///
    /// Input that raced a round transition carries the old sequence
    /// number and is dropped here instead of scoring the wrong round.
    pub fn submit_answer_for(&mut self, seq: RoundSeq, choice: &str) -> Submission {
        if self.status == SessionStatus::Complete {
            return Submission::Ignored(IgnoreReason::SessionOver);
        }
        if seq != self.round.seq() {
            log::debug!(
                "dropping stale submission for {} (current {})",
                seq,
                self.round.seq()
            );
            return Submission::Ignored(IgnoreReason::StaleRound);
        }
        if self.round.is_decided() {
            return Submission::Ignored(IgnoreReason::RoundDecided);
        }
        if !self.round.offers(choice) {
            log::warn!("choice '{choice}' is not a dealt option on {seq}");
            return Submission::Ignored(IgnoreReason::UnknownOption);
        }

        let correct = choice == self.questions[self.current_index].answer();
        self.decide_round(Some(choice.to_string()), correct, false)
    }

    /// Move past a decided round: deal the next one, or finish.
    ///
    /// Normally driven by [`Session::tick`] when the feedback pause
    /// elapses, but hosts without a clock (and tests) call it directly.
    /// Advancing a complete session is a no-op.
    pub fn advance(&mut self) -> Progress {
        if self.status == SessionStatus::Complete {
            return Progress::AlreadyComplete;
        }
        if !self.round.is_decided() {
            return Progress::AwaitingAnswer;
        }

        self.pending_advance = None;
        self.current_index += 1;

        if self.current_index >= self.questions.len() {
            self.status = SessionStatus::Complete;
            self.countdown = None;
            let report = self.make_report();
            log::debug!(
                "session complete: {}/{}",
                report.score(),
                report.max_score()
            );
            return Progress::Finished(report);
        }

        let seq = RoundSeq::new(self.next_seq);
        self.next_seq += 1;
        self.round = RoundState::deal(
            seq,
            self.current_index,
            &self.questions[self.current_index],
            &mut self.rng,
        );
        self.countdown = self.config.timer().map(Countdown::new);
        Progress::Next(seq)
    }

    /// Report elapsed wall time and collect everything that fired.
    ///
    /// Deadlines inside the slice are processed in order: an answer
    /// timer that runs out decides the round as a timeout, the feedback
    /// pause that follows can elapse in the same slice and advance, and
    /// so on until the slice is spent or the session completes. Events
    /// come back in the order they happened.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<TickEvent> {
        let mut events = Vec::new();
        let mut remaining = elapsed;

        while self.status == SessionStatus::InProgress {
            if let Some(mut cd) = self.countdown {
                let (fired, leftover) = cd.elapse(remaining);
                if !fired {
                    self.countdown = Some(cd);
                    break;
                }
                self.countdown = None;
                remaining = leftover;

                let seq = self.round.seq();
                log::debug!("{seq} timed out");
                self.decide_round(None, false, true);
                events.push(TickEvent::TimedOut(seq));
                continue;
            }

            if let Some(mut pause) = self.pending_advance {
                let (fired, leftover) = pause.elapse(remaining);
                if !fired {
                    self.pending_advance = Some(pause);
                    break;
                }
                self.pending_advance = None;
                remaining = leftover;

                match self.advance() {
                    Progress::Next(seq) => events.push(TickEvent::Advanced(seq)),
                    Progress::Finished(report) => events.push(TickEvent::Finished(report)),
                    // advance() after a decided round never reports these
                    Progress::AwaitingAnswer | Progress::AlreadyComplete => {}
                }
                continue;
            }

            break;
        }

        events
    }

    fn decide_round(&mut self, choice: Option<String>, correct: bool, timed_out: bool) -> Submission {
        let question = &self.questions[self.current_index];
        let record = AnswerRecord {
            seq: self.round.seq(),
            prompt: question.prompt().to_string(),
            chosen: choice.clone(),
            answer: question.answer().to_string(),
            correct,
            timed_out,
            explanation: question.explanation().map(String::from),
        };

        self.round.decide(choice, correct, timed_out);
        if correct {
            self.score += self.config.points_per_round();
        }
        self.answers.push_back(record);

        // Answering stops the clock; only the feedback pause remains armed.
        self.countdown = None;
        self.pending_advance = Some(Countdown::new(self.config.feedback_pause()));

        Submission::Accepted {
            seq: self.round.seq(),
            feedback: self.round.feedback(),
        }
    }

    fn make_report(&self) -> SessionReport {
        SessionReport::new(
            self.score,
            self.max_score(),
            self.answers.iter().cloned().collect(),
        )
    }

    /// The session config.
    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    /// The round currently on screen.
    #[must_use]
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// The question backing the current round.
    #[must_use]
    pub fn question(&self) -> &Question {
        &self.questions[self.current_index.min(self.questions.len() - 1)]
    }

    /// Zero-based index of the current round.
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current_index.min(self.questions.len() - 1)
    }

    /// Total rounds in this session.
    #[must_use]
    pub fn rounds_total(&self) -> usize {
        self.questions.len()
    }

    /// Points scored so far.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest score this session can produce.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.questions.len() as u32 * self.config.points_per_round()
    }

    #[must_use]
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    /// Decided rounds so far, oldest first.
    #[must_use]
    pub fn answers(&self) -> &Vector<AnswerRecord> {
        &self.answers
    }

    /// Whole seconds left on the answer timer, rounded up for display.
    /// `None` when no timer is running.
    #[must_use]
    pub fn remaining_seconds(&self) -> Option<u64> {
        self.countdown.map(|cd| cd.remaining_secs_ceil())
    }

    /// Whether the session sits in the feedback pause before the next
    /// round.
    #[must_use]
    pub fn awaiting_advance(&self) -> bool {
        self.pending_advance.is_some()
    }

    /// The completion report. `None` until the session completes.
    #[must_use]
    pub fn report(&self) -> Option<SessionReport> {
        match self.status {
            SessionStatus::Complete => Some(self.make_report()),
            SessionStatus::InProgress => None,
        }
    }
}
