//! Door sessions: the retry variant of the round state machine.
//!
//! A door session scores *doors unlocked* instead of questions answered.
//! Each locked door poses a question; a wrong answer consumes that
//! question and the next approach deals a fresh one, so the player can
//! keep trying the same door until it opens. The question pool is larger
//! than the door count to feed those retries, and the cursor wraps around
//! the pool when retries outrun it.
//!
//! Door sessions are untimed and host-paced: movement and modal display
//! live in the host (see `modes::maze` for the grid layer), and the
//! session is told about approaches and answers. Completion is the
//! host's call too - reaching the exit, not unlocking the last door,
//! ends a maze run - so the report comes from [`DoorSession::finish`].

use std::time::Duration;

use im::Vector;

use crate::core::{Question, SessionRng};
use crate::engine::round::{AnswerRecord, RoundSeq, RoundState};
use crate::engine::session::{EngineError, IgnoreReason, SessionStatus};
use crate::score::SessionReport;

/// Minimum pool size for a door session. Retries burn through questions
/// faster than one-per-door, so the pool overshoots the door count.
pub const DOOR_POOL_MIN: usize = 10;

/// How long the question modal stays up after a verdict before closing.
/// Display pacing only; the session itself is untimed.
pub const DOOR_FEEDBACK_PAUSE: Duration = Duration::from_millis(1500);

/// Cycling question pool with retry-aware dealing.
///
/// Deals skip questions already answered correctly this session, wrapping
/// around the pool as needed. Once every question is solved the skip is
/// abandoned and the pool cycles plainly, so dealing never runs dry.
#[derive(Clone, Debug)]
pub(crate) struct QuestionPool {
    questions: Vec<Question>,
    cursor: usize,
    solved: Vec<bool>,
}

impl QuestionPool {
    fn new(questions: Vec<Question>) -> Self {
        let solved = vec![false; questions.len()];
        Self {
            questions,
            cursor: 0,
            solved,
        }
    }

    fn len(&self) -> usize {
        self.questions.len()
    }

    fn get(&self, index: usize) -> &Question {
        &self.questions[index]
    }

    /// Index of the next question to deal.
    fn next_index(&self) -> usize {
        let len = self.questions.len();
        for offset in 0..len {
            let index = (self.cursor + offset) % len;
            if !self.solved[index] {
                return index;
            }
        }
        // Everything solved; cycle plainly
        self.cursor % len
    }

    /// Mark a dealt question as used and move the cursor past it.
    fn consume(&mut self, index: usize, correct: bool) {
        if correct {
            self.solved[index] = true;
        }
        self.cursor = (index + 1) % self.questions.len();
    }
}

/// Outcome of answering at a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorOutcome {
    /// Correct: the door opens and stays open.
    Unlocked { seq: RoundSeq, doors_unlocked: usize },
    /// Wrong: the door stays locked; the next approach deals a fresh
    /// question.
    Retry { seq: RoundSeq },
    /// The answer was dropped. Never an error.
    Ignored(IgnoreReason),
}

/// One run through a set of locked doors.
///
/// ## Example
///
/// ```
/// use grammar_rounds::core::{Question, SessionRng};
/// use grammar_rounds::engine::{DoorOutcome, DoorSession};
///
/// let pool: Vec<Question> = (0..10)
///     .map(|i| {
///         Question::new(
///             format!("Door prompt {i} __BLANK__."),
///             vec!["yes".into(), "no".into()],
///             "yes",
///             None,
///         )
///         .unwrap()
///     })
///     .collect();
///
/// let mut doors = DoorSession::start(3, pool, SessionRng::new(7)).unwrap();
///
/// while !doors.all_doors_unlocked() {
///     doors.pose_question();
///     let outcome = doors.answer("yes");
///     assert!(matches!(outcome, DoorOutcome::Unlocked { .. }));
/// }
///
/// let report = doors.finish().unwrap();
/// assert_eq!(report.score(), 3);
/// ```
#[derive(Clone, Debug)]
pub struct DoorSession {
    pool: QuestionPool,
    doors_total: usize,
    doors_unlocked: usize,
    attempts_on_door: u32,
    round: Option<RoundState>,
    score: u32,
    status: SessionStatus,
    answers: Vector<AnswerRecord>,
    next_seq: u32,
    rng: SessionRng,
}

impl DoorSession {
    /// Start a door session.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientContent`] when the pool is
    /// smaller than [`DOOR_POOL_MIN`], and [`EngineError::ZeroRounds`]
    /// for a zero-door layout.
    pub fn start(
        doors_total: usize,
        pool: Vec<Question>,
        rng: SessionRng,
    ) -> Result<Self, EngineError> {
        if doors_total == 0 {
            return Err(EngineError::ZeroRounds);
        }
        if pool.len() < DOOR_POOL_MIN {
            return Err(EngineError::InsufficientContent {
                got: pool.len(),
                need: DOOR_POOL_MIN,
            });
        }

        log::debug!(
            "door session started: {} doors, pool of {}",
            doors_total,
            pool.len()
        );

        Ok(Self {
            pool: QuestionPool::new(pool),
            doors_total,
            doors_unlocked: 0,
            attempts_on_door: 0,
            round: None,
            score: 0,
            status: SessionStatus::InProgress,
            answers: Vector::new(),
            next_seq: 0,
            rng,
        })
    }

    /// Deal a question for the door being attempted.
    ///
    /// Re-posing while a question is open returns the same deal; posing
    /// after a wrong answer deals the next question from the pool.
    /// Returns `None` once the session is complete or every door is
    /// open.
    pub fn pose_question(&mut self) -> Option<&RoundState> {
        if self.status == SessionStatus::Complete || self.all_doors_unlocked() {
            return None;
        }

        let needs_deal = match &self.round {
            Some(round) => round.is_decided(),
            None => true,
        };

        if needs_deal {
            let index = self.pool.next_index();
            let seq = RoundSeq::new(self.next_seq);
            self.next_seq += 1;
            self.round = Some(RoundState::deal(
                seq,
                index,
                self.pool.get(index),
                &mut self.rng,
            ));
        }

        self.round.as_ref()
    }

    /// Answer the posed question.
    ///
    /// Either way the question is consumed: a correct answer opens the
    /// door, a wrong one leaves it locked and queues a fresh question
    /// for the next approach.
    pub fn answer(&mut self, choice: &str) -> DoorOutcome {
        if self.status == SessionStatus::Complete {
            return DoorOutcome::Ignored(IgnoreReason::SessionOver);
        }
        let Some(round) = self.round.as_mut() else {
            return DoorOutcome::Ignored(IgnoreReason::NoQuestionPosed);
        };
        if round.is_decided() {
            return DoorOutcome::Ignored(IgnoreReason::RoundDecided);
        }
        if !round.offers(choice) {
            log::warn!("choice '{choice}' is not a dealt option on {}", round.seq());
            return DoorOutcome::Ignored(IgnoreReason::UnknownOption);
        }

        let index = round.question_index();
        let question = self.pool.get(index);
        let correct = choice == question.answer();
        let record = AnswerRecord {
            seq: round.seq(),
            prompt: question.prompt().to_string(),
            chosen: Some(choice.to_string()),
            answer: question.answer().to_string(),
            correct,
            timed_out: false,
            explanation: question.explanation().map(String::from),
        };

        round.decide(Some(choice.to_string()), correct, false);
        let seq = round.seq();

        self.pool.consume(index, correct);
        self.answers.push_back(record);

        if correct {
            self.doors_unlocked += 1;
            self.score += 1;
            self.attempts_on_door = 0;
            self.round = None;
            log::debug!(
                "door unlocked ({}/{})",
                self.doors_unlocked,
                self.doors_total
            );
            DoorOutcome::Unlocked {
                seq,
                doors_unlocked: self.doors_unlocked,
            }
        } else {
            self.attempts_on_door += 1;
            DoorOutcome::Retry { seq }
        }
    }

    /// Close the session and produce the report. Exactly-once: the
    /// first call returns the report, every later call returns `None`.
    pub fn finish(&mut self) -> Option<SessionReport> {
        match self.status {
            SessionStatus::Complete => None,
            SessionStatus::InProgress => {
                self.status = SessionStatus::Complete;
                self.round = None;
                let report = SessionReport::new(
                    self.score,
                    self.doors_total as u32,
                    self.answers.iter().cloned().collect(),
                );
                log::debug!(
                    "door session complete: {}/{}",
                    report.score(),
                    report.max_score()
                );
                Some(report)
            }
        }
    }

    #[must_use]
    pub fn doors_total(&self) -> usize {
        self.doors_total
    }

    #[must_use]
    pub fn doors_unlocked(&self) -> usize {
        self.doors_unlocked
    }

    /// Wrong answers on the door currently being attempted.
    #[must_use]
    pub fn attempts_on_door(&self) -> u32 {
        self.attempts_on_door
    }

    #[must_use]
    pub fn all_doors_unlocked(&self) -> bool {
        self.doors_unlocked >= self.doors_total
    }

    /// The posed question round, if one is open or showing feedback.
    #[must_use]
    pub fn round(&self) -> Option<&RoundState> {
        self.round.as_ref()
    }

    /// The question backing the posed round.
    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.round
            .as_ref()
            .map(|round| self.pool.get(round.question_index()))
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.status == SessionStatus::Complete
    }

    /// Decided questions so far, oldest first, retries included.
    #[must_use]
    pub fn answers(&self) -> &Vector<AnswerRecord> {
        &self.answers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool(n: usize) -> Vec<Question> {
        (0..n)
            .map(|i| {
                Question::new(
                    format!("Door prompt {i} __BLANK__."),
                    vec!["yes".into(), "no".into()],
                    "yes",
                    None,
                )
                .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_small_pool_rejected() {
        let err = DoorSession::start(3, pool(9), SessionRng::new(1)).unwrap_err();
        assert_eq!(err, EngineError::InsufficientContent { got: 9, need: 10 });
    }

    #[test]
    fn test_zero_doors_rejected() {
        let err = DoorSession::start(0, pool(10), SessionRng::new(1)).unwrap_err();
        assert_eq!(err, EngineError::ZeroRounds);
    }

    #[test]
    fn test_unlock_advances_pool() {
        let mut doors = DoorSession::start(3, pool(10), SessionRng::new(1)).unwrap();

        let first = doors.pose_question().unwrap().question_index();
        assert_eq!(first, 0);
        let outcome = doors.answer("yes");
        assert_eq!(
            outcome,
            DoorOutcome::Unlocked {
                seq: RoundSeq::new(0),
                doors_unlocked: 1,
            }
        );
        assert!(doors.round().is_none());

        let second = doors.pose_question().unwrap().question_index();
        assert_eq!(second, 1);
    }

    #[test]
    fn test_wrong_answer_deals_next_question() {
        let mut doors = DoorSession::start(3, pool(10), SessionRng::new(1)).unwrap();

        doors.pose_question();
        let outcome = doors.answer("no");
        assert_eq!(outcome, DoorOutcome::Retry { seq: RoundSeq::new(0) });
        assert_eq!(doors.doors_unlocked(), 0);
        assert_eq!(doors.attempts_on_door(), 1);

        // Same door, fresh question
        let retry = doors.pose_question().unwrap();
        assert_eq!(retry.seq(), RoundSeq::new(1));
        assert_eq!(retry.question_index(), 1);

        doors.answer("yes");
        assert_eq!(doors.doors_unlocked(), 1);
        assert_eq!(doors.attempts_on_door(), 0);
    }

    #[test]
    fn test_double_answer_ignored() {
        let mut doors = DoorSession::start(3, pool(10), SessionRng::new(1)).unwrap();

        doors.pose_question();
        doors.answer("no");
        let second = doors.answer("yes");
        assert_eq!(second, DoorOutcome::Ignored(IgnoreReason::RoundDecided));
        assert_eq!(doors.doors_unlocked(), 0);
    }

    #[test]
    fn test_answer_without_question_ignored() {
        let mut doors = DoorSession::start(3, pool(10), SessionRng::new(1)).unwrap();
        let outcome = doors.answer("yes");
        assert_eq!(outcome, DoorOutcome::Ignored(IgnoreReason::NoQuestionPosed));
    }

    #[test]
    fn test_pool_wrap_skips_solved() {
        let mut doors = DoorSession::start(3, pool(10), SessionRng::new(1)).unwrap();

        // Solve question 0 on the first door
        doors.pose_question();
        doors.answer("yes");

        // Burn the rest of the pool with wrong answers on door two
        for _ in 0..9 {
            doors.pose_question();
            doors.answer("no");
        }

        // Wrap lands on 1, not the solved 0
        let posed = doors.pose_question().unwrap();
        assert_eq!(posed.question_index(), 1);
    }

    #[test]
    fn test_fully_solved_pool_still_deals() {
        let mut doors = DoorSession::start(10, pool(10), SessionRng::new(1)).unwrap();

        // Open nine doors, solving nine questions
        for _ in 0..9 {
            doors.pose_question();
            doors.answer("yes");
        }
        // Solve the last question with a wrong answer first, so every
        // pool entry ends up solved while a door remains
        doors.pose_question();
        doors.answer("no");
        doors.pose_question();
        doors.answer("yes");
        assert!(doors.all_doors_unlocked());

        // Nothing left to pose
        assert!(doors.pose_question().is_none());
    }

    #[test]
    fn test_finish_exactly_once() {
        let mut doors = DoorSession::start(2, pool(10), SessionRng::new(1)).unwrap();

        doors.pose_question();
        doors.answer("yes");
        doors.pose_question();
        doors.answer("no");

        let report = doors.finish().unwrap();
        assert_eq!(report.score(), 1);
        assert_eq!(report.max_score(), 2);
        assert_eq!(report.rounds().len(), 3);

        assert!(doors.finish().is_none());
        assert!(doors.is_complete());
        assert_eq!(
            doors.answer("yes"),
            DoorOutcome::Ignored(IgnoreReason::SessionOver)
        );
    }

    #[test]
    fn test_history_keeps_retries() {
        let mut doors = DoorSession::start(1, pool(10), SessionRng::new(1)).unwrap();

        doors.pose_question();
        doors.answer("no");
        doors.pose_question();
        doors.answer("no");
        doors.pose_question();
        doors.answer("yes");

        assert_eq!(doors.answers().len(), 3);
        assert!(!doors.answers()[0].correct);
        assert!(!doors.answers()[1].correct);
        assert!(doors.answers()[2].correct);
        assert_eq!(doors.score(), 1);
    }
}
