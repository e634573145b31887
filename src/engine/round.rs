//! Per-round state: the dealt options, the player's pick, the verdict.
//!
//! Each round gets a fresh `RoundState` when it is dealt. The display
//! options are a shuffled copy of the question's canonical list, so a
//! round can be re-dealt (maze retries) without disturbing the source
//! question. Once a round is decided it never changes again - late or
//! repeated submissions bounce off `is_decided`.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Question, SessionRng};

/// Monotonic round sequence number within a session.
///
/// Every dealt round - including maze retry deals - gets a fresh
/// sequence number. Submissions carry the sequence they were aimed at,
/// which lets the engine drop input that raced a round transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoundSeq(pub u32);

impl RoundSeq {
    /// Create a new round sequence number.
    #[must_use]
    pub const fn new(seq: u32) -> Self {
        Self(seq)
    }

    /// Get the raw sequence value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for RoundSeq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Round({})", self.0)
    }
}

/// Verdict shown to the player for the current round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Feedback {
    /// Round is still open.
    #[default]
    None,
    Correct,
    Incorrect,
}

/// Live state of the round currently on screen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundState {
    seq: RoundSeq,
    question_index: usize,
    dealt: SmallVec<[String; 4]>,
    selected: Option<String>,
    feedback: Feedback,
    timed_out: bool,
}

impl RoundState {
    /// Deal a round: shuffle a copy of the question's options for display.
    pub(crate) fn deal(
        seq: RoundSeq,
        question_index: usize,
        question: &Question,
        rng: &mut SessionRng,
    ) -> Self {
        Self {
            seq,
            question_index,
            dealt: rng.shuffled(question.options()).into(),
            selected: None,
            feedback: Feedback::None,
            timed_out: false,
        }
    }

    /// Record the verdict. A round is decided exactly once.
    pub(crate) fn decide(&mut self, choice: Option<String>, correct: bool, timed_out: bool) {
        debug_assert!(!self.is_decided(), "round decided twice");
        self.selected = choice;
        self.feedback = if correct {
            Feedback::Correct
        } else {
            Feedback::Incorrect
        };
        self.timed_out = timed_out;
    }

    /// Sequence number of this deal.
    #[must_use]
    pub fn seq(&self) -> RoundSeq {
        self.seq
    }

    /// Index of the backing question in the session's list.
    #[must_use]
    pub fn question_index(&self) -> usize {
        self.question_index
    }

    /// Options in display order.
    #[must_use]
    pub fn dealt(&self) -> &[String] {
        &self.dealt
    }

    /// The player's pick, if any. `None` for open or timed-out rounds.
    #[must_use]
    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Current verdict.
    #[must_use]
    pub fn feedback(&self) -> Feedback {
        self.feedback
    }

    /// Whether the round ended on the countdown instead of a pick.
    #[must_use]
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// Whether a verdict has been recorded.
    #[must_use]
    pub fn is_decided(&self) -> bool {
        self.feedback != Feedback::None
    }

    /// Whether the dealt options contain the given choice.
    #[must_use]
    pub fn offers(&self, choice: &str) -> bool {
        self.dealt.iter().any(|o| o == choice)
    }
}

/// Immutable record of a decided round, kept in the session history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerRecord {
    /// Sequence number of the deal this record closes.
    pub seq: RoundSeq,

    /// The prompt as shown.
    pub prompt: String,

    /// The player's pick. `None` if the round timed out.
    pub chosen: Option<String>,

    /// The correct option.
    pub answer: String,

    /// Whether the pick matched the answer.
    pub correct: bool,

    /// Whether the round ended on the countdown.
    pub timed_out: bool,

    /// Teaching note from the question, if any.
    pub explanation: Option<String>,
}

impl AnswerRecord {
    /// One-line feedback for this round.
    ///
    /// Wrong and timed-out rounds always name the correct answer; the
    /// question's explanation is appended when present.
    #[must_use]
    pub fn feedback_line(&self) -> String {
        let mut line = if self.correct {
            String::from("Correct!")
        } else if self.timed_out {
            format!("Time's up! The correct answer is \"{}\".", self.answer)
        } else {
            format!("The correct answer is \"{}\".", self.answer)
        };

        if let Some(explanation) = &self.explanation {
            line.push(' ');
            line.push_str(explanation);
        }

        line
    }
}
