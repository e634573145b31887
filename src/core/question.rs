//! Question records - validated quiz content.
//!
//! A `Question` holds the immutable content of one quiz round: a prompt
//! (possibly containing a blank marker), the canonical option list, the
//! correct answer, and an optional explanation shown with the feedback.
//!
//! Questions arrive from the supplier as untyped JSON (`RawQuestion`) and
//! are validated on construction. Display shuffling never touches the
//! canonical option order stored here - rounds shuffle a copy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Marker the supplier embeds in a prompt where the answer belongs.
///
/// Matches the placeholder the generative service is instructed to emit.
pub const BLANK_MARKER: &str = "__BLANK__";

/// Validation failure for a question record.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("answer '{answer}' is not among the options")]
    AnswerNotInOptions { answer: String },

    #[error("duplicate option '{option}'")]
    DuplicateOption { option: String },

    #[error("need at least 2 options, got {got}")]
    TooFewOptions { got: usize },
}

/// Wire form of a question, exactly as the supplier's JSON spells it.
///
/// Carries no invariants - convert into [`Question`] to validate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawQuestion {
    /// Display sentence, possibly containing [`BLANK_MARKER`].
    pub sentence: String,

    /// Answer choices in supplier order.
    pub options: Vec<String>,

    /// The correct choice. Must be one of `options`.
    pub answer: String,

    /// Optional teaching note shown with the feedback.
    #[serde(default)]
    pub explanation: Option<String>,
}

/// A validated quiz question.
///
/// Invariants, enforced at construction:
/// - the answer is one of the options
/// - options contain no duplicates
/// - there are at least two options
///
/// ## Example
///
/// ```
/// use grammar_rounds::core::Question;
///
/// let q = Question::new(
///     "She __BLANK__ to school every day.",
///     vec!["goes".into(), "go".into(), "going".into()],
///     "goes",
///     Some("Third person singular takes -es.".into()),
/// ).unwrap();
///
/// assert_eq!(q.answer(), "goes");
/// assert_eq!(q.prompt_parts(), ("She ", " to school every day."));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawQuestion", into = "RawQuestion")]
pub struct Question {
    prompt: String,
    options: Vec<String>,
    answer: String,
    explanation: Option<String>,
}

impl Question {
    /// Create a validated question.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if the answer is missing from the options,
    /// the options contain duplicates, or fewer than two options exist.
    pub fn new(
        prompt: impl Into<String>,
        options: Vec<String>,
        answer: impl Into<String>,
        explanation: Option<String>,
    ) -> Result<Self, QuestionError> {
        let answer = answer.into();

        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { got: options.len() });
        }

        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(QuestionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }

        if !options.contains(&answer) {
            return Err(QuestionError::AnswerNotInOptions { answer });
        }

        Ok(Self {
            prompt: prompt.into(),
            options,
            answer,
            explanation,
        })
    }

    /// The display prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Canonical options in supplier order. Never display this order
    /// directly - rounds shuffle a copy.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The correct option.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Optional teaching note.
    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    /// Whether the prompt contains a blank marker.
    #[must_use]
    pub fn has_blank(&self) -> bool {
        self.prompt.contains(BLANK_MARKER)
    }

    /// Split the prompt around the blank marker.
    ///
    /// Returns `(before, after)`. Prompts without a marker come back as
    /// `(whole_prompt, "")`.
    #[must_use]
    pub fn prompt_parts(&self) -> (&str, &str) {
        match self.prompt.split_once(BLANK_MARKER) {
            Some((before, after)) => (before, after),
            None => (self.prompt.as_str(), ""),
        }
    }
}

impl TryFrom<RawQuestion> for Question {
    type Error = QuestionError;

    fn try_from(raw: RawQuestion) -> Result<Self, Self::Error> {
        Question::new(raw.sentence, raw.options, raw.answer, raw.explanation)
    }
}

impl From<Question> for RawQuestion {
    fn from(q: Question) -> Self {
        RawQuestion {
            sentence: q.prompt,
            options: q.options,
            answer: q.answer,
            explanation: q.explanation,
        }
    }
}
