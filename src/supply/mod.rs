//! Question supply: where content comes from.
//!
//! The engine never talks to a generative backend itself. Hosts
//! implement [`QuestionSupplier`] over whatever produces their content
//! (an HTTP client, a bundled file, a database) and the game flow asks
//! it for a batch per session. Batches arrive as JSON arrays and are
//! validated record by record on the way in.

use std::collections::VecDeque;

use thiserror::Error;

use crate::core::{Question, QuestionError, RawQuestion};
use crate::modes::GameMode;

/// Failure to produce a question batch.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SupplyError {
    /// The backing generator failed (network, quota, refusal).
    #[error("content generation failed: {0}")]
    ContentGeneration(String),

    /// A record decoded but failed validation.
    #[error("bad question record: {0}")]
    BadRecord(#[from] QuestionError),

    /// The batch was not a JSON array of question records.
    #[error("malformed question batch: {0}")]
    MalformedBatch(String),
}

/// Source of question batches, one fetch per session.
///
/// A fetch that returns fewer questions than asked for is not an error
/// here - the session start checks the count and reports
/// insufficiency itself.
pub trait QuestionSupplier {
    fn fetch(&mut self, mode: GameMode, count: usize) -> Result<Vec<Question>, SupplyError>;
}

/// Decode a JSON batch of question records, validating each one.
///
/// # Errors
///
/// Returns [`SupplyError::MalformedBatch`] when the payload is not a
/// JSON array of records, and [`SupplyError::BadRecord`] when a record
/// breaks a question invariant.
///
/// ## Example
///
/// ```
/// use grammar_rounds::supply::decode_batch;
///
/// let batch = r#"[{
///     "sentence": "She __BLANK__ to school.",
///     "options": ["goes", "go"],
///     "answer": "goes",
///     "explanation": "Third person singular."
/// }]"#;
///
/// let questions = decode_batch(batch).unwrap();
/// assert_eq!(questions.len(), 1);
/// ```
pub fn decode_batch(json: &str) -> Result<Vec<Question>, SupplyError> {
    let raw: Vec<RawQuestion> =
        serde_json::from_str(json).map_err(|e| SupplyError::MalformedBatch(e.to_string()))?;

    raw.into_iter()
        .map(|record| Question::try_from(record).map_err(SupplyError::from))
        .collect()
}

/// Supplier that plays back scripted batches, for tests and demos.
///
/// Each fetch consumes the next scripted outcome; an exhausted script
/// reports a generation failure.
#[derive(Clone, Debug, Default)]
pub struct ScriptedSupplier {
    script: VecDeque<Result<Vec<Question>, SupplyError>>,
}

impl ScriptedSupplier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful batch.
    #[must_use]
    pub fn with_batch(mut self, questions: Vec<Question>) -> Self {
        self.script.push_back(Ok(questions));
        self
    }

    /// Queue a failed fetch.
    #[must_use]
    pub fn with_failure(mut self, error: SupplyError) -> Self {
        self.script.push_back(Err(error));
        self
    }

    /// Queue a successful batch on an existing supplier.
    pub fn push_batch(&mut self, questions: Vec<Question>) {
        self.script.push_back(Ok(questions));
    }

    /// Queue a failed fetch on an existing supplier.
    pub fn push_failure(&mut self, error: SupplyError) {
        self.script.push_back(Err(error));
    }

    /// Outcomes still queued.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl QuestionSupplier for ScriptedSupplier {
    fn fetch(&mut self, _mode: GameMode, _count: usize) -> Result<Vec<Question>, SupplyError> {
        self.script.pop_front().unwrap_or_else(|| {
            Err(SupplyError::ContentGeneration(
                "scripted supplier exhausted".into(),
            ))
        })
    }
}
