//! Grammar Spotter: tap the word that is grammatically wrong.
//!
//! Spotter content arrives in its own wire shape - a sentence plus the
//! wrong word and its correction - and is lowered onto the standard
//! engine: the sentence's distinct words become the options, the wrong
//! word becomes the answer. Taps are normalized (punctuation stripped,
//! lowercased) before submission so "Runs." matches the option "runs".

use serde::{Deserialize, Serialize};

use crate::core::{Question, QuestionError};
use crate::engine::{RoundSeq, Session, Submission};
use crate::supply::SupplyError;

/// Strip sentence punctuation and lowercase, the comparison form for
/// tapped words.
#[must_use]
pub fn normalize_word(word: &str) -> String {
    let stripped: String = word
        .chars()
        .filter(|c| !matches!(c, '.' | ',' | '!' | '?'))
        .collect();
    stripped.to_lowercase()
}

/// Wire form of a spotter question.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpotterQuestion {
    /// The sentence containing exactly one wrong word.
    pub sentence: String,

    /// The wrong word, as it appears in the sentence.
    pub incorrect_word: String,

    /// What the wrong word should have been.
    pub correct_word: String,

    #[serde(default)]
    pub explanation: Option<String>,
}

impl SpotterQuestion {
    /// Lower onto the standard engine: distinct normalized sentence
    /// words as options, the normalized wrong word as the answer.
    ///
    /// The correction is folded into the explanation so the feedback
    /// line can show what the word should have been.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the wrong word does not occur in
    /// the sentence or the sentence has fewer than two distinct words.
    pub fn into_question(self) -> Result<Question, QuestionError> {
        let mut options: Vec<String> = Vec::new();
        for word in self.sentence.split_whitespace() {
            let normalized = normalize_word(word);
            if !normalized.is_empty() && !options.contains(&normalized) {
                options.push(normalized);
            }
        }

        let answer = normalize_word(&self.incorrect_word);
        let explanation = match self.explanation {
            Some(text) => format!(
                "\"{}\" should be \"{}\". {}",
                self.incorrect_word, self.correct_word, text
            ),
            None => format!(
                "\"{}\" should be \"{}\".",
                self.incorrect_word, self.correct_word
            ),
        };

        Question::new(self.sentence, options, answer, Some(explanation))
    }
}

/// Decode a JSON batch of spotter records into engine questions.
///
/// # Errors
///
/// Returns [`SupplyError::MalformedBatch`] for non-array payloads and
/// [`SupplyError::BadRecord`] when a record's wrong word is missing
/// from its sentence.
pub fn decode_spotter_batch(json: &str) -> Result<Vec<Question>, SupplyError> {
    let raw: Vec<SpotterQuestion> =
        serde_json::from_str(json).map_err(|e| SupplyError::MalformedBatch(e.to_string()))?;

    raw.into_iter()
        .map(|record| record.into_question().map_err(SupplyError::from))
        .collect()
}

/// Submit a tapped word, normalizing it first.
pub fn tap_word(session: &mut Session, seq: RoundSeq, word: &str) -> Submission {
    session.submit_answer_for(seq, &normalize_word(word))
}
