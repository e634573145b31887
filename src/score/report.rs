//! Completion reports.
//!
//! A `SessionReport` is the immutable summary handed out exactly once
//! when a session finishes. It carries the score, the ceiling, and the
//! full round history for the summary screen.

use serde::{Deserialize, Serialize};

use crate::engine::round::AnswerRecord;

/// Summary of a finished session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReport {
    score: u32,
    max_score: u32,
    rounds: Vec<AnswerRecord>,
}

impl SessionReport {
    /// Assemble a report.
    #[must_use]
    pub fn new(score: u32, max_score: u32, rounds: Vec<AnswerRecord>) -> Self {
        Self {
            score,
            max_score,
            rounds,
        }
    }

    /// Points scored.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Highest score the session could have produced.
    #[must_use]
    pub fn max_score(&self) -> u32 {
        self.max_score
    }

    /// Every decided round, oldest first.
    #[must_use]
    pub fn rounds(&self) -> &[AnswerRecord] {
        &self.rounds
    }

    /// Score as a whole percentage, rounded half-up.
    ///
    /// A zero-ceiling report reads 0, never a division error.
    #[must_use]
    pub fn percentage(&self) -> u8 {
        if self.max_score == 0 {
            return 0;
        }
        let score = u64::from(self.score);
        let max = u64::from(self.max_score);
        // round(score / max * 100) in integer arithmetic
        (((200 * score + max) / (2 * max)).min(100)) as u8
    }

    /// Encouragement line for the summary screen, by percentage tier.
    #[must_use]
    pub fn summary_message(&self) -> &'static str {
        let pct = self.percentage();
        if pct > 90 {
            "Excellent work! You're a grammar master!"
        } else if pct > 70 {
            "Great job! You're getting really good."
        } else {
            "Good effort! Keep practicing."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(score: u32, max: u32) -> SessionReport {
        SessionReport::new(score, max, Vec::new())
    }

    #[test]
    fn test_percentage_rounds_half_up() {
        assert_eq!(report(5, 5).percentage(), 100);
        assert_eq!(report(0, 5).percentage(), 0);
        assert_eq!(report(3, 5).percentage(), 60);
        // 1/3 = 33.33 rounds down, 2/3 = 66.67 rounds up
        assert_eq!(report(1, 3).percentage(), 33);
        assert_eq!(report(2, 3).percentage(), 67);
        // 1/8 = 12.5 rounds half up
        assert_eq!(report(1, 8).percentage(), 13);
    }

    #[test]
    fn test_percentage_zero_ceiling() {
        assert_eq!(report(0, 0).percentage(), 0);
    }

    #[test]
    fn test_percentage_clamped() {
        // Score above ceiling should not happen, but the read stays sane
        assert_eq!(report(7, 5).percentage(), 100);
    }

    #[test]
    fn test_summary_message_tiers() {
        assert_eq!(
            report(5, 5).summary_message(),
            "Excellent work! You're a grammar master!"
        );
        assert_eq!(
            report(4, 5).summary_message(),
            "Great job! You're getting really good."
        );
        assert_eq!(
            report(3, 5).summary_message(),
            "Good effort! Keep practicing."
        );
        assert_eq!(
            report(0, 5).summary_message(),
            "Good effort! Keep practicing."
        );
    }

    #[test]
    fn test_tier_boundaries() {
        // Exactly 90 is not "excellent"; exactly 70 is not "great"
        assert_eq!(
            report(9, 10).summary_message(),
            "Great job! You're getting really good."
        );
        assert_eq!(
            report(7, 10).summary_message(),
            "Good effort! Keep practicing."
        );
    }
}
