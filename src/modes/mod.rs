//! The shipped game modes.
//!
//! Every mode is the same session state machine under a different
//! `RoundConfig` plus, for some, a thin adapter: the wheel adds spin
//! physics, the spotter turns sentences into word options, the maze
//! wraps a `DoorSession` in a walkable grid. No mode duplicates the
//! engine.

pub mod maze;
pub mod spotter;
pub mod wheel;

use serde::{Deserialize, Serialize};

use crate::core::{InputMode, RoundConfig, ANSWER_TIMER, ROUNDS_PER_SESSION};
use crate::engine::DOOR_POOL_MIN;

/// The game catalog.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameMode {
    /// Pick the word that completes the sentence.
    GrammarFill,
    /// Drag the preposition onto the blank.
    PrepositionDrop,
    /// Answer before the fuse burns down.
    VerbBombDefuse,
    /// Spin for a category, then answer from it.
    QuizWheel,
    /// Tap the word that is grammatically wrong.
    GrammarSpotter,
    /// Walk a maze, unlocking doors with questions.
    GrammarMaze,
}

impl GameMode {
    /// Every mode, in menu order.
    pub const ALL: [GameMode; 6] = [
        GameMode::GrammarFill,
        GameMode::PrepositionDrop,
        GameMode::VerbBombDefuse,
        GameMode::QuizWheel,
        GameMode::GrammarSpotter,
        GameMode::GrammarMaze,
    ];

    /// Menu card title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            GameMode::GrammarFill => "Grammar Fill",
            GameMode::PrepositionDrop => "Preposition Drop",
            GameMode::VerbBombDefuse => "Verb Bomb Defuse",
            GameMode::QuizWheel => "Quiz Wheel",
            GameMode::GrammarSpotter => "Grammar Spotter",
            GameMode::GrammarMaze => "Grammar Maze",
        }
    }

    /// Menu card description.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            GameMode::GrammarFill => "Complete the sentence with the missing word.",
            GameMode::PrepositionDrop => "Drag the right preposition into the blank.",
            GameMode::VerbBombDefuse => "Pick the correct verb form before the timer runs out.",
            GameMode::QuizWheel => "Spin the wheel and answer from the category it lands on.",
            GameMode::GrammarSpotter => "Tap the word that doesn't belong in the sentence.",
            GameMode::GrammarMaze => "Unlock doors with grammar questions and find the exit.",
        }
    }

    /// Questions to request from the supplier for one session.
    ///
    /// The maze over-fetches: its retry pool must outlast the doors.
    #[must_use]
    pub fn question_count(self) -> usize {
        match self {
            GameMode::GrammarMaze => DOOR_POOL_MIN,
            _ => ROUNDS_PER_SESSION,
        }
    }

    /// The engine config for this mode.
    ///
    /// `None` for the maze, which runs a [`crate::engine::DoorSession`]
    /// instead of a fixed-length session.
    #[must_use]
    pub fn round_config(self) -> Option<RoundConfig> {
        match self {
            GameMode::GrammarFill | GameMode::QuizWheel => Some(RoundConfig::default()),
            GameMode::PrepositionDrop => {
                Some(RoundConfig::default().with_input(InputMode::Drag))
            }
            GameMode::VerbBombDefuse => {
                Some(RoundConfig::default().with_timer(Some(ANSWER_TIMER)))
            }
            GameMode::GrammarSpotter => {
                Some(RoundConfig::default().with_input(InputMode::WordTap))
            }
            GameMode::GrammarMaze => None,
        }
    }
}

impl std::fmt::Display for GameMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_mode() {
        assert_eq!(GameMode::ALL.len(), 6);
        for mode in GameMode::ALL {
            assert!(!mode.title().is_empty());
            assert!(!mode.description().is_empty());
        }
    }

    #[test]
    fn test_mode_configs() {
        let bomb = GameMode::VerbBombDefuse.round_config().unwrap();
        assert_eq!(bomb.timer(), Some(ANSWER_TIMER));

        let drop = GameMode::PrepositionDrop.round_config().unwrap();
        assert_eq!(drop.input(), InputMode::Drag);

        let spotter = GameMode::GrammarSpotter.round_config().unwrap();
        assert_eq!(spotter.input(), InputMode::WordTap);

        assert!(GameMode::GrammarMaze.round_config().is_none());
    }

    #[test]
    fn test_question_counts() {
        assert_eq!(GameMode::GrammarFill.question_count(), 5);
        assert_eq!(GameMode::GrammarMaze.question_count(), 10);
    }
}
