//! Round configuration.
//!
//! One engine drives every game; the differences between games live in a
//! `RoundConfig` value built from a handful of knobs. Presets for the
//! shipped games are in the `modes` module.
//!
//! The engine never hardcodes a game's pacing - round count, scoring,
//! timer, and input mode all come from the config.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Rounds in a standard session.
pub const ROUNDS_PER_SESSION: usize = 5;

/// Per-round answer timer for timed games.
pub const ANSWER_TIMER: Duration = Duration::from_secs(10);

/// Pause between showing feedback and advancing to the next round.
pub const FEEDBACK_PAUSE: Duration = Duration::from_millis(2500);

/// How the player hands an option to the engine.
///
/// Purely descriptive from the engine's side - every input mode funnels
/// into the same submit operation - but hosts use it to pick the
/// front-end interaction.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputMode {
    /// Tap or click an option button.
    #[default]
    Click,
    /// Drag an option tile onto the blank.
    Drag,
    /// Tap a word inside the prompt itself.
    WordTap,
}

/// Knobs for a session.
///
/// ## Example
///
/// ```
/// use std::time::Duration;
/// use grammar_rounds::core::RoundConfig;
///
/// let config = RoundConfig::default()
///     .with_timer(Some(Duration::from_secs(10)))
///     .with_points_per_round(2);
///
/// assert_eq!(config.rounds_per_session(), 5);
/// assert_eq!(config.points_per_round(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundConfig {
    rounds_per_session: usize,
    points_per_round: u32,
    input: InputMode,
    timer: Option<Duration>,
    feedback_pause: Duration,
}

impl Default for RoundConfig {
    fn default() -> Self {
        RoundConfig {
            rounds_per_session: ROUNDS_PER_SESSION,
            points_per_round: 1,
            input: InputMode::default(),
            timer: None,
            feedback_pause: FEEDBACK_PAUSE,
        }
    }
}

impl RoundConfig {
    /// Set the number of rounds per session.
    #[must_use]
    pub fn with_rounds_per_session(mut self, rounds: usize) -> Self {
        self.rounds_per_session = rounds;
        self
    }

    /// Set the points awarded for a correct answer.
    #[must_use]
    pub fn with_points_per_round(mut self, points: u32) -> Self {
        self.points_per_round = points;
        self
    }

    /// Set the input mode.
    #[must_use]
    pub fn with_input(mut self, input: InputMode) -> Self {
        self.input = input;
        self
    }

    /// Set the per-round answer timer. `None` means untimed.
    #[must_use]
    pub fn with_timer(mut self, timer: Option<Duration>) -> Self {
        self.timer = timer;
        self
    }

    /// Set the pause between feedback and the next round.
    #[must_use]
    pub fn with_feedback_pause(mut self, pause: Duration) -> Self {
        self.feedback_pause = pause;
        self
    }

    #[must_use]
    pub fn rounds_per_session(&self) -> usize {
        self.rounds_per_session
    }

    #[must_use]
    pub fn points_per_round(&self) -> u32 {
        self.points_per_round
    }

    #[must_use]
    pub fn input(&self) -> InputMode {
        self.input
    }

    #[must_use]
    pub fn timer(&self) -> Option<Duration> {
        self.timer
    }

    #[must_use]
    pub fn feedback_pause(&self) -> Duration {
        self.feedback_pause
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RoundConfig::default();
        assert_eq!(config.rounds_per_session(), ROUNDS_PER_SESSION);
        assert_eq!(config.points_per_round(), 1);
        assert_eq!(config.input(), InputMode::Click);
        assert_eq!(config.timer(), None);
        assert_eq!(config.feedback_pause(), FEEDBACK_PAUSE);
    }

    #[test]
    fn test_builder_chain() {
        let config = RoundConfig::default()
            .with_rounds_per_session(3)
            .with_input(InputMode::Drag)
            .with_timer(Some(ANSWER_TIMER))
            .with_feedback_pause(Duration::from_millis(500));

        assert_eq!(config.rounds_per_session(), 3);
        assert_eq!(config.input(), InputMode::Drag);
        assert_eq!(config.timer(), Some(Duration::from_secs(10)));
        assert_eq!(config.feedback_pause(), Duration::from_millis(500));
    }
}
