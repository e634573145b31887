//! The per-game view lifecycle: loading, failed, playing, summary.
//!
//! Every game runs the same loop: fetch a batch, play a session, show
//! the summary, offer Play Again. `GameFlow` owns that loop for the
//! standard modes - it holds the supplier, the mode's config, a master
//! RNG forked once per session, and at most one live [`Session`].
//!
//! Failed fetches park the flow in `Failed` with a retry affordance and
//! mutate nothing else, so retrying is always safe. Play Again drops
//! the live session, which cancels its pending deadlines, before
//! fetching fresh content. A completed session notifies the host's
//! [`ScoreAggregator`] exactly once, at the moment the report is
//! produced.
//!
//! The maze runs the same loop over its own engine; [`MazeFlow`] is its
//! counterpart.

pub mod maze;

pub use maze::{MazeFlow, MazeFlowState};

use std::time::Duration;

use thiserror::Error;

use crate::core::{RoundConfig, SessionRng};
use crate::engine::{
    EngineError, IgnoreReason, Progress, RoundSeq, Session, Submission, TickEvent,
};
use crate::modes::GameMode;
use crate::score::{ScoreAggregator, SessionReport};
use crate::supply::{QuestionSupplier, SupplyError};

/// Why a flow could not reach (or start) play.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    /// The supplier failed to produce a batch.
    #[error("question supply failed: {0}")]
    Supply(#[from] SupplyError),

    /// The batch arrived but the session would not start.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The mode runs a door session; [`MazeFlow`] is its driver.
    #[error("{0} runs a door session, not a standard flow")]
    UnsupportedMode(GameMode),
}

/// Where the view is in its lifecycle.
#[derive(Clone, Debug)]
pub enum FlowState {
    /// Waiting on the supplier.
    Loading,
    /// The last fetch or start failed; retry is available.
    Failed(FlowError),
    /// A session is live.
    Playing(Session),
    /// The session finished; its report is on screen.
    Summary(SessionReport),
}

/// Drives one game mode through load / play / summary / play-again.
///
/// ## Example
///
/// ```
/// use grammar_rounds::core::{Question, SessionRng};
/// use grammar_rounds::flow::{FlowState, GameFlow};
/// use grammar_rounds::modes::GameMode;
/// use grammar_rounds::score::ScoreTotal;
/// use grammar_rounds::supply::ScriptedSupplier;
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
/// let supplier = ScriptedSupplier::new().with_batch(questions);
/// let mut flow = GameFlow::with_rng(
///     GameMode::GrammarFill,
///     supplier,
///     SessionRng::new(42),
/// )
/// .unwrap();
///
/// let mut total = ScoreTotal::new();
/// flow.load();
/// while let FlowState::Playing(_) = flow.state() {
///     flow.submit("yes");
///     flow.advance(&mut total);
/// }
///
/// assert_eq!(total.total(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct GameFlow<S: QuestionSupplier> {
    mode: GameMode,
    config: RoundConfig,
    supplier: S,
    rng: SessionRng,
    state: FlowState,
}

impl<S: QuestionSupplier> GameFlow<S> {
    /// Create a flow for a standard mode, seeded from entropy.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::UnsupportedMode`] for the maze; drive it
    /// with a [`MazeFlow`] instead.
    pub fn new(mode: GameMode, supplier: S) -> Result<Self, FlowError> {
        Self::with_rng(mode, supplier, SessionRng::from_entropy())
    }

    /// Create a flow with an explicit master RNG, for reproducible runs.
    pub fn with_rng(mode: GameMode, supplier: S, rng: SessionRng) -> Result<Self, FlowError> {
        let config = mode
            .round_config()
            .ok_or(FlowError::UnsupportedMode(mode))?;

        Ok(Self {
            mode,
            config,
            supplier,
            rng,
            state: FlowState::Loading,
        })
    }

    /// Fetch a batch and start a session.
    ///
    /// Any live session is dropped first, cancelling its pending
    /// deadlines. On failure the flow parks in `Failed` and nothing
    /// else changes.
    pub fn load(&mut self) {
        self.state = FlowState::Loading;

        let count = self.mode.question_count();
        let questions = match self.supplier.fetch(self.mode, count) {
            Ok(questions) => questions,
            Err(err) => {
                log::warn!("question supply failed for {}: {err}", self.mode);
                self.state = FlowState::Failed(err.into());
                return;
            }
        };

        match Session::start(self.config.clone(), questions, self.rng.fork()) {
            Ok(session) => self.state = FlowState::Playing(session),
            Err(err) => {
                log::warn!("session start failed for {}: {err}", self.mode);
                self.state = FlowState::Failed(err.into());
            }
        }
    }

    /// Re-invoke the supplier after a failure, with identical arguments.
    /// A no-op unless the flow is in `Failed`.
    pub fn retry(&mut self) {
        if matches!(self.state, FlowState::Failed(_)) {
            self.load();
        }
    }

    /// Start over: drop whatever is live and fetch a fresh batch.
    pub fn play_again(&mut self) {
        self.load();
    }

    /// Submit an answer for the round currently on screen.
    ///
    /// Ignored with [`IgnoreReason::NoSession`] unless a session is
    /// live.
    pub fn submit(&mut self, choice: &str) -> Submission {
        match &mut self.state {
            FlowState::Playing(session) => session.submit_answer(choice),
            _ => Submission::Ignored(IgnoreReason::NoSession),
        }
    }

    /// Submit an answer aimed at a specific deal.
    pub fn submit_for(&mut self, seq: RoundSeq, choice: &str) -> Submission {
        match &mut self.state {
            FlowState::Playing(session) => session.submit_answer_for(seq, choice),
            _ => Submission::Ignored(IgnoreReason::NoSession),
        }
    }

    /// Advance the live session, notifying the aggregator if it
    /// finishes. `None` when no session is live.
    pub fn advance(&mut self, aggregator: &mut dyn ScoreAggregator) -> Option<Progress> {
        let FlowState::Playing(session) = &mut self.state else {
            return None;
        };

        let progress = session.advance();
        if let Progress::Finished(report) = &progress {
            aggregator.on_session_complete(report.score());
            self.state = FlowState::Summary(report.clone());
        }
        Some(progress)
    }

    /// Report elapsed time to the live session, notifying the
    /// aggregator if it finishes. Empty when no session is live.
    pub fn tick(
        &mut self,
        elapsed: Duration,
        aggregator: &mut dyn ScoreAggregator,
    ) -> Vec<TickEvent> {
        let FlowState::Playing(session) = &mut self.state else {
            return Vec::new();
        };

        let events = session.tick(elapsed);
        if let Some(TickEvent::Finished(report)) = events.last() {
            aggregator.on_session_complete(report.score());
            self.state = FlowState::Summary(report.clone());
        }
        events
    }

    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    #[must_use]
    pub fn config(&self) -> &RoundConfig {
        &self.config
    }

    #[must_use]
    pub fn state(&self) -> &FlowState {
        &self.state
    }

    /// The live session, if any.
    #[must_use]
    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            FlowState::Playing(session) => Some(session),
            _ => None,
        }
    }

    /// The finished session's report, while the summary is on screen.
    #[must_use]
    pub fn report(&self) -> Option<&SessionReport> {
        match &self.state {
            FlowState::Summary(report) => Some(report),
            _ => None,
        }
    }

    #[must_use]
    pub fn supplier(&self) -> &S {
        &self.supplier
    }

    /// Mutable supplier access, for hosts that parameterize their next
    /// fetch (the wheel sets its landed category this way).
    pub fn supplier_mut(&mut self) -> &mut S {
        &mut self.supplier
    }
}
