//! The maze's view lifecycle: the standard loop over a different engine.
//!
//! The maze runs the same loading / failed / playing / summary loop as
//! every other game, but its live state is a [`MazeGame`], not a
//! `Session`: play is grid moves and door answers, and the run ends at
//! the exit rather than after a fixed round count. [`MazeFlow`] mirrors
//! [`GameFlow`](super::GameFlow) for that engine - it owns the supplier
//! and a master RNG, fetches the door pool, picks a layout, and notifies
//! the host's [`ScoreAggregator`] exactly once when the exit is reached.
//!
//! Each load draws a fresh builtin layout unless one is pinned with
//! [`MazeFlow::with_layout`], so Play Again changes the map as well as
//! the questions.

use crate::core::SessionRng;
use crate::engine::IgnoreReason;
use crate::flow::FlowError;
use crate::modes::maze::{DoorAnswer, MazeGame, MazeLayout, MoveOutcome};
use crate::modes::GameMode;
use crate::score::{ScoreAggregator, SessionReport};
use crate::supply::QuestionSupplier;

/// Where the maze view is in its lifecycle.
#[derive(Clone, Debug)]
pub enum MazeFlowState {
    /// Waiting on the supplier.
    Loading,
    /// The last fetch or start failed; retry is available.
    Failed(FlowError),
    /// A run is live.
    Playing(MazeGame),
    /// The run finished; its report is on screen.
    Summary(SessionReport),
}

/// Drives a maze run through load / play / summary / play-again.
///
/// ## Example
///
/// ```
/// use grammar_rounds::core::{Question, SessionRng};
/// use grammar_rounds::flow::MazeFlow;
/// use grammar_rounds::modes::maze::{DoorAnswer, MazeLayout, MoveOutcome};
/// use grammar_rounds::supply::ScriptedSupplier;
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
/// let supplier = ScriptedSupplier::new().with_batch(pool);
/// let mut flow = MazeFlow::with_rng(supplier, SessionRng::new(7))
///     .with_layout(MazeLayout::parse(["SDPPE", "WWWWW", "WWWWW", "WWWWW", "WWWWD"]));
///
/// flow.load();
/// assert!(flow.game().is_some());
///
/// // Bump the locked door to the east, then open it
/// let outcome = flow.move_player(1, 0, &mut ());
/// assert!(matches!(outcome, MoveOutcome::DoorChallenge { .. }));
/// let answer = flow.answer_door("yes");
/// assert!(matches!(answer, DoorAnswer::Unlocked { .. }));
/// ```
#[derive(Clone, Debug)]
pub struct MazeFlow<S: QuestionSupplier> {
    supplier: S,
    rng: SessionRng,
    layout: Option<MazeLayout>,
    state: MazeFlowState,
}

impl<S: QuestionSupplier> MazeFlow<S> {
    /// Create a maze flow seeded from entropy.
    pub fn new(supplier: S) -> Self {
        Self::with_rng(supplier, SessionRng::from_entropy())
    }

    /// Create a maze flow with an explicit master RNG, for reproducible
    /// runs.
    pub fn with_rng(supplier: S, rng: SessionRng) -> Self {
        Self {
            supplier,
            rng,
            layout: None,
            state: MazeFlowState::Loading,
        }
    }

    /// Pin every run to one layout instead of drawing a random builtin.
    #[must_use]
    pub fn with_layout(mut self, layout: MazeLayout) -> Self {
        self.layout = Some(layout);
        self
    }

    /// Fetch a door pool and start a run.
    ///
    /// Any live run is dropped first. On failure the flow parks in
    /// `Failed` and nothing else changes.
    pub fn load(&mut self) {
        self.state = MazeFlowState::Loading;

        let count = GameMode::GrammarMaze.question_count();
        let pool = match self.supplier.fetch(GameMode::GrammarMaze, count) {
            Ok(pool) => pool,
            Err(err) => {
                log::warn!(
                    "question supply failed for {}: {err}",
                    GameMode::GrammarMaze
                );
                self.state = MazeFlowState::Failed(err.into());
                return;
            }
        };

        let result = match &self.layout {
            Some(layout) => MazeGame::start(layout.clone(), pool, self.rng.fork()),
            None => MazeGame::start_random(pool, self.rng.fork()),
        };
        match result {
            Ok(game) => self.state = MazeFlowState::Playing(game),
            Err(err) => {
                log::warn!("maze start failed: {err}");
                self.state = MazeFlowState::Failed(err.into());
            }
        }
    }

    /// Re-invoke the supplier after a failure, with identical arguments.
    /// A no-op unless the flow is in `Failed`.
    pub fn retry(&mut self) {
        if matches!(self.state, MazeFlowState::Failed(_)) {
            self.load();
        }
    }

    /// Start over: drop whatever is live and fetch a fresh pool. An
    /// unpinned flow also draws a fresh layout.
    pub fn play_again(&mut self) {
        self.load();
    }

    /// Try to move the player, notifying the aggregator if the run ends
    /// at the exit. Ignored unless a run is live.
    pub fn move_player(
        &mut self,
        dx: i32,
        dy: i32,
        aggregator: &mut dyn ScoreAggregator,
    ) -> MoveOutcome {
        let MazeFlowState::Playing(game) = &mut self.state else {
            return MoveOutcome::Ignored;
        };

        let outcome = game.move_player(dx, dy);
        if let MoveOutcome::ReachedExit(report) = &outcome {
            aggregator.on_session_complete(report.score());
            self.state = MazeFlowState::Summary(report.clone());
        }
        outcome
    }

    /// Answer the question posed at a bumped door.
    ///
    /// Ignored with [`IgnoreReason::NoSession`] unless a run is live.
    pub fn answer_door(&mut self, choice: &str) -> DoorAnswer {
        match &mut self.state {
            MazeFlowState::Playing(game) => game.answer_door(choice),
            _ => DoorAnswer::Ignored(IgnoreReason::NoSession),
        }
    }

    #[must_use]
    pub fn state(&self) -> &MazeFlowState {
        &self.state
    }

    /// The live run, if any.
    #[must_use]
    pub fn game(&self) -> Option<&MazeGame> {
        match &self.state {
            MazeFlowState::Playing(game) => Some(game),
            _ => None,
        }
    }

    /// The finished run's report, while the summary is on screen.
    #[must_use]
    pub fn report(&self) -> Option<&SessionReport> {
        match &self.state {
            MazeFlowState::Summary(report) => Some(report),
            _ => None,
        }
    }

    #[must_use]
    pub fn supplier(&self) -> &S {
        &self.supplier
    }

    /// Mutable supplier access, for hosts that parameterize their next
    /// fetch.
    pub fn supplier_mut(&mut self) -> &mut S {
        &mut self.supplier
    }
}
