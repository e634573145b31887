//! Grammar Maze: walk a grid, unlock doors with questions, reach the exit.
//!
//! The maze layer wraps a [`DoorSession`] in a walkable 5x5 grid. Bumping
//! a locked door poses a question from the session's pool; answering
//! correctly opens that door for the rest of the run, answering wrong
//! leaves it locked and the next bump deals a fresh question. Stepping
//! onto the exit ends the run and produces the report, whether or not
//! every door was opened.

use rustc_hash::FxHashMap;

use crate::core::{Question, SessionRng};
use crate::engine::{
    DoorOutcome, DoorSession, EngineError, IgnoreReason, RoundSeq, RoundState,
};
use crate::score::SessionReport;

/// Grid edge length.
pub const MAZE_SIZE: usize = 5;

/// A cell coordinate, `x` across, `y` down.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub x: usize,
    pub y: usize,
}

impl GridPos {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for GridPos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// What occupies a cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cell {
    Wall,
    Path,
    Door,
    Start,
    Exit,
}

/// A parsed maze layout: the grid plus its landmarks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeLayout {
    rows: [[Cell; MAZE_SIZE]; MAZE_SIZE],
    start: GridPos,
    exit: GridPos,
    doors: Vec<GridPos>,
}

impl MazeLayout {
    /// Parse a layout from row strings: `W` wall, `P` path, `D` door,
    /// `S` start, `E` exit.
    ///
    /// # Panics
    ///
    /// Panics on malformed layouts: wrong row length, an unknown
    /// character, not exactly one start and one exit, or no doors.
    #[must_use]
    pub fn parse(source: [&str; MAZE_SIZE]) -> Self {
        let mut rows = [[Cell::Wall; MAZE_SIZE]; MAZE_SIZE];
        let mut start = None;
        let mut exit = None;
        let mut doors = Vec::new();

        for (y, row) in source.iter().enumerate() {
            assert_eq!(row.len(), MAZE_SIZE, "row {y} must have {MAZE_SIZE} cells");
            for (x, ch) in row.chars().enumerate() {
                let pos = GridPos::new(x, y);
                rows[y][x] = match ch {
                    'W' => Cell::Wall,
                    'P' => Cell::Path,
                    'D' => {
                        doors.push(pos);
                        Cell::Door
                    }
                    'S' => {
                        assert!(start.is_none(), "more than one start cell");
                        start = Some(pos);
                        Cell::Start
                    }
                    'E' => {
                        assert!(exit.is_none(), "more than one exit cell");
                        exit = Some(pos);
                        Cell::Exit
                    }
                    other => panic!("unknown maze cell '{other}' at {pos}"),
                };
            }
        }

        let start = start.expect("layout has no start cell");
        let exit = exit.expect("layout has no exit cell");
        assert!(!doors.is_empty(), "layout has no doors");

        Self {
            rows,
            start,
            exit,
            doors,
        }
    }

    #[must_use]
    pub fn cell(&self, pos: GridPos) -> Cell {
        self.rows[pos.y][pos.x]
    }

    #[must_use]
    pub fn start(&self) -> GridPos {
        self.start
    }

    #[must_use]
    pub fn exit(&self) -> GridPos {
        self.exit
    }

    /// Door positions in reading order.
    #[must_use]
    pub fn doors(&self) -> &[GridPos] {
        &self.doors
    }
}

const BUILTIN_ROWS: [[&str; MAZE_SIZE]; 5] = [
    ["SPDWE", "WWPWP", "PPPDP", "PWWWP", "PPDPP"],
    ["SWPPP", "PWPWP", "PDPWD", "PWWWP", "PPPDE"],
    ["SPPPW", "WWDWW", "PPPPP", "PWWWD", "PPDPE"],
    ["SPWPE", "PWWPP", "PDPDW", "PWPWW", "PPDPP"],
    ["SWPPP", "PWPWP", "PPDWP", "WWPWD", "PDPWE"],
];

/// The five shipped layouts. Every one is solvable: the exit and every
/// door are reachable from the start.
#[must_use]
pub fn builtin_layouts() -> [MazeLayout; 5] {
    BUILTIN_ROWS.map(MazeLayout::parse)
}

/// Outcome of a move attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum MoveOutcome {
    /// The player stepped onto the cell.
    Moved(GridPos),
    /// A wall or the grid edge. Nothing changes.
    Blocked,
    /// The player bumped a locked door; a question is posed and the
    /// player stays put.
    DoorChallenge { pos: GridPos, seq: RoundSeq },
    /// The player stepped onto the exit; the run is over.
    ReachedExit(SessionReport),
    /// Movement is ignored: the run is over or a question is open.
    Ignored,
}

/// Outcome of answering at a door.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DoorAnswer {
    /// The door opens and stays open. The player has not moved.
    Unlocked { pos: GridPos },
    /// Wrong. The door stays locked; bumping it again deals a fresh
    /// question.
    Retry,
    /// The answer was dropped. Never an error.
    Ignored(IgnoreReason),
}

/// One maze run: a layout, a player, and the door session scoring it.
///
/// ## Example
///
/// ```
/// use grammar_rounds::core::{Question, SessionRng};
/// use grammar_rounds::modes::maze::{MazeGame, MazeLayout, MoveOutcome};
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
/// let layout = MazeLayout::parse(["SDPPE", "WWWWW", "PDPPP", "WWWWW", "PPPPP"]);
/// let mut game = MazeGame::start(layout, pool, SessionRng::new(7)).unwrap();
///
/// // Bump the door to the east
/// let outcome = game.move_player(1, 0);
/// assert!(matches!(outcome, MoveOutcome::DoorChallenge { .. }));
/// ```
#[derive(Clone, Debug)]
pub struct MazeGame {
    layout: MazeLayout,
    player: GridPos,
    locked: FxHashMap<GridPos, bool>,
    pending_door: Option<GridPos>,
    session: DoorSession,
}

impl MazeGame {
    /// Start a run on the given layout.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InsufficientContent`] when the pool is
    /// too small for a door session.
    pub fn start(
        layout: MazeLayout,
        pool: Vec<Question>,
        rng: SessionRng,
    ) -> Result<Self, EngineError> {
        let session = DoorSession::start(layout.doors().len(), pool, rng)?;
        let locked = layout.doors().iter().map(|&pos| (pos, true)).collect();

        Ok(Self {
            player: layout.start(),
            layout,
            locked,
            pending_door: None,
            session,
        })
    }

    /// Start a run on one of the builtin layouts, chosen at random.
    pub fn start_random(pool: Vec<Question>, mut rng: SessionRng) -> Result<Self, EngineError> {
        let layouts = builtin_layouts();
        let pick = rng.gen_range_usize(0..layouts.len());
        let layout = layouts[pick].clone();
        Self::start(layout, pool, rng)
    }

    /// Try to move the player by one cell.
    ///
    /// Moves are ignored while a question is open and after the run
    /// ends; walls and the grid edge block.
    pub fn move_player(&mut self, dx: i32, dy: i32) -> MoveOutcome {
        if self.session.is_complete() || self.pending_door.is_some() {
            return MoveOutcome::Ignored;
        }

        let nx = self.player.x as i32 + dx;
        let ny = self.player.y as i32 + dy;
        let range = 0..MAZE_SIZE as i32;
        if !range.contains(&nx) || !range.contains(&ny) {
            return MoveOutcome::Blocked;
        }
        let target = GridPos::new(nx as usize, ny as usize);

        match self.layout.cell(target) {
            Cell::Wall => MoveOutcome::Blocked,
            Cell::Door if self.is_locked(target) => match self.session.pose_question() {
                Some(round) => {
                    let seq = round.seq();
                    self.pending_door = Some(target);
                    MoveOutcome::DoorChallenge { pos: target, seq }
                }
                None => MoveOutcome::Blocked,
            },
            Cell::Exit => {
                self.player = target;
                match self.session.finish() {
                    Some(report) => MoveOutcome::ReachedExit(report),
                    None => MoveOutcome::Ignored,
                }
            }
            Cell::Path | Cell::Start | Cell::Door => {
                self.player = target;
                MoveOutcome::Moved(target)
            }
        }
    }

    /// Answer the question posed at the bumped door.
    pub fn answer_door(&mut self, choice: &str) -> DoorAnswer {
        let Some(pos) = self.pending_door else {
            return DoorAnswer::Ignored(IgnoreReason::NoQuestionPosed);
        };

        match self.session.answer(choice) {
            DoorOutcome::Unlocked { .. } => {
                self.locked.insert(pos, false);
                self.pending_door = None;
                DoorAnswer::Unlocked { pos }
            }
            DoorOutcome::Retry { .. } => {
                // Door stays locked; the modal closes and the next bump
                // deals the next pool question
                self.pending_door = None;
                DoorAnswer::Retry
            }
            DoorOutcome::Ignored(reason) => DoorAnswer::Ignored(reason),
        }
    }

    #[must_use]
    pub fn layout(&self) -> &MazeLayout {
        &self.layout
    }

    #[must_use]
    pub fn player(&self) -> GridPos {
        self.player
    }

    /// Whether the door at `pos` is still locked. Non-door cells read
    /// unlocked.
    #[must_use]
    pub fn is_locked(&self, pos: GridPos) -> bool {
        self.locked.get(&pos).copied().unwrap_or(false)
    }

    /// The door currently posing a question.
    #[must_use]
    pub fn pending_door(&self) -> Option<GridPos> {
        self.pending_door
    }

    /// The posed question round, while a door challenge is open.
    #[must_use]
    pub fn challenge(&self) -> Option<&RoundState> {
        self.pending_door.and_then(|_| self.session.round())
    }

    /// The question backing the open challenge.
    #[must_use]
    pub fn challenge_question(&self) -> Option<&Question> {
        self.pending_door.and_then(|_| self.session.question())
    }

    /// The door session scoring this run.
    #[must_use]
    pub fn session(&self) -> &DoorSession {
        &self.session
    }

    #[must_use]
    pub fn doors_unlocked(&self) -> usize {
        self.session.doors_unlocked()
    }

    #[must_use]
    pub fn doors_total(&self) -> usize {
        self.session.doors_total()
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.session.is_complete()
    }
}
